//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor a partir de argumentos CLI. No se leen
//! variables de entorno ni archivos de configuración.
//!
//! ## Ejemplo
//!
//! ```bash
//! ./http_lite_server --directory /tmp/files/ --port 4221
//! ```

use crate::http::reader::ReadLimits;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Configuración del servidor
///
/// Se construye una vez al arrancar y después solo se lee.
#[derive(Debug, Clone, Parser)]
#[command(name = "http_lite_server")]
#[command(about = "Servidor HTTP/1.1 mínimo: root, echo, user-agent y archivos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio base donde el handler /files busca los archivos
    #[arg(long, default_value = "")]
    pub directory: String,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221")]
    pub port: u16,

    /// Máximo de bytes para request line + headers
    #[arg(long = "max-header-bytes", default_value = "8192")]
    pub max_header_bytes: usize,

    /// Máximo de bytes aceptados en un body con Content-Length
    #[arg(long = "max-body-bytes", default_value = "1048576")]
    pub max_body_bytes: usize,

    /// Filtro de logging (ej: "info", "debug", "http_lite_server=trace")
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Crea la configuración parseando los argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_lite_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Límites de lectura para cada conexión
    pub fn read_limits(&self) -> ReadLimits {
        ReadLimits {
            max_header_bytes: self.max_header_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        // Tiene que caber al menos "GET / HTTP/1.1\r\n"
        if self.max_header_bytes < 16 {
            return Err("Max header bytes must be >= 16".to_string());
        }

        if let Err(e) = EnvFilter::try_new(&self.log_level) {
            return Err(format!("Invalid log level '{}': {}", self.log_level, e));
        }

        Ok(())
    }
}

impl Default for Config {
    /// Los mismos valores que los defaults del CLI
    fn default() -> Self {
        Self {
            directory: String::new(),
            host: "0.0.0.0".to_string(),
            port: 4221,
            max_header_bytes: 8192,
            max_body_bytes: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.directory, "");
    }

    #[test]
    fn test_cli_defaults_match_default() {
        let parsed = Config::parse_from(["http_lite_server"]);
        let default = Config::default();

        assert_eq!(parsed.directory, default.directory);
        assert_eq!(parsed.host, default.host);
        assert_eq!(parsed.port, default.port);
        assert_eq!(parsed.max_header_bytes, default.max_header_bytes);
        assert_eq!(parsed.max_body_bytes, default.max_body_bytes);
        assert_eq!(parsed.log_level, default.log_level);
    }

    #[test]
    fn test_directory_flag() {
        let config = Config::parse_from(["http_lite_server", "--directory", "/tmp/x/"]);
        assert_eq!(config.directory, "/tmp/x/");
    }

    #[test]
    fn test_port_flag() {
        let config = Config::parse_from(["http_lite_server", "-p", "8080", "--host", "127.0.0.1"]);
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_address() {
        let config = Config::default();
        assert_eq!(config.address(), "0.0.0.0:4221");
    }

    #[test]
    fn test_read_limits() {
        let mut config = Config::default();
        config.max_header_bytes = 1000;
        config.max_body_bytes = 50;

        let limits = config.read_limits();
        assert_eq!(limits.max_header_bytes, 1000);
        assert_eq!(limits.max_body_bytes, 50);
    }

    #[test]
    fn test_validate_success() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default();
        config.host = " ".to_string();
        let result = config.validate();
        assert!(result.unwrap_err().contains("Host"));
    }

    #[test]
    fn test_validate_small_header_limit() {
        let mut config = Config::default();
        config.max_header_bytes = 4;
        let result = config.validate();
        assert!(result.unwrap_err().contains("Max header bytes"));
    }

    #[test]
    fn test_validate_log_level() {
        let mut config = Config::default();
        config.log_level = "debug".to_string();
        assert!(config.validate().is_ok());

        config.log_level = "http_lite_server=loud".to_string();
        assert!(config.validate().unwrap_err().contains("Invalid log level"));
    }
}
