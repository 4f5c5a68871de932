//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes para
//! enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 3\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! abc
//! ```
//!
//! `to_bytes` no calcula `Content-Length` ni `Content-Type`: eso lo hace cada
//! handler, normalmente con `with_text_body` o `with_body_bytes`.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_lite_server::http::{Response, StatusCode};
//!
//! let response = Response::new("HTTP/1.1", StatusCode::Ok)
//!     .with_text_body("Hello");
//!
//! let bytes = response.to_bytes();
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use super::StatusCode;
use std::collections::BTreeMap;

/// Versión usada cuando no hay un request del cual copiarla
pub const DEFAULT_VERSION: &str = "HTTP/1.1";

/// Content-Type de las respuestas de texto
pub const TEXT_PLAIN: &str = "text/plain";

/// Content-Type de los archivos servidos
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Versión HTTP de la status line
    version: String,

    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers HTTP. BTreeMap: un valor por nombre y orden estable al serializar
    headers: BTreeMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(version: &str, status: StatusCode) -> Self {
        Self {
            version: version.to_string(),
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    /// Respuesta de texto con body vacío
    ///
    /// Incluye `Content-Type: text/plain` y `Content-Length: 0`. Es la forma
    /// de todas las respuestas de error del servidor.
    ///
    /// # Ejemplo
    /// ```
    /// use http_lite_server::http::{Response, StatusCode};
    ///
    /// let response = Response::empty("HTTP/1.1", StatusCode::NotFound);
    /// assert_eq!(response.header("Content-Length"), Some("0"));
    /// ```
    pub fn empty(version: &str, status: StatusCode) -> Self {
        Self::new(version, status).with_text_body("")
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece un body de texto plano
    ///
    /// Agrega `Content-Type: text/plain` y el `Content-Length` en bytes.
    pub fn with_text_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec(), TEXT_PLAIN)
    }

    /// Establece el cuerpo desde bytes con el Content-Type indicado
    ///
    /// # Ejemplo
    /// ```
    /// use http_lite_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new("HTTP/1.1", StatusCode::Ok)
    ///     .with_body_bytes(vec![0x00, 0xFF], "application/octet-stream");
    /// assert_eq!(response.header("Content-Length"), Some("2"));
    /// ```
    pub fn with_body_bytes(mut self, body: Vec<u8>, content_type: &str) -> Self {
        self.body = body;
        self.add_header("Content-Type", content_type);
        self.add_header("Content-Length", &self.body.len().to_string());
        self
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: tal cual, sin `\r\n` final
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(64 + self.body.len());

        // 1. Status line
        let status_line = format!("{} {}\r\n", self.version, self.status);
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        // 4. Body (si existe)
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene la versión HTTP de la respuesta
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
