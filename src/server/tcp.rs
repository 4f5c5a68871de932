//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor TCP que maneja múltiples conexiones simultáneas usando threads.
//! Cada conexión se procesa en su propio thread: se lee un request, se
//! responde una vez y se cierra.
//!
//! Un error en una conexión solo afecta a esa conexión; el listener sigue
//! aceptando. El proceso termina únicamente si falla el bind.

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::http::reader::{read_request, ReadError};
use crate::http::response::DEFAULT_VERSION;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;
use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Tiempo máximo sin datos al descartar input antes de cerrar
const DRAIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Margen sobre los límites de lectura al descartar input
const DRAIN_LIMIT_EXTRA: usize = 64 * 1024;

/// Servidor HTTP concurrente, un thread por conexión
pub struct Server {
    config: Arc<Config>,
    router: Arc<Router>,
    listener: TcpListener,
}

impl Server {
    /// Abre el listener en `config.address()` con las rutas por defecto
    pub fn bind(config: Config) -> Result<Self> {
        Self::with_router(config, Router::with_default_routes())
    }

    /// Abre el listener usando un router propio
    pub fn with_router(config: Config, router: Router) -> Result<Self> {
        let addr = config.address();
        let listener =
            TcpListener::bind(&addr).map_err(|source| ServerError::Bind { addr, source })?;

        Ok(Self {
            config: Arc::new(config),
            router: Arc::new(router),
            listener,
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Acepta conexiones para siempre
    ///
    /// Un error al aceptar se registra y se sigue con la siguiente conexión.
    pub fn run(&self) -> Result<()> {
        info!(address = %self.local_addr()?, "servidor escuchando, un thread por conexión");

        let mut next_id: u64 = 1;
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    let connection_id = next_id;
                    next_id += 1;

                    let router = Arc::clone(&self.router);
                    let config = Arc::clone(&self.config);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    debug!(connection_id, peer = %peer_addr, "nueva conexión");

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, &router, &config) {
                            error!(
                                connection_id,
                                peer = %peer_addr,
                                error = %e,
                                "error en la conexión"
                            );
                        }
                        // El stream ya se cerró al salir de handle_connection
                    });
                }
                Err(e) => {
                    error!(error = %e, "error al aceptar conexión");
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión: lee, despacha, escribe y cierra
    ///
    /// El stream se consume, así que se cierra en todos los caminos de salida.
    pub fn handle_connection(
        mut stream: TcpStream,
        router: &Router,
        config: &Config,
    ) -> Result<()> {
        let start = Instant::now();

        let raw = match read_request(&mut stream, config.read_limits()) {
            Ok(raw) => raw,
            Err(e @ ReadError::HeadersTooLarge { .. }) => {
                warn!(error = %e, "request rechazado");
                let status = StatusCode::RequestHeaderFieldsTooLarge;
                return Self::finish(stream, &Response::empty(DEFAULT_VERSION, status), config);
            }
            Err(e @ ReadError::BodyTooLarge { .. }) => {
                warn!(error = %e, "request rechazado");
                let status = StatusCode::PayloadTooLarge;
                return Self::finish(stream, &Response::empty(DEFAULT_VERSION, status), config);
            }
            Err(e) => return Err(e.into()),
        };

        if raw.is_empty() {
            debug!("conexión cerrada sin datos");
            return Ok(());
        }

        let response = match Request::parse(&raw) {
            Ok(request) => {
                let response = router.route(&request, config);
                info!(
                    method = request.method().as_str(),
                    path = request.path(),
                    headers = request.headers().len(),
                    body_bytes = request.body().len(),
                    status = response.status().as_u16(),
                    latency_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "request atendido"
                );
                response
            }
            Err(e) => {
                warn!(error = %e, "parse error");
                Response::empty(DEFAULT_VERSION, StatusCode::BadRequest)
            }
        };

        Self::finish(stream, &response, config)
    }

    /// Escribe la response y cierra la conexión sin RST
    ///
    /// Después de `shutdown(Write)` se descarta lo que el cliente siga
    /// mandando (hasta los límites de lectura más `DRAIN_LIMIT_EXTRA`, o
    /// `DRAIN_TIMEOUT` sin datos). No puede quedar input sin leer al cerrar.
    fn finish(mut stream: TcpStream, response: &Response, config: &Config) -> Result<()> {
        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        // El peer puede haber cerrado ya; no es un error de la conexión
        if let Err(e) = stream.shutdown(Shutdown::Write) {
            debug!(error = %e, "shutdown después de responder");
            return Ok(());
        }

        let limit = config.max_header_bytes + config.max_body_bytes + DRAIN_LIMIT_EXTRA;
        let drained = Self::drain(&mut stream, limit);
        if drained > 0 {
            debug!(bytes = drained, "input descartado antes de cerrar");
        }

        Ok(())
    }

    /// Lee y descarta input hasta EOF, timeout, error o `limit` bytes
    fn drain(stream: &mut TcpStream, limit: usize) -> usize {
        if stream.set_read_timeout(Some(DRAIN_TIMEOUT)).is_err() {
            return 0;
        }

        let mut chunk = [0u8; 4096];
        let mut drained = 0;
        while drained < limit {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => drained += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        drained
    }
}

#[cfg(test)]
mod server_tests {
    use super::*;

    fn ephemeral_listener() -> TcpListener {
        TcpListener::bind("127.0.0.1:0").expect("bind")
    }

    /// Levanta un thread que atiende una sola conexión y retorna lo que recibe el cliente
    fn exchange(config: Config, payload: &'static [u8]) -> String {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let router = Router::with_default_routes();
            Server::handle_connection(stream, &router, &config).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        client.write_all(payload).unwrap();

        let mut buf = Vec::new();
        client.read_to_end(&mut buf).unwrap();
        t.join().unwrap();

        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn test_handle_connection_root_ok() {
        // Sin shutdown del cliente: el servidor deja de leer en la línea vacía
        let text = exchange(Config::default(), b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");

        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nContent-Type: text/plain\r\n\r\n"
        );
    }

    #[test]
    fn test_handle_connection_echo() {
        let text = exchange(Config::default(), b"GET /echo/abc HTTP/1.1\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("\r\n\r\nabc"));
    }

    #[test]
    fn test_handle_connection_parse_error() {
        let text = exchange(Config::default(), b"GARBAGE\r\n\r\n");

        assert_eq!(
            text,
            "HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nContent-Type: text/plain\r\n\r\n"
        );
    }

    #[test]
    fn test_handle_connection_invalid_utf8() {
        let text = exchange(Config::default(), b"\x00\x01\x02\xff garbage\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
    }

    #[test]
    fn test_handle_connection_headers_too_large() {
        let config = Config {
            max_header_bytes: 32,
            ..Config::default()
        };
        let payload = b"GET / HTTP/1.1\r\nX-Long: aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa\r\n";
        let text = exchange(config, payload);

        assert!(text.starts_with("HTTP/1.1 431 Request Header Fields Too Large\r\n"));
    }

    #[test]
    fn test_handle_connection_body_too_large() {
        let config = Config {
            max_body_bytes: 4,
            ..Config::default()
        };
        let text = exchange(config, b"POST /echo/x HTTP/1.1\r\nContent-Length: 100\r\n\r\n");

        assert!(text.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
    }

    /// El cliente escribe `payload` desde otro thread mientras lee la response
    fn exchange_flood(config: Config, payload: Vec<u8>) -> std::io::Result<String> {
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let router = Router::with_default_routes();
            Server::handle_connection(stream, &router, &config).unwrap();
        });

        let mut client = TcpStream::connect(addr).unwrap();
        let mut writer = client.try_clone().unwrap();
        let w = thread::spawn(move || {
            let _ = writer.write_all(&payload);
        });

        let mut buf = Vec::new();
        let result = client.read_to_end(&mut buf);
        w.join().unwrap();
        t.join().unwrap();

        result.map(|_| String::from_utf8_lossy(&buf).into_owned())
    }

    #[test]
    fn test_huge_headers_get_431_without_reset() {
        let mut payload = b"GET / HTTP/1.1\r\n".to_vec();
        for i in 0..4000 {
            payload.extend_from_slice(format!("X-Filler-{}: {}\r\n", i, "a".repeat(40)).as_bytes());
        }
        assert!(payload.len() > 200 * 1024);

        let text = exchange_flood(Config::default(), payload).expect("response without reset");

        assert!(text.starts_with("HTTP/1.1 431 Request Header Fields Too Large\r\n"));
    }

    #[test]
    fn test_oversized_body_gets_413_without_reset() {
        let mut payload = b"POST /echo/x HTTP/1.1\r\nContent-Length: 5000000\r\n\r\n".to_vec();
        payload.extend(std::iter::repeat(b'b').take(500 * 1024));

        let text = exchange_flood(Config::default(), payload).expect("response without reset");

        assert!(text.starts_with("HTTP/1.1 413 Payload Too Large\r\n"));
    }

    #[test]
    fn test_extra_bytes_after_declared_body_are_discarded() {
        let mut payload = b"POST /echo/x HTTP/1.1\r\nContent-Length: 2\r\n\r\nok".to_vec();
        payload.extend(std::iter::repeat(b'z').take(64 * 1024));

        let text = exchange_flood(Config::default(), payload).expect("response without reset");

        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.ends_with("\r\n\r\nx"));
    }

    #[test]
    fn test_handle_connection_peer_closed_immediately() {
        // Cubre la rama de request vacío
        let listener = ephemeral_listener();
        let addr = listener.local_addr().unwrap();

        let t = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let router = Router::with_default_routes();
            Server::handle_connection(stream, &router, &Config::default()).unwrap();
        });

        drop(TcpStream::connect(addr).unwrap());

        t.join().unwrap();
    }

    #[test]
    fn test_bind_failure_is_reported() {
        let taken = ephemeral_listener();
        let port = taken.local_addr().unwrap().port();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port,
            ..Config::default()
        };

        let result = Server::bind(config);
        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
