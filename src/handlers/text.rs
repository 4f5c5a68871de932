//! # Handlers de texto
//! src/handlers/text.rs
//!
//! Respuestas `text/plain` armadas a partir del request.

use super::path_remainder;
use crate::config::Config;
use crate::http::{Request, Response, StatusCode};

/// Handler para `/`
///
/// 200 OK con body vacío.
pub fn root_handler(req: &Request, _config: &Config) -> Response {
    Response::empty(req.version(), StatusCode::Ok)
}

/// Handler para `/echo/{texto}`
///
/// Devuelve en el body lo que sigue a `/echo/` en el path, sin decodificar.
///
/// # Ejemplo
/// ```
/// use http_lite_server::config::Config;
/// use http_lite_server::handlers::echo_handler;
/// use http_lite_server::http::Request;
///
/// let req = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
/// let res = echo_handler(&req, &Config::default());
/// assert_eq!(res.body(), b"abc");
/// ```
pub fn echo_handler(req: &Request, _config: &Config) -> Response {
    let body = path_remainder(req.path(), "/echo");

    Response::new(req.version(), StatusCode::Ok).with_text_body(body)
}

/// Handler para `/user-agent`
///
/// Devuelve el header `User-Agent` (vacío si no vino).
pub fn user_agent_handler(req: &Request, _config: &Config) -> Response {
    let body = req.header("User-Agent").unwrap_or_default();

    Response::new(req.version(), StatusCode::Ok).with_text_body(body)
}
