//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa un parser HTTP/1.1 simplificado desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/7.68.0\r\n
//! \r\n
//! <body opcional>
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path HTTP/1.1` (exactamente tres tokens)
//! 2. **Headers**: Pares `Name: Value` hasta la primera línea vacía
//! 3. **Empty Line**: `\r\n\r\n` separa headers del body
//! 4. **Body**: todo lo que queda del buffer después de la línea vacía

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre la sección de headers y el body
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Método HTTP del request
///
/// Solo sirve para identificar el método; ningún handler cambia de
/// comportamiento según él.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    PATCH,
    OPTIONS,
    /// Cualquier otro token, guardado tal cual
    Other(String),
}

impl Method {
    /// Identifica un método a partir del token de la request line
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "PATCH" => Method::PATCH,
            "OPTIONS" => Method::OPTIONS,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::PATCH => "PATCH",
            Method::OPTIONS => "OPTIONS",
            Method::Other(token) => token,
        }
    }
}

/// Representa un request HTTP parseado
///
/// Es inmutable: una vez parseado, los handlers solo lo leen.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Request-target tal cual llegó (ej: "/echo/abc"), sin separar query
    path: String,

    /// Headers HTTP, con el nombre sensible a mayúsculas
    headers: HashMap<String, String>,

    /// Versión HTTP, se devuelve igual en la response
    version: String,

    /// Body del request (puede ser vacío)
    body: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// Los bytes recibidos no son UTF-8 válido
    #[error("Request is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene exactamente tres tokens no vacíos
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),
}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// # Argumentos
    ///
    /// * `buffer` - Bytes leídos del socket (headers y, si llegó, el body)
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_lite_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let request_str = std::str::from_utf8(buffer).map_err(|_| ParseError::InvalidEncoding)?;

        if request_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Cortar en la primera línea vacía: antes headers, después body
        let (head, body) = match request_str.find("\r\n\r\n") {
            Some(pos) => (&request_str[..pos], &request_str[pos + HEADER_TERMINATOR.len()..]),
            None => (request_str, ""),
        };

        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let (method, path, version) = Self::parse_request_line(request_line)?;
        let headers = Self::parse_headers(lines);

        Ok(Request {
            method,
            path,
            headers,
            version,
            body: body.to_string(),
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separado por espacios simples.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        // Exactamente 3 partes: METHOD PATH VERSION
        if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
            return Err(ParseError::InvalidRequestLine(line.to_string()));
        }

        Ok((
            Method::from_token(parts[0]),
            parts[1].to_string(),
            parts[2].to_string(),
        ))
    }

    /// Parsea los headers
    ///
    /// Se corta en el primer ':'; las líneas sin ':' se ignoran. Si un nombre
    /// se repite, gana la última aparición.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.is_empty() {
                break;
            }

            if let Some((name, value)) = line.split_once(':') {
                headers.insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        headers
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (el nombre es sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &str {
        &self.body
    }
}
