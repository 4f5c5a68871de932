//! # Lectura de Requests desde el socket
//! src/http/reader.rs
//!
//! Lee del stream hasta ver la línea vacía que cierra los headers, sin pasar
//! de un límite de bytes. Si los headers declaran `Content-Length`, sigue
//! leyendo hasta completar el body (también con límite). No hay soporte
//! para chunked transfer encoding.

use super::request::HEADER_TERMINATOR;
use std::io::{self, Read};
use thiserror::Error;

/// Tamaño de cada lectura individual del socket
const CHUNK_SIZE: usize = 1024;

/// Límites aplicados mientras se lee un request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Máximo de bytes para request line + headers
    pub max_header_bytes: usize,

    /// Máximo de bytes aceptados en `Content-Length`
    pub max_body_bytes: usize,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8192,
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Errores de lectura
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),

    #[error("Request headers exceed {limit} bytes")]
    HeadersTooLarge { limit: usize },

    #[error("Declared body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Lee un request completo del stream
///
/// Retorna los bytes crudos listos para `Request::parse`. Un vector vacío
/// significa que el peer cerró sin mandar nada.
///
/// # Ejemplo
/// ```
/// use http_lite_server::http::reader::{read_request, ReadLimits};
///
/// let mut input: &[u8] = b"GET / HTTP/1.1\r\n\r\n";
/// let raw = read_request(&mut input, ReadLimits::default()).unwrap();
/// assert_eq!(raw, b"GET / HTTP/1.1\r\n\r\n");
/// ```
pub fn read_request<R: Read>(reader: &mut R, limits: ReadLimits) -> Result<Vec<u8>, ReadError> {
    let mut buffer = Vec::with_capacity(CHUNK_SIZE);
    let mut chunk = [0u8; CHUNK_SIZE];

    // 1. Headers: leer hasta encontrar \r\n\r\n
    let header_end = loop {
        if let Some(pos) = find_terminator(&buffer) {
            break Some(pos);
        }
        if buffer.len() > limits.max_header_bytes {
            return Err(ReadError::HeadersTooLarge {
                limit: limits.max_header_bytes,
            });
        }

        let n = read_some(reader, &mut chunk)?;
        if n == 0 {
            // EOF antes de la línea vacía: el parser decide con lo que hay
            break None;
        }
        buffer.extend_from_slice(&chunk[..n]);
    };

    let Some(header_end) = header_end else {
        return Ok(buffer);
    };

    if header_end > limits.max_header_bytes {
        return Err(ReadError::HeadersTooLarge {
            limit: limits.max_header_bytes,
        });
    }

    // 2. Body: solo se espera si hay Content-Length
    let body_start = header_end + HEADER_TERMINATOR.len();
    let Some(length) = declared_content_length(&buffer[..header_end]) else {
        return Ok(buffer);
    };

    if length > limits.max_body_bytes {
        return Err(ReadError::BodyTooLarge {
            limit: limits.max_body_bytes,
        });
    }

    let expected = body_start + length;
    while buffer.len() < expected {
        let n = read_some(reader, &mut chunk)?;
        if n == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
    buffer.truncate(expected);

    Ok(buffer)
}

/// Un `read` que reintenta cuando la llamada fue interrumpida
fn read_some<R: Read>(reader: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(chunk) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            other => return other,
        }
    }
}

/// Posición donde empieza `\r\n\r\n`, si ya llegó
fn find_terminator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
}

/// Busca `Content-Length` en la sección de headers
///
/// Acá el nombre se compara sin importar mayúsculas; un valor que no es un
/// número se trata como ausente.
fn declared_content_length(head: &[u8]) -> Option<usize> {
    let head = std::str::from_utf8(head).ok()?;

    head.split("\r\n")
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("Content-Length"))
        .last()
        .and_then(|(_, value)| value.trim().parse().ok())
}
