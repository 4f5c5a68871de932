//! # Módulo HTTP
//!
//! Implementa un subconjunto de HTTP/1.1 desde cero, sin librerías de
//! protocolo:
//!
//! - Lectura acotada del socket hasta el fin de los headers
//! - Parsing de requests
//! - Construcción y serialización de responses
//! - Códigos de estado
//!
//! No hay conexiones persistentes, pipelining ni chunked encoding: un
//! request por conexión.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /user-agent HTTP/1.1\r\n
//! User-Agent: curl/8.0\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Length: 8\r\n
//! Content-Type: text/plain\r\n
//! \r\n
//! curl/8.0
//! ```

pub mod reader;    // Lectura acotada desde el socket
pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
