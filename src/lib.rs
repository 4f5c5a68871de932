//! # HTTP Lite Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: parsing de requests y
//! serialización de responses a mano, sin librerías de protocolo.
//!
//! ## Arquitectura
//!
//! ```text
//! TcpStream → http::reader → http::Request → router → handler
//!           ← Response::to_bytes ←──────────────────── Response
//! ```
//!
//! - `http`: Lectura, parsing y serialización del protocolo
//! - `router`: Ruteo por path exacto y por prefijo
//! - `handlers`: root, echo, user-agent y archivos
//! - `server`: Listener TCP, un thread por conexión
//! - `config`: Argumentos CLI
//! - `error`: Errores de servidor y de conexión
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_lite_server::config::Config;
//! use http_lite_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al iniciar servidor");
//! server.run().expect("Error en el servidor");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
