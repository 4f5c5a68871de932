//! # Errores del Servidor
//! src/error.rs
//!
//! Errores a nivel de servidor y de conexión. Los errores de un handler
//! (ej: archivo inexistente) no llegan acá: se convierten en una response.

use crate::http::reader::ReadError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo abrir el listener; el proceso termina
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Error de I/O en una conexión (escritura, peer_addr, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error leyendo el request de una conexión
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ServerError>;
