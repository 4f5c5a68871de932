//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes, un thread por cada una
//! 3. Lee y parsea un request
//! 4. Genera y envía la response, y cierra la conexión

pub mod tcp;

// Re-exportar para facilitar el uso
pub use tcp::Server;
