//! # Handler de archivos
//! src/handlers/files.rs
//!
//! `/files/{nombre}` devuelve el contenido de `{directory}/{nombre}` como
//! `application/octet-stream`. No hay protección contra `..` en el nombre.

use super::path_remainder;
use crate::config::Config;
use crate::http::response::OCTET_STREAM;
use crate::http::{Request, Response, StatusCode};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Handler para `/files/{nombre}`
///
/// Si el archivo no existe o no se puede leer (ej: es un directorio) la
/// respuesta es 404 con body vacío; nunca es un error fatal.
pub fn files_handler(req: &Request, config: &Config) -> Response {
    let basename = path_remainder(req.path(), "/files");
    if basename.is_empty() {
        return Response::empty(req.version(), StatusCode::NotFound);
    }

    let filepath = Path::new(&config.directory).join(basename);

    // fs::read abre y cierra el archivo en todos los caminos
    match fs::read(&filepath) {
        Ok(content) => {
            Response::new(req.version(), StatusCode::Ok).with_body_bytes(content, OCTET_STREAM)
        }
        Err(e) => {
            debug!(path = %filepath.display(), error = %e, "archivo no disponible");
            Response::empty(req.version(), StatusCode::NotFound)
        }
    }
}
