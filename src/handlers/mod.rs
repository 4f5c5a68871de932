//! # Handlers
//!
//! Cada handler recibe el request y la configuración, y siempre retorna una
//! Response válida: ningún camino produce un error ni un panic.
//!
//! - **text**: `/` (root), `/echo/...` y `/user-agent`
//! - **files**: `/files/...`, sirve archivos desde `--directory`

pub mod files;
pub mod text;

pub use files::files_handler;
pub use text::{echo_handler, root_handler, user_agent_handler};

/// Lo que queda del path después de un prefijo de ruta
///
/// Se quita `"{prefix}/"` si está; si no, solo `prefix`. Un path que no
/// empieza con el prefijo se devuelve entero.
///
/// No hace falta la barra después del prefijo: `/echoabc` da `"abc"` (y no
/// el path entero) y `/filesfoo` busca `foo`.
///
/// ```
/// use http_lite_server::handlers::path_remainder;
///
/// assert_eq!(path_remainder("/echo/abc", "/echo"), "abc");
/// assert_eq!(path_remainder("/echo", "/echo"), "");
/// ```
pub fn path_remainder<'a>(path: &'a str, prefix: &str) -> &'a str {
    let Some(rest) = path.strip_prefix(prefix) else {
        return path;
    };
    rest.strip_prefix('/').unwrap_or(rest)
}
