//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea el path del request a un handler.
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Las rutas son una lista ordenada de `(Matcher, Handler)`. Primero se
//! prueban todas las rutas exactas y después las de prefijo, cada grupo en
//! orden de registro; gana la primera que coincide. Si ninguna coincide se
//! retorna 404 sin llamar a ningún handler.

use crate::config::Config;
use crate::handlers;
use crate::http::{Request, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe el Request y la configuración, y retorna una Response
pub type Handler = fn(&Request, &Config) -> Response;

/// Regla para comparar un path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// El path tiene que ser igual
    Exact(&'static str),

    /// El path tiene que empezar con el string
    Prefix(&'static str),
}

impl Matcher {
    /// Verifica si el path coincide con la regla
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Matcher::Exact(pattern) => path == *pattern,
            Matcher::Prefix(prefix) => path.starts_with(prefix),
        }
    }

    fn is_exact(&self) -> bool {
        matches!(self, Matcher::Exact(_))
    }
}

/// Router que mapea paths a handlers
///
/// Se arma una vez antes de aceptar conexiones y después solo se lee.
pub struct Router {
    routes: Vec<(Matcher, Handler)>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Router con las rutas del servidor
    ///
    /// - exacta `/` → root
    /// - exacta `/user-agent` → user-agent
    /// - prefijo `/echo` → echo
    /// - prefijo `/files` → files
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();
        router.register(Matcher::Exact("/"), handlers::root_handler);
        router.register(Matcher::Exact("/user-agent"), handlers::user_agent_handler);
        router.register(Matcher::Prefix("/echo"), handlers::echo_handler);
        router.register(Matcher::Prefix("/files"), handlers::files_handler);
        router
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use http_lite_server::config::Config;
    /// use http_lite_server::http::{Request, Response, StatusCode};
    /// use http_lite_server::router::{Matcher, Router};
    ///
    /// fn hello_handler(req: &Request, _config: &Config) -> Response {
    ///     Response::new(req.version(), StatusCode::Ok).with_text_body("hello")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(Matcher::Exact("/hello"), hello_handler);
    /// ```
    pub fn register(&mut self, matcher: Matcher, handler: Handler) {
        self.routes.push((matcher, handler));
    }

    /// Busca el handler para un path
    ///
    /// Las rutas exactas tienen prioridad sobre las de prefijo.
    pub fn find(&self, path: &str) -> Option<Handler> {
        let exact = self.routes.iter().filter(|(matcher, _)| matcher.is_exact());
        let prefix = self.routes.iter().filter(|(matcher, _)| !matcher.is_exact());

        exact
            .chain(prefix)
            .find(|(matcher, _)| matcher.matches(path))
            .map(|(_, handler)| *handler)
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Si no encuentra un handler para el path, retorna 404 Not Found con
    /// body vacío.
    pub fn route(&self, request: &Request, config: &Config) -> Response {
        match self.find(request.path()) {
            Some(handler) => handler(request, config),
            None => Response::empty(request.version(), StatusCode::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &str, req: &Request) -> Response {
        Response::new(req.version(), StatusCode::Ok).with_text_body(tag)
    }

    fn exact_handler(req: &Request, _config: &Config) -> Response {
        tagged("exact", req)
    }

    fn first_prefix_handler(req: &Request, _config: &Config) -> Response {
        tagged("first", req)
    }

    fn second_prefix_handler(req: &Request, _config: &Config) -> Response {
        tagged("second", req)
    }

    fn get(path: &str) -> Request {
        Request::parse(format!("GET {} HTTP/1.1\r\n\r\n", path).as_bytes()).unwrap()
    }

    #[test]
    fn test_matcher() {
        assert!(Matcher::Exact("/").matches("/"));
        assert!(!Matcher::Exact("/").matches("/x"));
        assert!(Matcher::Prefix("/echo").matches("/echo/abc"));
        assert!(Matcher::Prefix("/echo").matches("/echo"));
        assert!(!Matcher::Prefix("/echo").matches("/ech"));
    }

    #[test]
    fn test_route_not_found() {
        let router = Router::new();
        let response = router.route(&get("/nonexistent"), &Config::default());

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_empty());
        assert_eq!(response.header("Content-Length"), Some("0"));
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn test_exact_wins_over_prefix() {
        let mut router = Router::new();
        // El prefijo se registra primero, igual pierde contra la exacta
        router.register(Matcher::Prefix("/a"), first_prefix_handler);
        router.register(Matcher::Exact("/a/b"), exact_handler);

        let response = router.route(&get("/a/b"), &Config::default());
        assert_eq!(response.body(), b"exact");

        let response = router.route(&get("/a/c"), &Config::default());
        assert_eq!(response.body(), b"first");
    }

    #[test]
    fn test_prefix_registration_order() {
        let mut router = Router::new();
        router.register(Matcher::Prefix("/files"), first_prefix_handler);
        router.register(Matcher::Prefix("/f"), second_prefix_handler);

        assert_eq!(router.route(&get("/files/x"), &Config::default()).body(), b"first");
        assert_eq!(router.route(&get("/foo"), &Config::default()).body(), b"second");
    }

    #[test]
    fn test_default_routes() {
        let router = Router::with_default_routes();
        let config = Config::default();

        assert_eq!(router.route(&get("/"), &config).status(), StatusCode::Ok);
        assert_eq!(router.route(&get("/echo/abc"), &config).body(), b"abc");
        assert_eq!(router.route(&get("/user-agent"), &config).status(), StatusCode::Ok);
        assert_eq!(router.route(&get("/nonexistent"), &config).status(), StatusCode::NotFound);
        // "/" es exacta: no atrapa todo
        assert_eq!(router.route(&get("/index.html"), &config).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_dispatch_is_deterministic() {
        let router = Router::with_default_routes();
        let config = Config::default();
        let request = get("/echo/same");

        let first = router.route(&request, &config).to_bytes();
        let second = router.route(&request, &config).to_bytes();
        assert_eq!(first, second);
    }
}
