//! Fallback routing for paths the bundle cannot satisfy.
//!
//! A fallback route is an ordered list of (pattern, handler) pairs.
//! Handlers are pure functions from request to response; the chain is
//! assembled during setup and immutable while serving.

use std::fmt;
use std::sync::Arc;

use http::{Request, Response};

/// A dynamic request handler consulted only on bundle misses.
pub type FallbackHandler =
    Arc<dyn Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + Send + Sync>;

/// Path pattern for a fallback handler.
///
/// Written either as an exact path (`/health`) or a prefix with a
/// trailing wildcard (`/api/*`). A bare `*` or `/*` matches everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    Exact(String),
    Prefix(String),
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Self {
        if pattern == "*" || pattern == "/*" {
            return Self::Prefix("/".to_string());
        }
        match pattern.strip_suffix('*') {
            Some(prefix) => Self::Prefix(prefix.to_string()),
            None => Self::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(exact) => write!(f, "{exact}"),
            Self::Prefix(prefix) => write!(f, "{prefix}*"),
        }
    }
}

/// Ordered chain of fallback handlers, matched in registration order.
#[derive(Default)]
pub struct FallbackRoute {
    routes: Vec<(RoutePattern, FallbackHandler)>,
}

impl FallbackRoute {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `pattern`. Registration order is match order.
    pub fn route<F>(mut self, pattern: &str, handler: F) -> Self
    where
        F: Fn(&Request<Vec<u8>>) -> Response<Vec<u8>> + Send + Sync + 'static,
    {
        self.routes
            .push((RoutePattern::parse(pattern), Arc::new(handler)));
        self
    }

    /// First handler whose pattern matches `path`, if any.
    pub fn find(&self, path: &str) -> Option<&FallbackHandler> {
        self.routes
            .iter()
            .find(|(pattern, _)| pattern.matches(path))
            .map(|(_, handler)| handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for FallbackRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.routes.iter().map(|(pattern, _)| pattern))
            .finish()
    }
}
