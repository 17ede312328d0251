//! Terminal responder.

use std::collections::HashMap;

use crate::routing::layer::{Resolution, Responder};

/// Greeting served at `/` when no layer maps it.
pub const GREETING: &str = "Hello, world!\n";

/// Answers a fixed set of literal routes; everything else is not found.
#[derive(Debug, Clone, Default)]
pub struct DefaultResponder {
    routes: HashMap<String, String>,
}

impl DefaultResponder {
    /// A responder with no routes of its own.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a literal route.
    pub fn route(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes.insert(path.into(), body.into());
        self
    }
}

impl Responder for DefaultResponder {
    fn respond(&self, path: &str) -> Resolution {
        match self.routes.get(path) {
            Some(body) => Resolution::Content(body.clone()),
            None => Resolution::NotFound,
        }
    }
}

/// The stock terminal: greets at `/`.
pub fn default_responder() -> DefaultResponder {
    DefaultResponder::empty().route("/", GREETING)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        let responder = default_responder();
        assert_eq!(responder.respond("/"), Resolution::Content(GREETING.into()));
    }

    #[test]
    fn test_not_found() {
        let responder = default_responder();
        assert_eq!(responder.respond("/nope"), Resolution::NotFound);
        assert_eq!(DefaultResponder::empty().respond("/"), Resolution::NotFound);
    }
}
