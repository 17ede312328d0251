//! Resolution layers.
//!
//! # Responsibilities
//! - Probe one table with a single exact-match lookup
//! - Turn a hit into a see-other redirect
//! - Report a miss so the caller can delegate to the next responder
//!
//! # Design Decisions
//! - A layer never logs, retries or rewrites the path
//! - An empty table is legal and always delegates

use crate::routing::table::PathTable;

/// What the chain tells the HTTP boundary to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// 303 See Other to `location`.
    Redirect { location: String },
    /// A literal body answered by the terminal responder.
    Content(String),
    /// Nothing in the chain knows this path.
    NotFound,
}

impl Resolution {
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
        }
    }
}

/// Something that answers a path without delegating further.
pub trait Responder: Send + Sync + std::fmt::Debug {
    fn respond(&self, path: &str) -> Resolution;
}

/// Outcome of probing a single layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Resolved(Resolution),
    /// Hand the unchanged path to the fallback.
    Delegate,
}

/// A named lookup table in the chain.
#[derive(Debug, Clone)]
pub struct Layer {
    name: String,
    table: PathTable,
}

impl Layer {
    pub fn new(name: impl Into<String>, table: PathTable) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &PathTable {
        &self.table
    }

    pub fn resolve(&self, path: &str) -> Step {
        match self.table.get(path) {
            Some(url) => Step::Resolved(Resolution::redirect(url)),
            None => Step::Delegate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Record;

    #[test]
    fn test_hit_redirects() {
        let layer = Layer::new(
            "file",
            PathTable::from_records(vec![Record::new("/go", "https://go.dev")]),
        );

        assert_eq!(
            layer.resolve("/go"),
            Step::Resolved(Resolution::redirect("https://go.dev"))
        );
    }

    #[test]
    fn test_miss_delegates() {
        let layer = Layer::new("file", PathTable::new());
        assert_eq!(layer.resolve("/go"), Step::Delegate);
        assert_eq!(layer.resolve("/"), Step::Delegate);
    }
}
