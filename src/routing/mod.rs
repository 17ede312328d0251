//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → chain.rs (walk layers, highest priority first)
//!     → layer.rs (exact lookup in one PathTable)
//!         hit  → Resolution::Redirect
//!         miss → next layer
//!     → fallback.rs (terminal: literal routes or NotFound)
//!
//! Table construction (at startup):
//!     paths file bytes → record.rs (YAML/JSON) → Vec<Record>
//!     store snapshot / literal records
//!     → table.rs (fold, last write wins)
//!     → frozen into the Chain
//! ```
//!
//! # Design Decisions
//! - Tables compiled at startup, immutable at runtime
//! - Exact, case-sensitive matching only; no prefixes, no wildcards
//! - Deterministic: same path always resolves the same way
//! - First layer with a hit wins

pub mod chain;
pub mod fallback;
pub mod layer;
pub mod record;
pub mod table;

pub use chain::{compose, Chain, ChainBuilder, ChainError, Resolved};
pub use fallback::{default_responder, DefaultResponder};
pub use layer::{Layer, Resolution, Responder, Step};
pub use record::{load_records, parse, Record, RecordFormat};
pub use table::PathTable;
