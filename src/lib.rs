//! URL shortener: resolves short paths to redirect targets through a chain
//! of ranked lookup layers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::schema::ShortenerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Chain, Record, Resolution};
