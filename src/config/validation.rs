//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Reject empty source locations
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShortenerConfig → Result<(), Vec<ValidationError>>
//! - Mapping contents are never inspected (URLs are opaque)

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ShortenerConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("sources.{0} must not be empty")]
    EmptySource(&'static str),
}

pub fn validate_config(config: &ShortenerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let sources = &config.sources;
    for (name, value) in [
        ("paths_file", &sources.paths_file),
        ("store_path", &sources.store_path),
        ("bucket", &sources.bucket),
    ] {
        if value.is_empty() {
            errors.push(ValidationError::EmptySource(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(validate_config(&ShortenerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = ShortenerConfig::default();
        config.listener.bind_address = "localhost".into();
        config.sources.bucket.clear();
        config.sources.store_path.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::EmptySource("store_path"),
                ValidationError::EmptySource("bucket"),
            ]
        );
    }
}
