//! Chain composition and resolution.
//!
//! # Design Decisions
//! - Priority order is the insertion order of `ChainBuilder::layer`
//! - Each layer delegates to the one after it; the last delegates to the
//!   terminal responder
//! - Frozen after `build()`: no reordering, no table mutation

use thiserror::Error;

use crate::routing::fallback::DefaultResponder;
use crate::routing::layer::{Layer, Resolution, Responder, Step};
use crate::routing::table::PathTable;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("a chain needs at least one layer or a terminal responder")]
    EmptyChain,

    #[error("layer {0:?} appears more than once")]
    DuplicateLayer(String),
}

/// Resolution result annotated with who answered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Name of the answering layer, `None` for the terminal responder.
    pub layer: Option<&'a str>,
    pub resolution: Resolution,
}

/// The composed, immutable resolution chain.
#[derive(Debug)]
pub struct Chain {
    layers: Vec<Layer>,
    terminal: Box<dyn Responder>,
}

impl Chain {
    pub fn builder() -> ChainBuilder {
        ChainBuilder::default()
    }

    /// Layer names, highest priority first.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(Layer::name).collect()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Walk the chain from the highest-priority layer.
    pub fn resolve(&self, path: &str) -> Resolved<'_> {
        for layer in &self.layers {
            if let Step::Resolved(resolution) = layer.resolve(path) {
                return Resolved {
                    layer: Some(layer.name()),
                    resolution,
                };
            }
        }

        Resolved {
            layer: None,
            resolution: self.terminal.respond(path),
        }
    }
}

impl Responder for Chain {
    fn respond(&self, path: &str) -> Resolution {
        self.resolve(path).resolution
    }
}

/// Collects layers in priority order, then freezes them into a `Chain`.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    layers: Vec<Layer>,
    terminal: Option<Box<dyn Responder>>,
}

impl ChainBuilder {
    /// Append a layer below every layer added so far.
    pub fn layer(mut self, name: impl Into<String>, table: PathTable) -> Self {
        self.layers.push(Layer::new(name, table));
        self
    }

    pub fn terminal(mut self, responder: impl Responder + 'static) -> Self {
        self.terminal = Some(Box::new(responder));
        self
    }

    pub fn build(self) -> Result<Chain, ChainError> {
        if self.layers.is_empty() && self.terminal.is_none() {
            return Err(ChainError::EmptyChain);
        }

        for (i, layer) in self.layers.iter().enumerate() {
            if self.layers[..i].iter().any(|l| l.name() == layer.name()) {
                return Err(ChainError::DuplicateLayer(layer.name().to_string()));
            }
        }

        let terminal = self
            .terminal
            .unwrap_or_else(|| Box::new(DefaultResponder::empty()));

        Ok(Chain {
            layers: self.layers,
            terminal,
        })
    }
}

/// Compose `(name, table)` pairs, highest priority first, over `terminal`.
pub fn compose<I, S>(layers: I, terminal: impl Responder + 'static) -> Result<Chain, ChainError>
where
    I: IntoIterator<Item = (S, PathTable)>,
    S: Into<String>,
{
    layers
        .into_iter()
        .fold(Chain::builder(), |builder, (name, table)| builder.layer(name, table))
        .terminal(terminal)
        .build()
}
