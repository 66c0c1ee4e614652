//! Model catalogs.
//!
//! A catalog resolves network architecture from an observation space, an
//! action space, and a `ModelConfig`, then builds the corresponding modules
//! on a selected backend. Catalogs are immutable after construction and every
//! `build_*` call returns a fresh module instance.

mod ppo;

pub use ppo::PpoCatalog;

use crate::models::{ActionDistKind, Encoder, Framework};
use crate::{CatalogError, Result};

/// Base interface for model catalogs.
///
/// Concrete catalogs override the capabilities they support. The default
/// `build_encoder` reports the operation as unsupported; algorithm catalogs
/// that wrap their encoder (like PPO's actor-critic wrapper) simply leave it
/// unimplemented.
pub trait Catalog {
    /// Width of the latent vector produced by this catalog's encoder stack
    fn latent_dim(&self) -> usize;

    /// The action distribution kind implied by the catalog's action space
    fn action_dist_kind(&self) -> ActionDistKind;

    /// Build a standalone observation encoder.
    fn build_encoder(&self, framework: Framework) -> Result<Encoder> {
        let _ = framework;
        Err(CatalogError::UnsupportedOperation(
            "this catalog does not build a standalone encoder".to_string(),
        ))
    }
}
