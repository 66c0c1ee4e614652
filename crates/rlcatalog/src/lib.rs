//! # rlcatalog
//!
//! A model catalog for PPO-style actor-critic architectures.
//!
//! ## Overview
//!
//! rlcatalog provides:
//! - Gymnasium-compatible observation/action space descriptors
//! - Typed model configuration with validated defaults
//! - A `PpoCatalog` that resolves encoder and head dimensions from the spaces
//! - Backend-native module building (`torch` or `candle` feature)
//!
//! The catalog itself never runs tensor operations: it validates the spaces,
//! computes dimensions, assembles the encoder/head configurations, and hands
//! back modules built by the selected backend.
//!
//! ## Features
//!
//! - `candle` (default) - Build modules with the candle backend
//! - `torch` - Build modules with tch/libtorch
//!
//! ## Quick Start
//!
//! ```rust
//! use rlcatalog::prelude::*;
//!
//! // CartPole-like spaces: 4-D observation, 2 discrete actions.
//! let obs_space = DynSpace::Box(BoxSpace::unbounded(&[4]));
//! let action_space = DynSpace::Discrete(Discrete::new(2));
//!
//! let catalog = PpoCatalog::new(obs_space, action_space, ModelConfig::default()).unwrap();
//! assert_eq!(catalog.pi_head_config().output_dim, 2);
//! assert_eq!(catalog.vf_head_config().output_dim, 1);
//! ```

pub mod catalog;
pub mod models;
pub mod spaces;

use crate::models::Framework;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{Catalog, PpoCatalog};
    pub use crate::models::{
        ActionDistKind, Activation, ActorCriticEncoderConfig, Framework, MlpEncoderConfig,
        MlpHeadConfig, ModelConfig,
    };
    pub use crate::models::{ActorCriticEncoder, Distribution, Encoder, Head};
    pub use crate::spaces::{BoxSpace, Discrete, DynSpace, MultiDiscrete, Space};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),

    #[error("Unsupported observation space: {0}")]
    UnsupportedObservationSpace(String),

    #[error("Unsupported action space: {0}")]
    UnsupportedActionSpace(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Framework `{0}` is not compiled into this build")]
    BackendUnavailable(Framework),

    #[cfg(feature = "torch")]
    #[error("Tensor error: {0}")]
    TensorError(#[from] tch::TchError),

    #[cfg(feature = "candle")]
    #[error("Candle error: {0}")]
    CandleError(#[from] candle_core::Error),
}

pub type Result<T> = core::result::Result<T, CatalogError>;
