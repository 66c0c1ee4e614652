//! Model configurations and backend-native modules.
//!
//! Configuration objects (`MlpEncoderConfig`, `ActorCriticEncoderConfig`,
//! `MlpHeadConfig`) are plain data: they carry resolved dimensions and a
//! `build(framework)` method that materializes a module on the selected
//! tensor backend.

mod actor_critic;
mod config;
mod distribution;
mod encoder;
mod head;

pub use actor_critic::{ActorCriticEncoder, ActorCriticEncoderConfig};
pub use config::{Activation, ModelConfig};
pub use distribution::{ActionDistKind, Distribution, DistributionSample};
pub use encoder::{Encoder, MlpEncoderConfig};
pub use head::{Head, MlpHeadConfig};

#[cfg(feature = "candle")]
pub use actor_critic::CandleActorCriticEncoder;
#[cfg(feature = "torch")]
pub use actor_critic::TorchActorCriticEncoder;
#[cfg(feature = "candle")]
pub use encoder::CandleMlpEncoder;
#[cfg(feature = "torch")]
pub use encoder::TorchMlpEncoder;
#[cfg(feature = "candle")]
pub use head::CandleMlpHead;
#[cfg(feature = "torch")]
pub use head::TorchMlpHead;

use std::fmt;

/// Tensor backend selector for the `build_*` methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framework {
    /// tch / libtorch (requires the `torch` feature)
    Torch,
    /// candle (requires the `candle` feature)
    Candle,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Torch => write!(f, "torch"),
            Framework::Candle => write!(f, "candle"),
        }
    }
}
