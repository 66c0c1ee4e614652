//! Actor-critic encoder configuration and modules.
//!
//! The actor-critic encoder wraps a base observation encoder and produces a
//! latent vector for the policy head and one for the value head. When
//! `shared` is set, both come from the same encoder; otherwise two
//! independently initialized copies are built, one per head.

use serde::{Deserialize, Serialize};

use super::{Framework, MlpEncoderConfig};
use crate::Result;

#[cfg(feature = "candle")]
use super::CandleMlpEncoder;
#[cfg(feature = "torch")]
use super::TorchMlpEncoder;

#[cfg(feature = "candle")]
use candle_core::Tensor as CandleTensor;
#[cfg(feature = "torch")]
use tch::Tensor;

/// Configuration for the actor-critic encoder wrapper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorCriticEncoderConfig {
    /// The observation encoder to wrap
    pub base_encoder_config: MlpEncoderConfig,
    /// Whether the policy and value heads consume the same encoder output
    pub shared: bool,
}

impl ActorCriticEncoderConfig {
    /// Latent width produced for each head
    pub fn output_dim(&self) -> usize {
        self.base_encoder_config.output_dim()
    }

    /// Materialize the actor-critic encoder on the selected backend.
    ///
    /// The shared/separate branching happens here: a non-shared config builds
    /// two independent encoder copies.
    pub fn build(&self, framework: Framework) -> Result<ActorCriticEncoder> {
        match framework {
            #[cfg(feature = "torch")]
            Framework::Torch => Ok(ActorCriticEncoder::Torch(TorchActorCriticEncoder::new(
                self,
            ))),
            #[cfg(feature = "candle")]
            Framework::Candle => Ok(ActorCriticEncoder::Candle(CandleActorCriticEncoder::new(
                self,
            )?)),
            #[allow(unreachable_patterns)]
            unavailable => Err(crate::CatalogError::BackendUnavailable(unavailable)),
        }
    }
}

/// A built actor-critic encoder on one of the compiled-in backends
pub enum ActorCriticEncoder {
    #[cfg(feature = "torch")]
    Torch(TorchActorCriticEncoder),
    #[cfg(feature = "candle")]
    Candle(CandleActorCriticEncoder),
}

impl ActorCriticEncoder {
    /// Whether both heads consume the same encoder output
    pub fn shared(&self) -> bool {
        match self {
            #[cfg(feature = "torch")]
            ActorCriticEncoder::Torch(e) => e.shared(),
            #[cfg(feature = "candle")]
            ActorCriticEncoder::Candle(e) => e.shared(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("no tensor backend compiled in"),
        }
    }

    /// Latent width produced for each head
    pub fn output_dim(&self) -> usize {
        match self {
            #[cfg(feature = "torch")]
            ActorCriticEncoder::Torch(e) => e.output_dim(),
            #[cfg(feature = "candle")]
            ActorCriticEncoder::Candle(e) => e.output_dim(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("no tensor backend compiled in"),
        }
    }

    #[cfg(feature = "torch")]
    pub fn as_torch(&self) -> &TorchActorCriticEncoder {
        match self {
            ActorCriticEncoder::Torch(e) => e,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a torch actor-critic encoder"),
        }
    }

    #[cfg(feature = "candle")]
    pub fn as_candle(&self) -> &CandleActorCriticEncoder {
        match self {
            ActorCriticEncoder::Candle(e) => e,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a candle actor-critic encoder"),
        }
    }
}

/// Actor-critic encoder on the tch backend
#[cfg(feature = "torch")]
pub struct TorchActorCriticEncoder {
    actor: TorchMlpEncoder,
    /// Present only when the encoder is not shared
    critic: Option<TorchMlpEncoder>,
}

#[cfg(feature = "torch")]
impl TorchActorCriticEncoder {
    pub fn new(config: &ActorCriticEncoderConfig) -> Self {
        let actor = TorchMlpEncoder::new(&config.base_encoder_config);
        let critic = if config.shared {
            None
        } else {
            Some(TorchMlpEncoder::new(&config.base_encoder_config))
        };
        Self { actor, critic }
    }

    pub fn shared(&self) -> bool {
        self.critic.is_none()
    }

    pub fn output_dim(&self) -> usize {
        self.actor.output_dim()
    }

    /// Encode observations, returning (actor latent, critic latent)
    pub fn forward(&self, obs: &Tensor) -> (Tensor, Tensor) {
        let actor_latent = self.actor.forward(obs);
        let critic_latent = match &self.critic {
            Some(encoder) => encoder.forward(obs),
            None => actor_latent.shallow_clone(),
        };
        (actor_latent, critic_latent)
    }
}

/// Actor-critic encoder on the candle backend
#[cfg(feature = "candle")]
pub struct CandleActorCriticEncoder {
    actor: CandleMlpEncoder,
    /// Present only when the encoder is not shared
    critic: Option<CandleMlpEncoder>,
}

#[cfg(feature = "candle")]
impl CandleActorCriticEncoder {
    pub fn new(config: &ActorCriticEncoderConfig) -> Result<Self> {
        let actor = CandleMlpEncoder::new(&config.base_encoder_config)?;
        let critic = if config.shared {
            None
        } else {
            Some(CandleMlpEncoder::new(&config.base_encoder_config)?)
        };
        Ok(Self { actor, critic })
    }

    pub fn shared(&self) -> bool {
        self.critic.is_none()
    }

    pub fn output_dim(&self) -> usize {
        self.actor.output_dim()
    }

    /// Encode observations, returning (actor latent, critic latent)
    pub fn forward(&self, obs: &CandleTensor) -> candle_core::Result<(CandleTensor, CandleTensor)> {
        let actor_latent = self.actor.forward(obs)?;
        let critic_latent = match &self.critic {
            Some(encoder) => encoder.forward(obs)?,
            None => actor_latent.clone(),
        };
        Ok((actor_latent, critic_latent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activation;

    fn base_config() -> MlpEncoderConfig {
        MlpEncoderConfig {
            input_dim: 4,
            hidden_layer_dims: vec![16],
            hidden_layer_activation: Activation::Tanh,
        }
    }

    #[test]
    fn test_output_dim_delegates_to_base() {
        let config = ActorCriticEncoderConfig {
            base_encoder_config: base_config(),
            shared: true,
        };
        assert_eq!(config.output_dim(), 16);
    }

    #[cfg(feature = "candle")]
    #[test]
    fn test_candle_shared_latents_match() {
        use candle_core::{DType, Device};

        let config = ActorCriticEncoderConfig {
            base_encoder_config: base_config(),
            shared: true,
        };
        let ac = config.build(Framework::Candle).unwrap();
        assert!(ac.shared());

        let obs = CandleTensor::ones((2, 4), DType::F32, &Device::Cpu).unwrap();
        let (actor, critic) = ac.as_candle().forward(&obs).unwrap();
        let diff: f32 = (&actor - &critic)
            .unwrap()
            .abs()
            .unwrap()
            .sum_all()
            .unwrap()
            .to_scalar()
            .unwrap();
        assert_eq!(diff, 0.0);
    }

    #[cfg(feature = "candle")]
    #[test]
    fn test_candle_separate_latents_differ() {
        use candle_core::{DType, Device};

        let config = ActorCriticEncoderConfig {
            base_encoder_config: base_config(),
            shared: false,
        };
        let ac = config.build(Framework::Candle).unwrap();
        assert!(!ac.shared());

        let obs = CandleTensor::ones((2, 4), DType::F32, &Device::Cpu).unwrap();
        let (actor, critic) = ac.as_candle().forward(&obs).unwrap();
        assert_eq!(actor.dims(), &[2, 16]);
        assert_eq!(critic.dims(), &[2, 16]);
        let diff: f32 = (&actor - &critic)
            .unwrap()
            .abs()
            .unwrap()
            .sum_all()
            .unwrap()
            .to_scalar()
            .unwrap();
        assert!(diff > 0.0, "separate encoders should have independent weights");
    }
}
