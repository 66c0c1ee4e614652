//! The catalog used to build models for PPO.

use super::Catalog;
use crate::models::{
    ActionDistKind, ActorCriticEncoder, ActorCriticEncoderConfig, Activation, Framework, Head,
    MlpEncoderConfig, MlpHeadConfig, ModelConfig,
};
use crate::spaces::{DynSpace, Space};
use crate::{CatalogError, Result};

/// The value head always predicts a single scalar per observation.
const VF_OUTPUT_DIM: usize = 1;

/// Catalog for PPO actor-critic models.
///
/// Resolves three sub-configurations from the spaces and the model config:
/// - an actor-critic encoder (optionally shared between the two heads),
/// - a policy head emitting action distribution parameters,
/// - a value head emitting a scalar value estimate.
///
/// Only 1-D `Box` observation spaces and `Discrete`/1-D `Box` action spaces
/// are supported. The policy head width is the number of discrete actions,
/// or twice the continuous action dimensionality (mean and log-std per
/// dimension); the downstream distribution code relies on that layout.
#[derive(Debug)]
pub struct PpoCatalog {
    observation_space: DynSpace,
    action_space: DynSpace,
    model_config: ModelConfig,
    action_dist_kind: ActionDistKind,
    actor_critic_encoder_config: ActorCriticEncoderConfig,
    pi_head_config: MlpHeadConfig,
    vf_head_config: MlpHeadConfig,
}

impl PpoCatalog {
    /// Resolve a PPO model architecture from the given spaces and config.
    ///
    /// Fails if the config requests `free_log_std`, if the observation space
    /// is not a 1-D `Box`, or if the action space is neither `Discrete` nor
    /// a 1-D `Box`.
    pub fn new(
        observation_space: DynSpace,
        action_space: DynSpace,
        model_config: ModelConfig,
    ) -> Result<Self> {
        if model_config.free_log_std {
            return Err(CatalogError::UnsupportedFeature(
                "free_log_std is not supported by the PPO catalog".to_string(),
            ));
        }

        let encoder_input_dim = match &observation_space {
            DynSpace::Box(b) if b.ndim() == 1 => b.shape()[0],
            DynSpace::Box(b) => {
                return Err(CatalogError::UnsupportedObservationSpace(format!(
                    "PPO models only support 1-D Box observation spaces, got rank {}",
                    b.ndim()
                )))
            }
            other => {
                return Err(CatalogError::UnsupportedObservationSpace(format!(
                    "PPO models only support Box observation spaces, got {}",
                    other.kind()
                )))
            }
        };

        let action_dist_kind = ActionDistKind::for_action_space(&action_space)?;
        let pi_output_dim = action_dist_kind.pi_output_dim();

        let base_encoder_config = MlpEncoderConfig {
            input_dim: encoder_input_dim,
            hidden_layer_dims: model_config.fcnet_hiddens.clone(),
            hidden_layer_activation: model_config.fcnet_activation,
        };
        let latent_dim = base_encoder_config.output_dim();

        let actor_critic_encoder_config = ActorCriticEncoderConfig {
            base_encoder_config,
            shared: model_config.vf_share_layers,
        };

        let pi_head_config = MlpHeadConfig {
            input_dim: latent_dim,
            hidden_layer_dims: model_config.post_fcnet_hiddens.clone(),
            hidden_layer_activation: model_config.post_fcnet_activation,
            output_activation: Activation::Linear,
            output_dim: pi_output_dim,
        };

        let vf_head_config = MlpHeadConfig {
            input_dim: latent_dim,
            hidden_layer_dims: model_config.post_fcnet_hiddens.clone(),
            hidden_layer_activation: model_config.post_fcnet_activation,
            output_activation: Activation::Linear,
            output_dim: VF_OUTPUT_DIM,
        };

        tracing::debug!(
            encoder_input_dim,
            latent_dim,
            pi_output_dim,
            shared = model_config.vf_share_layers,
            "resolved PPO model architecture"
        );

        Ok(Self {
            observation_space,
            action_space,
            model_config,
            action_dist_kind,
            actor_critic_encoder_config,
            pi_head_config,
            vf_head_config,
        })
    }

    /// Build the actor-critic encoder on the selected backend
    pub fn build_actor_critic_encoder(&self, framework: Framework) -> Result<ActorCriticEncoder> {
        self.actor_critic_encoder_config.build(framework)
    }

    /// Build the policy head on the selected backend
    pub fn build_pi_head(&self, framework: Framework) -> Result<Head> {
        self.pi_head_config.build(framework)
    }

    /// Build the value function head on the selected backend
    pub fn build_vf_head(&self, framework: Framework) -> Result<Head> {
        self.vf_head_config.build(framework)
    }

    pub fn observation_space(&self) -> &DynSpace {
        &self.observation_space
    }

    pub fn action_space(&self) -> &DynSpace {
        &self.action_space
    }

    pub fn model_config(&self) -> &ModelConfig {
        &self.model_config
    }

    pub fn actor_critic_encoder_config(&self) -> &ActorCriticEncoderConfig {
        &self.actor_critic_encoder_config
    }

    pub fn pi_head_config(&self) -> &MlpHeadConfig {
        &self.pi_head_config
    }

    pub fn vf_head_config(&self) -> &MlpHeadConfig {
        &self.vf_head_config
    }
}

impl Catalog for PpoCatalog {
    fn latent_dim(&self) -> usize {
        self.actor_critic_encoder_config.output_dim()
    }

    fn action_dist_kind(&self) -> ActionDistKind {
        self.action_dist_kind
    }

    // build_encoder is deliberately not implemented: PPO models consume the
    // actor-critic wrapper, never a bare encoder.
}
