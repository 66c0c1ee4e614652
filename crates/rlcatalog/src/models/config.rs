//! Model configuration.

use serde::{Deserialize, Serialize};

/// Activation function for hidden and output layers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Tanh,
    Gelu,
    /// Identity (no activation)
    Linear,
}

impl Activation {
    /// Append this activation to a torch sequential stack.
    #[cfg(feature = "torch")]
    pub(crate) fn add_to_torch(self, net: tch::nn::Sequential) -> tch::nn::Sequential {
        match self {
            Activation::Relu => net.add_fn(|x| x.relu()),
            Activation::Tanh => net.add_fn(|x| x.tanh()),
            Activation::Gelu => net.add_fn(|x| x.gelu("none")),
            Activation::Linear => net,
        }
    }

    /// Append this activation to a candle sequential stack.
    #[cfg(feature = "candle")]
    pub(crate) fn add_to_candle(self, net: candle_nn::Sequential) -> candle_nn::Sequential {
        match self {
            Activation::Relu => net.add_fn(|x| x.relu()),
            Activation::Tanh => net.add_fn(|x| x.tanh()),
            Activation::Gelu => net.add_fn(|x| x.gelu()),
            Activation::Linear => net,
        }
    }
}

/// Configuration options consumed by the model catalog.
///
/// Replaces the loosely-typed option dictionary of other RL stacks: every
/// recognized option is a named, typed field, and unknown options fail
/// deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Encoder hidden layer widths
    pub fcnet_hiddens: Vec<usize>,
    /// Encoder activation
    pub fcnet_activation: Activation,
    /// Head hidden layer widths (between encoder output and head output)
    pub post_fcnet_hiddens: Vec<usize>,
    /// Head hidden layer activation
    pub post_fcnet_activation: Activation,
    /// Whether the policy and value heads share one encoder
    pub vf_share_layers: bool,
    /// Learn log-std as a free parameter instead of a network output.
    /// Not supported by the PPO catalog; requesting it fails construction.
    pub free_log_std: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            fcnet_hiddens: vec![256, 256],
            fcnet_activation: Activation::Tanh,
            post_fcnet_hiddens: vec![],
            post_fcnet_activation: Activation::Relu,
            vf_share_layers: false,
            free_log_std: false,
        }
    }
}

impl ModelConfig {
    /// Set the encoder hidden widths
    pub fn with_fcnet_hiddens(mut self, hiddens: Vec<usize>) -> Self {
        self.fcnet_hiddens = hiddens;
        self
    }

    /// Set the encoder activation
    pub fn with_fcnet_activation(mut self, activation: Activation) -> Self {
        self.fcnet_activation = activation;
        self
    }

    /// Set the head hidden widths
    pub fn with_post_fcnet_hiddens(mut self, hiddens: Vec<usize>) -> Self {
        self.post_fcnet_hiddens = hiddens;
        self
    }

    /// Set the head activation
    pub fn with_post_fcnet_activation(mut self, activation: Activation) -> Self {
        self.post_fcnet_activation = activation;
        self
    }

    /// Share one encoder between the policy and value heads
    pub fn with_vf_share_layers(mut self, shared: bool) -> Self {
        self.vf_share_layers = shared;
        self
    }
}
