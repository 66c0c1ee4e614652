//! Action distributions parameterized by policy-head outputs.

use crate::spaces::{DynSpace, Space};
use crate::{CatalogError, Result};

#[cfg(feature = "candle")]
use candle_core::{Tensor as CandleTensor, D};

#[cfg(feature = "torch")]
use tch::{Kind, Tensor as TorchTensor};

/// Log-std clamp bounds for Gaussian policies, for numerical stability.
#[cfg(any(feature = "torch", feature = "candle"))]
const LOG_STD_MIN: f64 = -20.0;
#[cfg(any(feature = "torch", feature = "candle"))]
const LOG_STD_MAX: f64 = 2.0;

/// The kind of action distribution a policy head parameterizes.
///
/// This also fixes the policy head's output width: `n` logits for a
/// categorical policy, `2k` values (mean and log-std per action dimension)
/// for a diagonal-Gaussian policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionDistKind {
    /// Discrete actions: the head emits one logit per category
    Categorical { num_categories: usize },
    /// Continuous actions: the head emits mean and log-std per dimension
    DiagGaussian { action_dim: usize },
}

impl ActionDistKind {
    /// Determine the distribution kind implied by an action space.
    pub fn for_action_space(action_space: &DynSpace) -> Result<Self> {
        match action_space {
            DynSpace::Discrete(d) => Ok(ActionDistKind::Categorical { num_categories: d.n }),
            DynSpace::Box(b) if b.ndim() == 1 => Ok(ActionDistKind::DiagGaussian {
                action_dim: b.shape()[0],
            }),
            DynSpace::Box(b) => Err(CatalogError::UnsupportedActionSpace(format!(
                "Box action spaces must be 1-D, got rank {}",
                b.ndim()
            ))),
            other => Err(CatalogError::UnsupportedActionSpace(format!(
                "{} action spaces are not supported, expected Discrete or Box",
                other.kind()
            ))),
        }
    }

    /// Policy head output width required to parameterize this distribution
    pub fn pi_output_dim(&self) -> usize {
        match self {
            ActionDistKind::Categorical { num_categories } => *num_categories,
            ActionDistKind::DiagGaussian { action_dim } => 2 * action_dim,
        }
    }
}

/// Enum for different types of probability distributions
pub enum Distribution {
    #[cfg(feature = "torch")]
    Categorical { logits: TorchTensor },
    #[cfg(feature = "torch")]
    Gaussian {
        mean: TorchTensor,
        std: TorchTensor,
    },

    #[cfg(feature = "candle")]
    CandleCategorical { logits: CandleTensor },
    #[cfg(feature = "candle")]
    CandleGaussian {
        mean: CandleTensor,
        std: CandleTensor,
    },
}

/// Helper to handle heterogeneous sample types
pub enum DistributionSample {
    #[cfg(feature = "torch")]
    Torch(TorchTensor),
    #[cfg(feature = "candle")]
    Candle(CandleTensor),
}

impl DistributionSample {
    #[cfg(feature = "torch")]
    pub fn as_torch(&self) -> &TorchTensor {
        match self {
            DistributionSample::Torch(t) => t,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a torch tensor"),
        }
    }

    #[cfg(feature = "candle")]
    pub fn as_candle(&self) -> &CandleTensor {
        match self {
            DistributionSample::Candle(t) => t,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a candle tensor"),
        }
    }
}

impl Distribution {
    /// Construct a distribution from a torch policy-head output.
    ///
    /// Gaussian heads emit `2k` values per action: the first half is the
    /// mean, the second half the log-std (clamped before exponentiation).
    #[cfg(feature = "torch")]
    pub fn from_torch_pi_output(kind: &ActionDistKind, pi_output: &TorchTensor) -> Self {
        match kind {
            ActionDistKind::Categorical { .. } => Distribution::Categorical {
                logits: pi_output.shallow_clone(),
            },
            ActionDistKind::DiagGaussian { .. } => {
                let mean_logstd = pi_output.chunk(2, -1);
                let mean = mean_logstd[0].shallow_clone();
                let log_std = mean_logstd[1].clamp(LOG_STD_MIN, LOG_STD_MAX);
                Distribution::Gaussian {
                    mean,
                    std: log_std.exp(),
                }
            }
        }
    }

    /// Construct a distribution from a candle policy-head output.
    #[cfg(feature = "candle")]
    pub fn from_candle_pi_output(
        kind: &ActionDistKind,
        pi_output: &CandleTensor,
    ) -> candle_core::Result<Self> {
        match kind {
            ActionDistKind::Categorical { .. } => Ok(Distribution::CandleCategorical {
                logits: pi_output.clone(),
            }),
            ActionDistKind::DiagGaussian { .. } => {
                let chunks = pi_output.chunk(2, D::Minus1)?;
                let mean = chunks[0].clone();
                let log_std = chunks[1].clamp(LOG_STD_MIN, LOG_STD_MAX)?;
                Ok(Distribution::CandleGaussian {
                    mean,
                    std: log_std.exp()?,
                })
            }
        }
    }

    /// Sample raw actions from the distribution
    #[cfg(any(feature = "torch", feature = "candle"))]
    pub fn sample(&self) -> Result<DistributionSample> {
        match self {
            #[cfg(feature = "torch")]
            Distribution::Categorical { logits } => Ok(DistributionSample::Torch(
                logits
                    .softmax(-1, Kind::Float)
                    .multinomial(1, true)
                    .squeeze_dim(-1),
            )),
            #[cfg(feature = "torch")]
            Distribution::Gaussian { mean, std } => {
                let noise = TorchTensor::randn_like(mean);
                Ok(DistributionSample::Torch(mean + noise * std))
            }
            #[cfg(feature = "candle")]
            Distribution::CandleCategorical { logits } => {
                let probs = candle_nn::ops::softmax(logits, D::Minus1)?;
                Ok(DistributionSample::Candle(probs.argmax(D::Minus1)?))
            }
            #[cfg(feature = "candle")]
            Distribution::CandleGaussian { mean, std } => {
                let noise = CandleTensor::randn_like(mean, 0.0, 1.0)?;
                Ok(DistributionSample::Candle((mean + (noise * std)?)?))
            }
        }
    }

    /// Compute log probabilities for given actions
    #[cfg(any(feature = "torch", feature = "candle"))]
    pub fn log_prob(&self, actions: &DistributionSample) -> Result<DistributionSample> {
        match (self, actions) {
            #[cfg(feature = "torch")]
            (Distribution::Categorical { logits }, DistributionSample::Torch(actions)) => {
                let log_probs = logits.log_softmax(-1, Kind::Float);
                let indices = if actions.dim() == log_probs.dim() {
                    actions.to_kind(Kind::Int64)
                } else {
                    actions.unsqueeze(-1).to_kind(Kind::Int64)
                };
                Ok(DistributionSample::Torch(
                    log_probs.gather(-1, &indices, false).squeeze_dim(-1),
                ))
            }
            #[cfg(feature = "torch")]
            (Distribution::Gaussian { mean, std }, DistributionSample::Torch(actions)) => {
                let var = std.pow_tensor_scalar(2.0);
                let log_std = std.log();

                let log_2pi = (2.0 * std::f64::consts::PI).ln();
                let log_2pi_tensor = TorchTensor::from(log_2pi).to_device(mean.device());
                let sq_diff = (actions - mean).pow_tensor_scalar(2.0);
                let element_wise_log_prob =
                    (sq_diff / (var + 1e-8) + log_std * 2.0 + log_2pi_tensor) * -0.5;
                Ok(DistributionSample::Torch(element_wise_log_prob.sum_dim_intlist(
                    [-1i64].as_slice(),
                    false,
                    Kind::Float,
                )))
            }
            #[cfg(feature = "candle")]
            (
                Distribution::CandleCategorical { logits },
                DistributionSample::Candle(actions),
            ) => {
                let log_probs = candle_nn::ops::log_softmax(logits, D::Minus1)?;
                let indices = actions.unsqueeze(D::Minus1)?;
                Ok(DistributionSample::Candle(
                    log_probs.gather(&indices, D::Minus1)?.squeeze(D::Minus1)?,
                ))
            }
            #[cfg(feature = "candle")]
            (Distribution::CandleGaussian { mean, std }, DistributionSample::Candle(actions)) => {
                let var = (std * std)?;
                let log_std = std.log()?;
                let log_2pi = (2.0 * std::f64::consts::PI).ln();

                let diff = (actions - mean)?;
                let sq_diff = (&diff * &diff)?;
                let element_wise_log_prob =
                    ((((sq_diff / (var + 1e-8)?)? + (log_std * 2.0)?)? + log_2pi)? * -0.5)?;
                Ok(DistributionSample::Candle(
                    element_wise_log_prob.sum(D::Minus1)?,
                ))
            }
            #[allow(unreachable_patterns)]
            _ => panic!("Backend mismatch in log_prob"),
        }
    }

    /// Compute entropy of the distribution
    #[cfg(any(feature = "torch", feature = "candle"))]
    pub fn entropy(&self) -> Result<DistributionSample> {
        match self {
            #[cfg(feature = "torch")]
            Self::Categorical { logits } => {
                let probs = logits.softmax(-1, Kind::Float);
                let log_probs = logits.log_softmax(-1, Kind::Float);
                let entropy =
                    -(probs * log_probs).sum_dim_intlist(Some(&[-1_i64][..]), false, Kind::Float);
                Ok(DistributionSample::Torch(entropy))
            }
            #[cfg(feature = "torch")]
            Self::Gaussian { mean: _, std } => {
                let entropy = std.log() + 0.5 + 0.5 * (2.0 * std::f64::consts::PI).ln();
                Ok(DistributionSample::Torch(entropy.sum_dim_intlist(
                    Some(&[-1_i64][..]),
                    false,
                    Kind::Float,
                )))
            }
            #[cfg(feature = "candle")]
            Self::CandleCategorical { logits } => {
                let probs = candle_nn::ops::softmax(logits, D::Minus1)?;
                let log_probs = candle_nn::ops::log_softmax(logits, D::Minus1)?;
                Ok(DistributionSample::Candle(
                    ((&probs * &log_probs)?.sum(D::Minus1)? * -1.0)?,
                ))
            }
            #[cfg(feature = "candle")]
            Self::CandleGaussian { mean: _, std } => {
                let log_std = std.log()?;
                let entropy = (log_std + (0.5 + 0.5 * (2.0 * std::f64::consts::PI).ln()))?;
                Ok(DistributionSample::Candle(entropy.sum(D::Minus1)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spaces::{BoxSpace, Discrete, MultiDiscrete};

    #[test]
    fn test_kind_for_discrete() {
        let space = DynSpace::Discrete(Discrete::new(6));
        let kind = ActionDistKind::for_action_space(&space).unwrap();
        assert_eq!(kind, ActionDistKind::Categorical { num_categories: 6 });
        assert_eq!(kind.pi_output_dim(), 6);
    }

    #[test]
    fn test_kind_for_box() {
        let space = DynSpace::Box(BoxSpace::symmetric(&[3]));
        let kind = ActionDistKind::for_action_space(&space).unwrap();
        assert_eq!(kind, ActionDistKind::DiagGaussian { action_dim: 3 });
        // Mean and log-std per action dimension
        assert_eq!(kind.pi_output_dim(), 6);
    }

    #[test]
    fn test_kind_rejects_multi_discrete() {
        let space = DynSpace::MultiDiscrete(MultiDiscrete::new(vec![2, 3]));
        let err = ActionDistKind::for_action_space(&space).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedActionSpace(_)));
    }

    #[test]
    fn test_kind_rejects_multi_dim_box() {
        let space = DynSpace::Box(BoxSpace::symmetric(&[2, 2]));
        let err = ActionDistKind::for_action_space(&space).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedActionSpace(_)));
    }

    #[cfg(feature = "candle")]
    mod candle {
        use super::*;
        use candle_core::{DType, Device};

        #[test]
        fn test_gaussian_from_pi_output() {
            let kind = ActionDistKind::DiagGaussian { action_dim: 2 };
            let pi_output = CandleTensor::zeros((8, 4), DType::F32, &Device::Cpu).unwrap();
            let dist = Distribution::from_candle_pi_output(&kind, &pi_output).unwrap();
            match &dist {
                Distribution::CandleGaussian { mean, std } => {
                    assert_eq!(mean.dims(), &[8, 2]);
                    assert_eq!(std.dims(), &[8, 2]);
                    // log-std 0 -> std 1
                    let first: f32 = std.get(0).unwrap().get(0).unwrap().to_scalar().unwrap();
                    assert!((first - 1.0).abs() < 1e-6);
                }
                _ => panic!("Expected Gaussian distribution"),
            }
            let sample = dist.sample().unwrap();
            assert_eq!(sample.as_candle().dims(), &[8, 2]);
            let log_prob = dist.log_prob(&sample).unwrap();
            assert_eq!(log_prob.as_candle().dims(), &[8]);
        }

        #[test]
        fn test_categorical_from_pi_output() {
            let kind = ActionDistKind::Categorical { num_categories: 3 };
            let pi_output = CandleTensor::new(&[[1.0f32, 2.0, 10.0]], &Device::Cpu).unwrap();
            let dist = Distribution::from_candle_pi_output(&kind, &pi_output).unwrap();
            let sample = dist.sample().unwrap();
            assert_eq!(sample.as_candle().dims(), &[1]);
            let log_prob = dist.log_prob(&sample).unwrap();
            assert_eq!(log_prob.as_candle().dims(), &[1]);
            let entropy = dist.entropy().unwrap();
            assert_eq!(entropy.as_candle().dims(), &[1]);
        }

        #[test]
        fn test_gaussian_log_prob_standard_normal() {
            let mean = CandleTensor::zeros((1, 1), DType::F32, &Device::Cpu).unwrap();
            let std = CandleTensor::ones((1, 1), DType::F32, &Device::Cpu).unwrap();
            let dist = Distribution::CandleGaussian { mean, std };
            let x = CandleTensor::zeros((1, 1), DType::F32, &Device::Cpu).unwrap();
            let log_prob = dist.log_prob(&DistributionSample::Candle(x)).unwrap();
            let val: f32 = log_prob.as_candle().get(0).unwrap().to_scalar().unwrap();
            assert!((val + 0.9189).abs() < 1e-3);
        }
    }

    #[cfg(feature = "torch")]
    mod torch {
        use super::*;
        use tch::{Device, Kind, Tensor};

        #[test]
        fn test_gaussian_from_pi_output() {
            let kind = ActionDistKind::DiagGaussian { action_dim: 2 };
            let pi_output = Tensor::zeros([8, 4], (Kind::Float, Device::Cpu));
            let dist = Distribution::from_torch_pi_output(&kind, &pi_output);
            match &dist {
                Distribution::Gaussian { mean, std } => {
                    assert_eq!(mean.size(), [8, 2]);
                    assert_eq!(std.size(), [8, 2]);
                }
                _ => panic!("Expected Gaussian distribution"),
            }
        }

        #[test]
        fn test_gaussian_log_prob_standard_normal() {
            let mean = Tensor::zeros([1, 1], (Kind::Float, Device::Cpu));
            let std = Tensor::ones([1, 1], (Kind::Float, Device::Cpu));
            let dist = Distribution::Gaussian { mean, std };
            let x = Tensor::zeros([1, 1], (Kind::Float, Device::Cpu));
            let log_prob = dist.log_prob(&DistributionSample::Torch(x)).unwrap();
            let val = log_prob.as_torch().get(0).double_value(&[]);
            assert!((val + 0.9189).abs() < 1e-4);
        }

        #[test]
        fn test_gaussian_entropy() {
            let mean = Tensor::zeros([1, 1], (Kind::Float, Device::Cpu));
            let std = Tensor::ones([1, 1], (Kind::Float, Device::Cpu));
            let dist = Distribution::Gaussian { mean, std };
            let entropy = dist.entropy().unwrap();
            let val = entropy.as_torch().get(0).double_value(&[]);
            assert!((val - 1.4189).abs() < 1e-4);
        }
    }
}
