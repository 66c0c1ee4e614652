//! Observation encoder configuration and modules.

use serde::{Deserialize, Serialize};

use super::{Activation, Framework};
use crate::Result;

#[cfg(feature = "candle")]
use candle_core::{DType, Device as CandleDevice, Tensor as CandleTensor};
#[cfg(feature = "candle")]
use candle_nn::{Module as CandleModule, VarBuilder, VarMap};

#[cfg(feature = "torch")]
use tch::{nn, nn::Module, Device, Tensor};

/// Configuration for an MLP observation encoder.
///
/// The encoder maps a flat observation vector to a latent feature vector
/// whose width is the last hidden layer (or the input itself when no hidden
/// layers are configured).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlpEncoderConfig {
    /// Width of the observation vector
    pub input_dim: usize,
    /// Hidden layer widths
    pub hidden_layer_dims: Vec<usize>,
    /// Activation applied after each hidden layer
    pub hidden_layer_activation: Activation,
}

impl MlpEncoderConfig {
    /// Width of the latent vector this encoder produces
    pub fn output_dim(&self) -> usize {
        self.hidden_layer_dims
            .last()
            .copied()
            .unwrap_or(self.input_dim)
    }

    /// Materialize the encoder on the selected backend.
    ///
    /// Every call builds a fresh, independently initialized module.
    pub fn build(&self, framework: Framework) -> Result<Encoder> {
        match framework {
            #[cfg(feature = "torch")]
            Framework::Torch => Ok(Encoder::Torch(TorchMlpEncoder::new(self))),
            #[cfg(feature = "candle")]
            Framework::Candle => Ok(Encoder::Candle(CandleMlpEncoder::new(self)?)),
            #[allow(unreachable_patterns)]
            unavailable => Err(crate::CatalogError::BackendUnavailable(unavailable)),
        }
    }
}

/// A built encoder on one of the compiled-in backends
pub enum Encoder {
    #[cfg(feature = "torch")]
    Torch(TorchMlpEncoder),
    #[cfg(feature = "candle")]
    Candle(CandleMlpEncoder),
}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "torch")]
            Encoder::Torch(_) => f.debug_struct("Encoder::Torch").finish_non_exhaustive(),
            #[cfg(feature = "candle")]
            Encoder::Candle(_) => f.debug_struct("Encoder::Candle").finish_non_exhaustive(),
            #[allow(unreachable_patterns)]
            _ => f.write_str("Encoder"),
        }
    }
}

impl Encoder {
    /// Latent width of the built encoder
    pub fn output_dim(&self) -> usize {
        match self {
            #[cfg(feature = "torch")]
            Encoder::Torch(e) => e.output_dim(),
            #[cfg(feature = "candle")]
            Encoder::Candle(e) => e.output_dim(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("no tensor backend compiled in"),
        }
    }

    #[cfg(feature = "torch")]
    pub fn as_torch(&self) -> &TorchMlpEncoder {
        match self {
            Encoder::Torch(e) => e,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a torch encoder"),
        }
    }

    #[cfg(feature = "candle")]
    pub fn as_candle(&self) -> &CandleMlpEncoder {
        match self {
            Encoder::Candle(e) => e,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a candle encoder"),
        }
    }
}

/// MLP encoder on the tch backend
#[cfg(feature = "torch")]
pub struct TorchMlpEncoder {
    /// Variable store for parameters
    vs: nn::VarStore,
    /// Layer stack
    net: nn::Sequential,
    output_dim: usize,
}

#[cfg(feature = "torch")]
impl TorchMlpEncoder {
    pub fn new(config: &MlpEncoderConfig) -> Self {
        let vs = nn::VarStore::new(Device::Cpu);
        let root = vs.root();

        let mut net = nn::seq();
        let mut in_dim = config.input_dim as i64;
        for (i, &width) in config.hidden_layer_dims.iter().enumerate() {
            net = net.add(nn::linear(
                &root / format!("hidden_{}", i),
                in_dim,
                width as i64,
                Default::default(),
            ));
            net = config.hidden_layer_activation.add_to_torch(net);
            in_dim = width as i64;
        }

        Self {
            vs,
            net,
            output_dim: config.output_dim(),
        }
    }

    pub fn forward(&self, obs: &Tensor) -> Tensor {
        self.net.forward(obs)
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Variable store holding this encoder's parameters
    pub fn var_store(&self) -> &nn::VarStore {
        &self.vs
    }

    pub fn var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.vs
    }
}

/// MLP encoder on the candle backend
#[cfg(feature = "candle")]
pub struct CandleMlpEncoder {
    /// Variable map holding the parameters
    varmap: VarMap,
    /// Layer stack
    net: candle_nn::Sequential,
    output_dim: usize,
}

#[cfg(feature = "candle")]
impl CandleMlpEncoder {
    pub fn new(config: &MlpEncoderConfig) -> Result<Self> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &CandleDevice::Cpu);

        let mut net = candle_nn::seq();
        let mut in_dim = config.input_dim;
        for (i, &width) in config.hidden_layer_dims.iter().enumerate() {
            net = net.add(candle_nn::linear(
                in_dim,
                width,
                vb.pp(format!("hidden_{}", i)),
            )?);
            net = config.hidden_layer_activation.add_to_candle(net);
            in_dim = width;
        }

        Ok(Self {
            varmap,
            net,
            output_dim: config.output_dim(),
        })
    }

    pub fn forward(&self, obs: &CandleTensor) -> candle_core::Result<CandleTensor> {
        self.net.forward(obs)
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Variable map holding this encoder's parameters
    pub fn var_map(&self) -> &VarMap {
        &self.varmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(input_dim: usize, hiddens: Vec<usize>) -> MlpEncoderConfig {
        MlpEncoderConfig {
            input_dim,
            hidden_layer_dims: hiddens,
            hidden_layer_activation: Activation::Tanh,
        }
    }

    #[test]
    fn test_output_dim_last_hidden() {
        assert_eq!(config(4, vec![256, 64]).output_dim(), 64);
    }

    #[test]
    fn test_output_dim_identity() {
        // No hidden layers: the encoder passes observations through
        assert_eq!(config(7, vec![]).output_dim(), 7);
    }

    #[cfg(feature = "candle")]
    #[test]
    fn test_candle_build_forward_shape() {
        let encoder = config(4, vec![32, 16]).build(Framework::Candle).unwrap();
        let obs = CandleTensor::zeros((8, 4), DType::F32, &CandleDevice::Cpu).unwrap();
        let latent = encoder.as_candle().forward(&obs).unwrap();
        assert_eq!(latent.dims(), &[8, 16]);
        assert_eq!(encoder.output_dim(), 16);
    }

    #[cfg(feature = "candle")]
    #[test]
    fn test_candle_identity_encoder() {
        let encoder = config(5, vec![]).build(Framework::Candle).unwrap();
        let obs = CandleTensor::ones((3, 5), DType::F32, &CandleDevice::Cpu).unwrap();
        let latent = encoder.as_candle().forward(&obs).unwrap();
        assert_eq!(latent.dims(), &[3, 5]);
    }

    #[cfg(feature = "torch")]
    #[test]
    fn test_torch_build_forward_shape() {
        let encoder = config(4, vec![32, 16]).build(Framework::Torch).unwrap();
        let obs = Tensor::zeros([8, 4], (tch::Kind::Float, Device::Cpu));
        let latent = encoder.as_torch().forward(&obs);
        assert_eq!(latent.size(), [8, 16]);
    }
}
