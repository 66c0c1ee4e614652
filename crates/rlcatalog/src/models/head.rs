//! MLP head configuration and modules.

use serde::{Deserialize, Serialize};

use super::{Activation, Framework};
use crate::Result;

#[cfg(feature = "candle")]
use candle_core::{DType, Device as CandleDevice, Tensor as CandleTensor};
#[cfg(feature = "candle")]
use candle_nn::{Module as CandleModule, VarBuilder, VarMap};

#[cfg(feature = "torch")]
use tch::{nn, nn::Module, Device, Tensor};

/// Configuration for an MLP head mapping a latent vector to a task output
/// (action distribution parameters or a value estimate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlpHeadConfig {
    /// Width of the latent input vector
    pub input_dim: usize,
    /// Hidden layer widths between input and output
    pub hidden_layer_dims: Vec<usize>,
    /// Activation applied after each hidden layer
    pub hidden_layer_activation: Activation,
    /// Activation applied to the output layer
    pub output_activation: Activation,
    /// Width of the head output
    pub output_dim: usize,
}

impl MlpHeadConfig {
    /// Materialize the head on the selected backend.
    ///
    /// Every call builds a fresh, independently initialized module.
    pub fn build(&self, framework: Framework) -> Result<Head> {
        match framework {
            #[cfg(feature = "torch")]
            Framework::Torch => Ok(Head::Torch(TorchMlpHead::new(self))),
            #[cfg(feature = "candle")]
            Framework::Candle => Ok(Head::Candle(CandleMlpHead::new(self)?)),
            #[allow(unreachable_patterns)]
            unavailable => Err(crate::CatalogError::BackendUnavailable(unavailable)),
        }
    }
}

/// A built head on one of the compiled-in backends
pub enum Head {
    #[cfg(feature = "torch")]
    Torch(TorchMlpHead),
    #[cfg(feature = "candle")]
    Candle(CandleMlpHead),
}

impl std::fmt::Debug for Head {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "torch")]
            Head::Torch(_) => f.debug_struct("Head::Torch").finish_non_exhaustive(),
            #[cfg(feature = "candle")]
            Head::Candle(_) => f.debug_struct("Head::Candle").finish_non_exhaustive(),
            #[allow(unreachable_patterns)]
            _ => f.write_str("Head"),
        }
    }
}

impl Head {
    /// Output width of the built head
    pub fn output_dim(&self) -> usize {
        match self {
            #[cfg(feature = "torch")]
            Head::Torch(h) => h.output_dim(),
            #[cfg(feature = "candle")]
            Head::Candle(h) => h.output_dim(),
            #[allow(unreachable_patterns)]
            _ => unreachable!("no tensor backend compiled in"),
        }
    }

    #[cfg(feature = "torch")]
    pub fn as_torch(&self) -> &TorchMlpHead {
        match self {
            Head::Torch(h) => h,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a torch head"),
        }
    }

    #[cfg(feature = "candle")]
    pub fn as_candle(&self) -> &CandleMlpHead {
        match self {
            Head::Candle(h) => h,
            #[allow(unreachable_patterns)]
            _ => panic!("Not a candle head"),
        }
    }
}

/// MLP head on the tch backend
#[cfg(feature = "torch")]
pub struct TorchMlpHead {
    vs: nn::VarStore,
    net: nn::Sequential,
    output_dim: usize,
}

#[cfg(feature = "torch")]
impl TorchMlpHead {
    pub fn new(config: &MlpHeadConfig) -> Self {
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
        net = net.add(nn::linear(
            &root / "output",
            in_dim,
            config.output_dim as i64,
            Default::default(),
        ));
        net = config.output_activation.add_to_torch(net);

        Self {
            vs,
            net,
            output_dim: config.output_dim,
        }
    }

    pub fn forward(&self, latent: &Tensor) -> Tensor {
        self.net.forward(latent)
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn var_store(&self) -> &nn::VarStore {
        &self.vs
    }

    pub fn var_store_mut(&mut self) -> &mut nn::VarStore {
        &mut self.vs
    }
}

/// MLP head on the candle backend
#[cfg(feature = "candle")]
pub struct CandleMlpHead {
    varmap: VarMap,
    net: candle_nn::Sequential,
    output_dim: usize,
}

#[cfg(feature = "candle")]
impl CandleMlpHead {
    pub fn new(config: &MlpHeadConfig) -> Result<Self> {
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
        net = net.add(candle_nn::linear(in_dim, config.output_dim, vb.pp("output"))?);
        net = config.output_activation.add_to_candle(net);

        Ok(Self {
            varmap,
            net,
            output_dim: config.output_dim,
        })
    }

    pub fn forward(&self, latent: &CandleTensor) -> candle_core::Result<CandleTensor> {
        self.net.forward(latent)
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    pub fn var_map(&self) -> &VarMap {
        &self.varmap
    }
}
