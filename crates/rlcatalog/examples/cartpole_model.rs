//! Resolve and build a PPO model for CartPole-like spaces.
//!
//! Run with: cargo run --example cartpole_model

use rlcatalog::prelude::*;

fn main() -> rlcatalog::Result<()> {
    // CartPole: 4-D observation vector, 2 discrete actions.
    let obs_space = DynSpace::Box(BoxSpace::unbounded(&[4]));
    let action_space = DynSpace::Discrete(Discrete::new(2));

    let config = ModelConfig::default()
        .with_fcnet_hiddens(vec![64, 64])
        .with_vf_share_layers(true);

    let catalog = PpoCatalog::new(obs_space, action_space, config)?;
    println!(
        "encoder: {} -> {} (shared: {})",
        catalog
            .actor_critic_encoder_config()
            .base_encoder_config
            .input_dim,
        catalog.latent_dim(),
        catalog.actor_critic_encoder_config().shared,
    );
    println!("pi head out: {}", catalog.pi_head_config().output_dim);
    println!("vf head out: {}", catalog.vf_head_config().output_dim);

    #[cfg(feature = "candle")]
    {
        use candle_core::{DType, Device, Tensor};

        let encoder = catalog.build_actor_critic_encoder(Framework::Candle)?;
        let pi_head = catalog.build_pi_head(Framework::Candle)?;
        let vf_head = catalog.build_vf_head(Framework::Candle)?;

        let obs = Tensor::zeros((1, 4), DType::F32, &Device::Cpu)?;
        let (actor_latent, critic_latent) = encoder.as_candle().forward(&obs)?;
        let pi_out = pi_head.as_candle().forward(&actor_latent)?;
        let vf_out = vf_head.as_candle().forward(&critic_latent)?;
        println!("pi logits: {:?}", pi_out.to_vec2::<f32>()?);
        println!("value: {:?}", vf_out.to_vec2::<f32>()?);

        let dist = Distribution::from_candle_pi_output(&catalog.action_dist_kind(), &pi_out)?;
        let action = dist.sample()?;
        println!("sampled action: {:?}", action.as_candle().to_vec1::<u32>()?);
    }

    Ok(())
}
