use rlcatalog::prelude::*;
use rlcatalog::CatalogError;

#[test]
fn test_discrete_cartpole_like_scenario() {
    // 4-D observation, 3 discrete actions, shared encoder.
    let catalog = PpoCatalog::new(
        DynSpace::Box(BoxSpace::unbounded(&[4])),
        DynSpace::Discrete(Discrete::new(3)),
        ModelConfig::default()
            .with_vf_share_layers(true)
            .with_post_fcnet_hiddens(vec![32])
            .with_post_fcnet_activation(Activation::Relu),
    )
    .unwrap();

    assert_eq!(
        catalog
            .actor_critic_encoder_config()
            .base_encoder_config
            .input_dim,
        4
    );
    assert!(catalog.actor_critic_encoder_config().shared);
    assert_eq!(catalog.pi_head_config().output_dim, 3);
    assert_eq!(catalog.pi_head_config().hidden_layer_dims, vec![32]);
    assert_eq!(catalog.vf_head_config().output_dim, 1);
    assert_eq!(
        catalog.action_dist_kind(),
        ActionDistKind::Categorical { num_categories: 3 }
    );
}

#[test]
fn test_continuous_scenario() {
    // 8-D observation, 2-D continuous actions, separate encoders.
    let catalog = PpoCatalog::new(
        DynSpace::Box(BoxSpace::unbounded(&[8])),
        DynSpace::Box(BoxSpace::symmetric(&[2])),
        ModelConfig::default()
            .with_vf_share_layers(false)
            .with_post_fcnet_hiddens(vec![32])
            .with_post_fcnet_activation(Activation::Relu),
    )
    .unwrap();

    assert_eq!(
        catalog
            .actor_critic_encoder_config()
            .base_encoder_config
            .input_dim,
        8
    );
    assert!(!catalog.actor_critic_encoder_config().shared);
    // Mean and log-std per action dimension
    assert_eq!(catalog.pi_head_config().output_dim, 4);
    assert_eq!(catalog.vf_head_config().output_dim, 1);
    assert_eq!(
        catalog.action_dist_kind(),
        ActionDistKind::DiagGaussian { action_dim: 2 }
    );
}

#[test]
fn test_build_encoder_is_unsupported() {
    let catalog = PpoCatalog::new(
        DynSpace::Box(BoxSpace::unbounded(&[4])),
        DynSpace::Discrete(Discrete::new(2)),
        ModelConfig::default(),
    )
    .unwrap();

    for framework in [Framework::Torch, Framework::Candle] {
        let err = catalog.build_encoder(framework).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedOperation(_)));
    }
}

#[test]
fn test_construction_errors_are_descriptive() {
    let err = PpoCatalog::new(
        DynSpace::Box(BoxSpace::unit(&[84, 84, 3])),
        DynSpace::Discrete(Discrete::new(2)),
        ModelConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("1-D"));

    let err = PpoCatalog::new(
        DynSpace::Box(BoxSpace::unbounded(&[4])),
        DynSpace::MultiDiscrete(MultiDiscrete::new(vec![2, 3])),
        ModelConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("MultiDiscrete"));
}
