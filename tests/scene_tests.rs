use strand::{ChainError, ConfigError, SceneConfig};

#[test]
fn classic_scene_has_one_pinned_chain() {
    let registry = SceneConfig::classic().build().unwrap();
    assert_eq!(registry.len(), 1);

    let (_, chain) = registry.chains().next().unwrap();
    assert_eq!(chain.len(), 14);
    assert!((chain.rest_spacing() - 400.0 / 13.0).abs() < 1e-5);
    let pinned: Vec<usize> = chain
        .iter()
        .enumerate()
        .filter(|(_, p)| p.fixed)
        .map(|(i, _)| i)
        .collect();
    assert_eq!(pinned, vec![4]);
}

#[test]
fn scene_from_toml() {
    let scene = SceneConfig::from_toml_str(
        r#"
        [sim]
        iterations = 12
        settle_new_chains = true

        [[chains]]
        start = [50.0, 500.0, 0.0]
        spacing = 20.0
        count = 6
        pinned = [0, 5]

        [[chains]]
        start = [100.0, 100.0, 0.0]
        end = [100.0, 300.0, 0.0]
        count = 5
        "#,
    )
    .unwrap();
    assert_eq!(scene.sim.iterations, 12);
    assert_eq!(scene.chains.len(), 2);

    let registry = scene.build().unwrap();
    let chains: Vec<_> = registry.chains().map(|(_, c)| c).collect();
    assert_eq!(chains[0].len(), 6);
    assert!(chains[0].head().unwrap().fixed && chains[0].tail().unwrap().fixed);
    assert_eq!(chains[1].len(), 5);
    assert!((chains[1].rest_spacing() - 50.0).abs() < 1e-4);
    assert!(chains[1].iter().all(|p| p.velocity_raw().length() == 0.0));
}

#[test]
fn scene_round_trips_through_toml() {
    let scene = SceneConfig::classic();
    let text = toml::to_string(&scene).unwrap();
    assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), scene);
}

#[test]
fn chain_without_layout_is_rejected() {
    let scene = SceneConfig::from_toml_str(
        "[[chains]]\nstart = [0.0, 0.0, 0.0]\ncount = 4\n",
    )
    .unwrap();
    let err = scene.build().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidLayout { index: 0, .. }));
}

#[test]
fn conflicting_layout_is_rejected() {
    let scene = SceneConfig::from_toml_str(
        "[[chains]]\nstart = [0.0, 0.0, 0.0]\ncount = 4\nspacing = 5.0\nlength = 30.0\n",
    )
    .unwrap();
    assert!(matches!(scene.build(), Err(ConfigError::InvalidLayout { .. })));
}

#[test]
fn pinned_index_past_end_is_rejected() {
    let scene = SceneConfig::from_toml_str(
        "[[chains]]\nstart = [0.0, 0.0, 0.0]\ncount = 3\nspacing = 5.0\npinned = [3]\n",
    )
    .unwrap();
    assert!(matches!(scene.build(), Err(ConfigError::InvalidLayout { index: 0, .. })));
}

#[test]
fn short_chain_surfaces_count_error() {
    let scene = SceneConfig::from_toml_str(
        "[[chains]]\nstart = [0.0, 0.0, 0.0]\ncount = 1\nspacing = 5.0\n",
    )
    .unwrap();
    match scene.build() {
        Err(ConfigError::Chain(e)) => assert_eq!(e, ChainError::InvalidCount { count: 1, min: 2 }),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("one-particle chain should be rejected"),
    }
}

#[test]
fn invalid_sim_section_is_rejected() {
    let err = SceneConfig::from_toml_str("[sim]\ndamping = -0.1\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDamping(_)));
}
