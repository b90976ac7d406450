use std::fs;

use ship_tapper::core::config::GameConfig;

#[test]
fn shipped_config_matches_defaults() {
    let cfg = GameConfig::load_from_file("assets/config/game.ron").expect("shipped config parses");
    assert_eq!(cfg, GameConfig::default());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn local_file_overrides_individual_keys() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("game.ron");
    let local = dir.path().join("game.local.ron");
    fs::write(
        &base,
        r#"(
            window: (title: "Base", width: 400.0),
            cycle: (initial_duration: 4.0, speedup: 0.8),
        )"#,
    )
    .unwrap();
    fs::write(&local, r#"(cycle: (speedup: 0.5, seed: Some(42)))"#).unwrap();

    let (cfg, used, errors) = GameConfig::load_layered([&base, &local]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(used.len(), 2);
    assert_eq!(cfg.window.title, "Base");
    assert_eq!(cfg.window.width, 400.0);
    assert_eq!(cfg.window.height, 1280.0, "untouched keys keep defaults");
    assert_eq!(cfg.cycle.initial_duration, 4.0, "base value survives the overlay");
    assert_eq!(cfg.cycle.speedup, 0.5);
    assert_eq!(cfg.cycle.seed, Some(42));
}

#[test]
fn missing_and_broken_files_are_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.ron");
    fs::write(&broken, "(window: (width: ").unwrap();
    let missing = dir.path().join("nope.ron");

    let (cfg, used, errors) = GameConfig::load_layered([&broken, &missing]);
    assert!(used.is_empty());
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("parse error"));
    assert!(errors[1].contains("read error"));
    assert_eq!(cfg, GameConfig::default());

    let (fallback, err) = GameConfig::load_or_default(&broken);
    assert_eq!(fallback, GameConfig::default());
    assert!(err.is_some());
}

#[test]
fn nonsense_tuning_produces_warnings() {
    let cfg: GameConfig = ron::from_str(
        "(cycle: (speedup: 1.2, initial_duration: 0.0, spawn_z: 5.0), scene: (pick_radius: 0.0))",
    )
    .unwrap();
    let warnings = cfg.validate();
    for key in ["cycle.speedup", "cycle.initial_duration", "cycle.spawn_z", "scene.pick_radius"] {
        assert!(warnings.iter().any(|w| w.contains(key)), "no warning for {key}: {warnings:?}");
    }
}
