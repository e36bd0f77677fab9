use iqr_core::config::{IqrConfig, RankerConfig};
use iqr_core::constants;

#[test]
fn defaults_match_constants() {
    let cfg = IqrConfig::default();
    assert_eq!(cfg.pos_seed_neighbors, constants::DEFAULT_POS_SEED_NEIGHBORS);
    assert_eq!(
        cfg.session_max_idle_secs,
        constants::DEFAULT_SESSION_MAX_IDLE_SECS
    );
    assert_eq!(cfg.ranker.smoothing, constants::DEFAULT_RANKER_SMOOTHING);
}

#[test]
fn partial_toml_fills_in_defaults() {
    let cfg = IqrConfig::from_toml_str("pos_seed_neighbors = 20").unwrap();
    assert_eq!(cfg.pos_seed_neighbors, 20);
    assert_eq!(
        cfg.session_max_idle_secs,
        constants::DEFAULT_SESSION_MAX_IDLE_SECS
    );
}

#[test]
fn nested_ranker_table_parses() {
    let cfg = IqrConfig::from_toml_str(
        r#"
pos_seed_neighbors = 100

[ranker]
smoothing = 0.001
"#,
    )
    .unwrap();
    assert_eq!(cfg.pos_seed_neighbors, 100);
    assert_eq!(cfg.ranker.smoothing, 0.001);
}

#[test]
fn invalid_toml_reports_initialization_error() {
    let err = IqrConfig::from_toml_str("pos_seed_neighbors = \"many\"").unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}

#[test]
fn ranker_config_round_trips_through_serde() {
    let cfg = RankerConfig { smoothing: 0.5 };
    let json = serde_json::to_string(&cfg).unwrap();
    let back: RankerConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.smoothing, 0.5);
}
