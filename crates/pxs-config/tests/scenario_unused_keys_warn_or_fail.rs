use pxs_config::{
    load_layered_yaml_from_strings, report_unused_keys, ConfigSurface, UnusedKeyPolicy,
};

const YAML: &str = r#"
api:
  base_url: "http://localhost:5000"
  token_env: "PXS_API_TOKEN"
quantity:
  min: 0.5
  max: 999
  style:
    size: small
legacy:
  theme: dark
"#;

#[test]
fn warn_lists_unknown_leaves() {
    let cfg = load_layered_yaml_from_strings(&[YAML]).unwrap().config_json;
    let report = report_unused_keys(ConfigSurface::Cli, &cfg, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(report.surface, "CLI");
    assert_eq!(report.unused_leaf_pointers, vec!["/legacy/theme".to_string()]);
}

#[test]
fn session_does_not_consume_style() {
    let cfg = load_layered_yaml_from_strings(&[YAML]).unwrap().config_json;
    let report =
        report_unused_keys(ConfigSurface::Session, &cfg, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(
        report.unused_leaf_pointers,
        vec!["/legacy/theme".to_string(), "/quantity/style/size".to_string()]
    );
}

#[test]
fn fail_policy_errors_with_tag() {
    let cfg = load_layered_yaml_from_strings(&[YAML]).unwrap().config_json;
    let err = report_unused_keys(ConfigSurface::Cli, &cfg, UnusedKeyPolicy::Fail)
        .unwrap_err()
        .to_string();
    assert!(err.contains("CONFIG_UNUSED_KEYS"), "{err}");
    assert!(err.contains("/legacy/theme"), "{err}");
}

#[test]
fn clean_config_passes_fail_policy() {
    let cfg = load_layered_yaml_from_strings(&["api:\n  timeout_ms: 3000\n"])
        .unwrap()
        .config_json;
    let report = report_unused_keys(ConfigSurface::Session, &cfg, UnusedKeyPolicy::Fail).unwrap();
    assert!(report.is_clean());
}
