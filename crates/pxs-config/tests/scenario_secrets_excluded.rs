use pxs_config::load_layered_yaml_from_strings;
use pxs_config::secrets::resolve_api_token;

#[test]
fn literal_jwt_in_config_is_refused() {
    let yaml = r#"
api:
  token_env: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload.sig"
"#;
    let err = load_layered_yaml_from_strings(&[yaml]).unwrap_err().to_string();
    assert!(err.contains("CONFIG_SECRET_DETECTED"), "{err}");
    assert!(err.contains("/api/token_env"), "{err}");
    assert!(!err.contains("eyJhbGci"), "value must be redacted: {err}");
}

#[test]
fn pasted_bearer_header_in_overlay_is_refused() {
    let base = "api:\n  token_env: PXS_API_TOKEN\n";
    let overlay = "api:\n  token_env: \"Bearer abc.def.ghi\"\n";
    let err = load_layered_yaml_from_strings(&[base, overlay])
        .unwrap_err()
        .to_string();
    assert!(err.contains("CONFIG_SECRET_DETECTED"), "{err}");
}

#[test]
fn missing_required_token_names_the_variable() {
    let cfg = load_layered_yaml_from_strings(&["api:\n  token_env: PXS_SENTINEL_TOKEN_UNSET_Q7\n"])
        .unwrap()
        .config_json;
    let err = resolve_api_token(&cfg, true).unwrap_err().to_string();
    assert!(err.contains("SECRETS_MISSING"), "{err}");
    assert!(err.contains("PXS_SENTINEL_TOKEN_UNSET_Q7"), "{err}");
}

#[test]
fn optional_token_resolves_to_none() {
    let cfg = load_layered_yaml_from_strings(&["api:\n  token_env: PXS_SENTINEL_TOKEN_UNSET_Q8\n"])
        .unwrap()
        .config_json;
    let tok = resolve_api_token(&cfg, false).unwrap();
    assert_eq!(tok.env_var, "PXS_SENTINEL_TOKEN_UNSET_Q8");
    assert!(tok.token.is_none());
}

#[test]
fn default_env_name_and_redacted_debug() {
    // PATH is set in every test environment.
    let cfg = load_layered_yaml_from_strings(&["api:\n  token_env: PATH\n"])
        .unwrap()
        .config_json;
    let tok = resolve_api_token(&cfg, true).unwrap();
    let value = tok.token.clone().unwrap();
    let dbg = format!("{tok:?}");
    assert!(dbg.contains("<REDACTED>"));
    assert!(!dbg.contains(&value));

    let empty = serde_json::json!({});
    assert_eq!(resolve_api_token(&empty, false).unwrap().env_var, "PXS_API_TOKEN");
}
