use docspeak::infrastructure::observability::TracingConfig;

#[test]
fn given_json_requested_when_building_config_then_json_format_is_set() {
    let config = TracingConfig::new("prod", true);

    assert_eq!(config.environment, "prod");
    assert!(config.json_format);
}
