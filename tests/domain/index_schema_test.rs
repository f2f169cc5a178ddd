use docspeak::domain::{IndexName, IndexSchema, KEY_FIELD, TEXT_FIELD};

#[test]
fn given_index_name_when_building_schema_then_has_key_and_text_fields() {
    let schema = IndexSchema::for_index(&IndexName::new("architecture"));

    assert_eq!(schema.name, "architecture");
    assert_eq!(schema.fields.len(), 2);
    let key = schema.key_field().unwrap();
    assert_eq!(key.name, KEY_FIELD);
    assert!(key.searchable);
    let text = schema.fields.iter().find(|f| f.name == TEXT_FIELD).unwrap();
    assert!(!text.key);
    assert!(text.searchable);
}

#[test]
fn given_schema_when_serializing_then_matches_search_service_shape() {
    let schema = IndexSchema::for_index(&IndexName::new("architecture"));

    let json = serde_json::to_value(&schema).unwrap();

    assert_eq!(json["name"], "architecture");
    assert_eq!(json["fields"][0]["type"], "Edm.String");
    assert_eq!(json["corsOptions"]["allowedOrigins"][0], "*");
    assert_eq!(json["corsOptions"]["maxAgeInSeconds"], 60);
    assert_eq!(json["scoringProfiles"].as_array().unwrap().len(), 0);
}
