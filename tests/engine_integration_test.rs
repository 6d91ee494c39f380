//! Integration tests for the anonymize / deanonymize pipeline

use shroud::anonymization::operators::GenZ;
use shroud::anonymization::{
    AnonymizedEntity, AnonymizerEngine, EntitySpan, OperatorConfig, OperatorConfigs,
    DEFAULT_ENTITY,
};
use shroud::domain::ShroudError;
use test_case::test_case;

const KEY: &str = "WmZq4t7w!z%C&F)J";

fn engine() -> AnonymizerEngine {
    AnonymizerEngine::new().unwrap()
}

fn char_slice(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

/// Every item must point at its own text in the rebuilt output
fn assert_items_consistent(text: &str, items: &[AnonymizedEntity]) {
    for pair in items.windows(2) {
        assert!(pair[0].end <= pair[1].start, "items overlap: {pair:?}");
    }
    for item in items {
        assert_eq!(char_slice(text, item.start, item.end), item.text);
    }
}

#[test]
fn test_call_emily_with_genz() {
    let text = "Call Emily at 577-988-1234";
    let spans = vec![
        EntitySpan::new("PERSON", 5, 10, 0.85),
        EntitySpan::new("PHONE_NUMBER", 14, 26, 0.95),
    ];
    let configs = OperatorConfigs::new().with(DEFAULT_ENTITY, OperatorConfig::new("genz"));

    let result = engine().anonymize(text, &spans, &configs).unwrap();

    let person = &result.items[0];
    let phone = &result.items[1];
    assert_eq!(person.entity_type, "PERSON");
    assert_eq!(phone.entity_type, "PHONE_NUMBER");
    assert!(GenZ::slang_for("PERSON").contains(&person.text.as_str()));
    assert!(GenZ::slang_for("PHONE_NUMBER").contains(&phone.text.as_str()));
    assert_eq!(
        result.text,
        format!("Call {} at {}", person.text, phone.text)
    );
    assert_items_consistent(&result.text, &result.items);
}

#[test]
fn test_overlap_keeps_higher_score() {
    let text = "0123456789abcdefghij";
    let spans = vec![
        EntitySpan::new("PERSON", 0, 10, 0.5),
        EntitySpan::new("LOCATION", 5, 15, 0.9),
    ];

    let result = engine()
        .anonymize(text, &spans, &OperatorConfigs::new())
        .unwrap();

    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].entity_type, "LOCATION");
    assert_eq!(result.text, "01234<LOCATION>fghij");
}

#[test]
fn test_mask_phone_from_end() {
    let text = "Call Emily at 577-988-1234";
    let spans = vec![EntitySpan::new("PHONE_NUMBER", 14, 26, 0.95)];
    let configs = OperatorConfigs::new().with(
        "PHONE_NUMBER",
        OperatorConfig::new("mask")
            .with_param("masking_char", "*")
            .with_param("chars_to_mask", 4)
            .with_param("from_end", true),
    );

    let result = engine().anonymize(text, &spans, &configs).unwrap();
    assert_eq!(result.text, "Call Emily at 577-988-****");
    assert_eq!(result.items[0].operator, "mask");
}

#[test]
fn test_mixed_operators_and_fallback() {
    let text = "Emily Carter emailed emily@example.com from 10.0.0.1";
    let spans = vec![
        EntitySpan::new("IP_ADDRESS", 44, 52, 0.9),
        EntitySpan::new("PERSON", 0, 12, 0.9),
        EntitySpan::new("EMAIL_ADDRESS", 21, 38, 0.9),
    ];
    let configs = OperatorConfigs::new()
        .with("PERSON", OperatorConfig::new("redact"))
        .with(
            "EMAIL_ADDRESS",
            OperatorConfig::new("replace").with_param("new_value", "[email]"),
        );

    let result = engine().anonymize(text, &spans, &configs).unwrap();

    assert_eq!(result.text, " emailed [email] from <IP_ADDRESS>");
    let operators: Vec<&str> = result.items.iter().map(|i| i.operator.as_str()).collect();
    assert_eq!(operators, vec!["redact", "replace", "replace"]);
    assert_items_consistent(&result.text, &result.items);
}

#[test]
fn test_hash_is_deterministic() {
    let text = "id: alice";
    let spans = vec![EntitySpan::new("USER", 4, 9, 1.0)];
    let configs = OperatorConfigs::new().with(
        "USER",
        OperatorConfig::new("hash").with_param("salt", "pepper"),
    );

    let first = engine().anonymize(text, &spans, &configs).unwrap();
    let second = engine().anonymize(text, &spans, &configs).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.items[0].text.len(), 64);
}

#[test]
fn test_empty_spans_return_input_unchanged() {
    let result = engine()
        .anonymize("Nothing to see", &[], &OperatorConfigs::new())
        .unwrap();
    assert_eq!(result.text, "Nothing to see");
    assert!(result.items.is_empty());
}

#[test]
fn test_unicode_offsets() {
    let text = "Grüße an Zoë in Zürich 🎉";
    let spans = vec![
        EntitySpan::new("PERSON", 9, 12, 0.9),
        EntitySpan::new("LOCATION", 16, 22, 0.9),
    ];

    let result = engine()
        .anonymize(text, &spans, &OperatorConfigs::new())
        .unwrap();

    assert_eq!(result.text, "Grüße an <PERSON> in <LOCATION> 🎉");
    assert_items_consistent(&result.text, &result.items);
}

#[test]
fn test_span_past_text_is_invalid() {
    let spans = vec![EntitySpan::new("PERSON", 3, 40, 0.9)];
    let err = engine()
        .anonymize("short", &spans, &OperatorConfigs::new())
        .unwrap_err();
    assert!(matches!(err, ShroudError::InvalidSpan(_)));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn test_encrypt_decrypt_round_trip() {
    let text = "Patient Emily Carter, phone 734-555-9284.";
    let spans = vec![
        EntitySpan::new("PERSON", 8, 20, 0.9),
        EntitySpan::new("PHONE_NUMBER", 28, 40, 0.9),
    ];
    let configs = OperatorConfigs::new().with(
        DEFAULT_ENTITY,
        OperatorConfig::new("encrypt").with_param("key", KEY),
    );
    let anonymized = engine().anonymize(text, &spans, &configs).unwrap();
    assert!(!anonymized.text.contains("Emily"));

    let deanonymizers = OperatorConfigs::new().with(
        DEFAULT_ENTITY,
        OperatorConfig::new("decrypt").with_param("key", KEY),
    );
    let restored = engine()
        .deanonymize(&anonymized.text, &anonymized.items, &deanonymizers)
        .unwrap();

    assert_eq!(restored.text, text);
    assert_items_consistent(&restored.text, &restored.items);
}

#[test]
fn test_decrypt_with_wrong_key_fails() {
    let text = "Emily";
    let spans = vec![EntitySpan::new("PERSON", 0, 5, 0.9)];
    let configs = OperatorConfigs::new().with(
        "PERSON",
        OperatorConfig::new("encrypt").with_param("key", KEY),
    );
    let anonymized = engine().anonymize(text, &spans, &configs).unwrap();

    let deanonymizers = OperatorConfigs::new().with(
        "PERSON",
        OperatorConfig::new("decrypt").with_param("key", "0123456789abcdef"),
    );
    let err = engine()
        .deanonymize(&anonymized.text, &anonymized.items, &deanonymizers)
        .unwrap_err();
    assert!(matches!(err, ShroudError::InvalidParam(_)));
}

#[test]
fn test_keep_round_trip() {
    let text = "Meet me in Paris";
    let spans = vec![EntitySpan::new("LOCATION", 11, 16, 0.7)];
    let configs = OperatorConfigs::new().with("LOCATION", OperatorConfig::new("keep"));

    let anonymized = engine().anonymize(text, &spans, &configs).unwrap();
    let restored = engine()
        .deanonymize(&anonymized.text, &anonymized.items, &OperatorConfigs::new())
        .unwrap();

    assert_eq!(restored.text, text);
}

#[test_case("genz" ; "genz")]
#[test_case("replace" ; "replace")]
#[test_case("mask" ; "mask")]
#[test_case("hash" ; "hash")]
#[test_case("redact" ; "redact")]
fn test_one_way_operators_not_reversible(operator: &str) {
    let entities = vec![AnonymizedEntity::new("PERSON", 0, 4, operator, "xxxx")];
    let configs = OperatorConfigs::new().with(DEFAULT_ENTITY, OperatorConfig::new("keep"));

    let err = engine()
        .deanonymize("xxxx tail", &entities, &configs)
        .unwrap_err();

    match err {
        ShroudError::OperatorNotReversible {
            operator: reported, ..
        } => assert_eq!(reported, operator),
        other => panic!("expected OperatorNotReversible, got {other:?}"),
    }
}

#[test]
fn test_failed_call_returns_no_partial_result() {
    let text = "Emily and Bob";
    let spans = vec![
        EntitySpan::new("PERSON", 0, 5, 0.9),
        EntitySpan::new("NAME", 10, 13, 0.9),
    ];
    let configs = OperatorConfigs::new()
        .with("PERSON", OperatorConfig::new("redact"))
        .with("NAME", OperatorConfig::new("encrypt").with_param("key", "too-short"));

    assert!(engine().anonymize(text, &spans, &configs).is_err());
}

#[test]
fn test_seeded_engines_agree() {
    let text = "Call Emily at 577-988-1234";
    let spans = vec![
        EntitySpan::new("PERSON", 5, 10, 0.85),
        EntitySpan::new("PHONE_NUMBER", 14, 26, 0.95),
    ];
    let configs = OperatorConfigs::new().with(DEFAULT_ENTITY, OperatorConfig::new("genz"));

    let a = engine().with_seed(Some(99)).anonymize(text, &spans, &configs).unwrap();
    let b = engine().with_seed(Some(99)).anonymize(text, &spans, &configs).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_seeded_engines_never_repeat_nonces() {
    use base64::{engine::general_purpose::STANDARD, Engine};

    let configs = OperatorConfigs::new().with(
        DEFAULT_ENTITY,
        OperatorConfig::new("encrypt").with_param("key", KEY),
    );
    let nonce = |text: &str| {
        let spans = vec![EntitySpan::new("PERSON", 0, text.chars().count(), 0.9)];
        let result = engine()
            .with_seed(Some(99))
            .anonymize(text, &spans, &configs)
            .unwrap();
        STANDARD.decode(&result.items[0].text).unwrap()[..12].to_vec()
    };

    assert_ne!(nonce("Alice Smith"), nonce("Bobby Jones"));
}

#[test]
fn test_nested_entity_is_anonymized_with_its_container() {
    let text = "Ship to 221B Baker Street, London";
    let spans = vec![
        EntitySpan::new("ADDRESS", 8, 33, 0.4),
        EntitySpan::new("LOCATION", 27, 33, 0.9),
    ];

    let result = engine()
        .anonymize(text, &spans, &OperatorConfigs::new())
        .unwrap();

    assert_eq!(result.text, "Ship to <ADDRESS>");
    assert_eq!(result.items.len(), 1);
}
