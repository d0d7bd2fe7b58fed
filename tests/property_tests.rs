//! Property tests for normalization and lenient construction

use bibrelax::{construct_bibitem, normalize_relaxed, BibError, RawRecord, ValidationMode};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

const NORMALIZER_KEYS: [&str; 14] = [
    "type", "value", "content", "person", "organization", "name", "given", "forename", "contact",
    "role", "phone", "email", "city", "bibitem",
];

const RECORD_FIELDS: [&str; 8] =
    ["version", "edition", "keyword", "contributor", "relation", "docid", "title", "id"];

/// Mapping keys, biased towards the ones the normalizer looks at.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => prop::sample::select(NORMALIZER_KEYS.to_vec()).prop_map(str::to_string),
        1 => "[a-z]{1,6}",
    ]
}

/// Arbitrary JSON trees.
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        Just(Value::String(String::new())),
        "[a-z@.]{1,8}".prop_map(Value::String),
        Just(json!("email")),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..5)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Records built from the fields normalization rewrites.
fn arb_record() -> impl Strategy<Value = RawRecord> {
    let field = prop::sample::select(RECORD_FIELDS.to_vec());
    prop::collection::vec((field, arb_value()), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect::<Map<String, Value>>()
    })
}

proptest! {
    #[test]
    fn normalization_is_idempotent(record in arb_record()) {
        let mut once = record;
        // Records that fail part way are not required to be idempotent.
        prop_assume!(normalize_relaxed(&mut once).is_ok());
        let mut twice = once.clone();
        prop_assert!(normalize_relaxed(&mut twice).is_ok());
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn normalization_only_fails_with_type_mismatch(record in arb_record()) {
        let mut record = record;
        if let Err(err) = normalize_relaxed(&mut record) {
            prop_assert!(err.is_type_mismatch(), "unexpected error: {}", err);
        }
    }

    #[test]
    fn lenient_construction_never_fails(record in arb_record()) {
        let mut record = record;
        let result = construct_bibitem(&mut record, ValidationMode::Lenient);
        prop_assert!(result.is_ok(), "lenient construction failed: {:?}", result.err());
    }

    #[test]
    fn strict_failure_implies_lenient_issues(record in arb_record()) {
        let mut strict = record.clone();
        let mut lenient = record;
        let strict_result = construct_bibitem(&mut strict, ValidationMode::Strict);
        let (_, issues) = construct_bibitem(&mut lenient, ValidationMode::Lenient).unwrap();

        match strict_result {
            Ok(_) => prop_assert!(issues.is_none()),
            Err(BibError::SchemaValidation(errors)) => {
                prop_assert_eq!(Some(errors.into_issues()), issues);
            },
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}
