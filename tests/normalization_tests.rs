//! Integration tests for relaxed normalization

mod common;

use bibrelax::{normalize_batch, normalize_relaxed};
use common::{record, relaxed_rfc_record, synthetic_record};
use serde_json::json;

#[test]
fn test_normalize_realistic_record() {
    let mut data = relaxed_rfc_record();
    normalize_relaxed(&mut data).expect("normalization should succeed");

    assert_eq!(data["version"], json!([{"draft": "2018-08"}]));
    assert_eq!(data["edition"], json!({"content": "1"}));
    assert_eq!(data["keyword"], json!(["TLS", "security"]));

    let author = &data["contributor"][0];
    assert_eq!(author["role"], json!([{"type": "author"}]));
    assert_eq!(
        author["person"]["contact"],
        json!([{"email": "ekr@rtfm.com"}, {"phone": {"content": "+1 555 0100"}}])
    );
    assert_eq!(
        author["person"]["name"]["given"]["forename"],
        json!([{"content": "", "initial": "E"}])
    );

    let publisher = &data["contributor"][1];
    assert_eq!(
        publisher["organization"]["contact"],
        json!([{"address": {"city": "Marina del Rey", "country": "US"}}])
    );
    assert_eq!(
        data["contributor"][2]["role"][1],
        json!({"description": r#"{"note":"stream"}"#})
    );

    // The relation without a bibitem is dropped; the other is normalized.
    assert_eq!(data["relation"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["relation"][0]["bibitem"]["version"], json!([{"draft": "2008-01"}]));

    // Keys the normalizer does not know are untouched.
    assert_eq!(data["fetched"], json!("2024-01-01"));
}

#[test]
fn test_key_order_is_preserved() {
    let mut data = relaxed_rfc_record();
    let before: Vec<String> = data.keys().cloned().collect();
    normalize_relaxed(&mut data).unwrap();
    let after: Vec<String> = data.keys().cloned().collect();
    assert_eq!(before, after);
}

#[test]
fn test_normalize_is_idempotent_on_realistic_record() {
    let mut data = relaxed_rfc_record();
    normalize_relaxed(&mut data).unwrap();
    let once = data.clone();
    normalize_relaxed(&mut data).unwrap();
    assert_eq!(data, once);
}

#[test]
fn test_empty_record_is_unchanged() {
    let mut data = record(json!({}));
    normalize_relaxed(&mut data).unwrap();
    assert!(data.is_empty());
}

#[test]
fn test_null_and_empty_fields_are_left_alone() {
    let mut data = record(json!({
        "version": null,
        "edition": "",
        "keyword": [],
        "contributor": null,
        "relation": []
    }));
    let before = data.clone();
    normalize_relaxed(&mut data).unwrap();
    assert_eq!(data, before);
}

#[test]
fn test_only_string_versions_rewritten() {
    // Only string entries are rewritten.
    let mut data = record(json!({"version": ["d1", {"draft": "d2"}, 7]}));
    normalize_relaxed(&mut data).unwrap();
    assert_eq!(data["version"], json!([{"draft": "d1"}, {"draft": "d2"}, 7]));

    let mut data = record(json!({"version": 3}));
    normalize_relaxed(&mut data).unwrap();
    assert_eq!(data["version"], json!([3]));
}

#[test]
fn test_unrecognized_contact_passes_through() {
    let mut data = record(json!({
        "contributor": [{
            "organization": {"name": {"content": "X"}, "contact": [{"fax": "123"}]},
            "role": "publisher"
        }]
    }));
    normalize_relaxed(&mut data).unwrap();
    assert_eq!(data["contributor"][0]["organization"]["contact"], json!([{"fax": "123"}]));
}

#[test]
fn test_deeply_nested_relations() {
    let mut data = synthetic_record(2, 4);
    normalize_relaxed(&mut data).unwrap();

    let mut item = &data;
    for _ in 0..4 {
        assert_eq!(item["version"], json!([{"draft": "draft"}]));
        assert_eq!(
            item["contributor"][1]["person"]["contact"],
            json!([{"email": "a1@example.org"}])
        );
        item = item["relation"][0]["bibitem"]
            .as_object()
            .expect("nested bibitem is a mapping");
    }
    assert!(!item.contains_key("relation"));
}

#[test]
fn test_normalize_batch_matches_sequential() {
    let mut batch: Vec<_> = (0..16).map(|i| synthetic_record(i % 4, i % 3)).collect();
    let mut sequential = batch.clone();

    let results = normalize_batch(&mut batch);
    assert!(results.iter().all(Result::is_ok));

    for data in &mut sequential {
        normalize_relaxed(data).unwrap();
    }
    assert_eq!(batch, sequential);
}
