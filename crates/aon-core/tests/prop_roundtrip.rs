//! Property-based roundtrip tests.
//!
//! Generates random [`Value`] trees and verifies the two inverse pairs:
//! `decode_aon(encode_aon(r, v)) == (r, v)` and
//! `decode_json(encode_json(v)) == v`. Number formatting is
//! shortest-roundtrip, so arbitrary finite doubles are fair game — no
//! precision carve-outs needed.

use aon_core::{aon_to_json, decode_aon, decode_json, encode_aon, encode_json, json_to_aon, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Object keys, including every shape that forces quoting.
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_.-]{0,12}").unwrap(),
        1 => Just(String::new()),
        1 => Just("my key".to_string()),
        1 => Just("a:b".to_string()),
        1 => Just("- ".to_string()),
        1 => Just("café".to_string()),
        1 => Just("say \"hi\"".to_string()),
        1 => Just("1leading".to_string()),
    ]
}

/// String values with grammar-colliding and escape-heavy edge cases.
fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-zA-Z0-9 :,.{}\\[\\]-]{0,24}").unwrap(),
        1 => Just(String::new()),
        1 => Just("true".to_string()),
        1 => Just("null".to_string()),
        1 => Just("42".to_string()),
        1 => Just("-3.5".to_string()),
        1 => Just("- ".to_string()),
        1 => Just("key: value".to_string()),
        1 => Just(" padded ".to_string()),
        1 => Just("line1\nline2".to_string()),
        1 => Just("col1\tcol2".to_string()),
        1 => Just("path\\to\\file".to_string()),
        1 => Just("say \"hi\"".to_string()),
        1 => Just("caf\u{00e9} \u{4f60}\u{597d} \u{1f600}".to_string()),
        1 => Just("\u{01}\u{08}\u{0c}\u{1f}".to_string()),
    ]
}

fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        3 => (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64),
        2 => any::<f64>().prop_filter("finite numbers only", |f| f.is_finite()),
    ]
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        arb_number().prop_map(Value::Number),
        arb_string().prop_map(Value::String),
    ]
}

/// Arbitrary value trees up to 4 container levels deep. Object keys are
/// deduplicated (first occurrence wins) to respect the uniqueness invariant.
fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| {
                let mut members: Vec<(String, Value)> = Vec::new();
                for (key, value) in pairs {
                    if !members.iter().any(|(k, _)| *k == key) {
                        members.push((key, value));
                    }
                }
                Value::Object(members)
            }),
        ]
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn aon_roundtrip_is_exact(root in arb_key(), value in arb_value()) {
        let text = encode_aon(&root, &value).unwrap();
        let (name, decoded) = decode_aon(&text)
            .unwrap_or_else(|e| panic!("decode failed: {e}\nAON:\n{text}"));
        prop_assert_eq!(&name, &root, "root name mangled, AON:\n{}", text);
        prop_assert_eq!(&decoded, &value, "value mangled, AON:\n{}", text);
    }

    #[test]
    fn json_roundtrip_is_exact(value in arb_value()) {
        let text = encode_json(&value);
        let decoded = decode_json(&text)
            .unwrap_or_else(|e| panic!("decode failed: {e}\nJSON: {text}"));
        prop_assert_eq!(&decoded, &value, "value mangled, JSON: {}", text);
    }

    #[test]
    fn facade_composition_preserves_values(value in arb_value()) {
        let json = encode_json(&value);
        let aon = json_to_aon(&json, "root").unwrap();
        let back = aon_to_json(&aon).unwrap();
        let reparsed = decode_json(&back).unwrap();
        prop_assert_eq!(&reparsed, &value, "mangled via facade, AON:\n{}", aon);
    }

    #[test]
    fn reencoding_decoded_aon_is_stable(root in arb_key(), value in arb_value()) {
        // AON-first formulation: re-encoding a decoded document produces
        // text that decodes to the same (name, value) pair.
        let first = encode_aon(&root, &value).unwrap();
        let (name, decoded) = decode_aon(&first).unwrap();
        let second = encode_aon(&name, &decoded).unwrap();
        prop_assert_eq!(&first, &second);
    }
}
