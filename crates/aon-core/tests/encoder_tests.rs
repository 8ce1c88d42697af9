use aon_core::{encode_aon, Value};

fn obj(pairs: &[(&str, Value)]) -> Value {
    Value::Object(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

fn s(text: &str) -> Value {
    Value::String(text.to_string())
}

fn n(num: f64) -> Value {
    Value::Number(num)
}

// ============================================================================
// Roots
// ============================================================================

#[test]
fn encode_scalar_root_inline() {
    assert_eq!(encode_aon("answer", &n(42.0)).unwrap(), "answer: 42");
    assert_eq!(encode_aon("ok", &Value::Bool(true)).unwrap(), "ok: true");
    assert_eq!(encode_aon("nothing", &Value::Null).unwrap(), "nothing: null");
    assert_eq!(encode_aon("name", &s("Alice")).unwrap(), "name: \"Alice\"");
}

#[test]
fn encode_empty_containers_inline() {
    assert_eq!(encode_aon("o", &Value::Object(vec![])).unwrap(), "o: {}");
    assert_eq!(encode_aon("a", &Value::Array(vec![])).unwrap(), "a: []");
}

#[test]
fn encode_empty_root_name_is_quoted() {
    assert_eq!(encode_aon("", &n(1.0)).unwrap(), "\"\": 1");
}

#[test]
fn encode_root_name_with_spaces_is_quoted() {
    assert_eq!(encode_aon("my root", &n(1.0)).unwrap(), "\"my root\": 1");
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn encode_flat_object() {
    let v = obj(&[
        ("host", s("localhost")),
        ("port", n(8080.0)),
        ("debug", Value::Bool(false)),
    ]);
    assert_eq!(
        encode_aon("cfg", &v).unwrap(),
        "cfg:\n  host: \"localhost\"\n  port: 8080\n  debug: false"
    );
}

#[test]
fn encode_nested_object_blocks() {
    let v = obj(&[
        ("server", obj(&[("host", s("h")), ("port", n(80.0))])),
        ("debug", Value::Bool(true)),
    ]);
    assert_eq!(
        encode_aon("app", &v).unwrap(),
        "app:\n  server:\n    host: \"h\"\n    port: 80\n  debug: true"
    );
}

#[test]
fn encode_member_order_is_stored_order() {
    let v = obj(&[("z", n(1.0)), ("a", n(2.0)), ("m", n(3.0))]);
    assert_eq!(encode_aon("o", &v).unwrap(), "o:\n  z: 1\n  a: 2\n  m: 3");
}

#[test]
fn encode_key_quoting() {
    let v = obj(&[
        ("plain_key.v2", n(1.0)),
        ("my key", n(2.0)),
        ("a:b", n(3.0)),
        ("café", n(4.0)),
        ("- ", n(5.0)),
    ]);
    assert_eq!(
        encode_aon("o", &v).unwrap(),
        "o:\n  plain_key.v2: 1\n  \"my key\": 2\n  \"a:b\": 3\n  \"café\": 4\n  \"- \": 5"
    );
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn encode_scalar_array() {
    let v = Value::Array(vec![n(1.0), s("two"), Value::Bool(false), Value::Null]);
    assert_eq!(
        encode_aon("xs", &v).unwrap(),
        "xs:\n  - 1\n  - \"two\"\n  - false\n  - null"
    );
}

#[test]
fn encode_concrete_users_scenario() {
    let v = Value::Array(vec![obj(&[("id", n(1.0)), ("nome", s("Alice"))])]);
    assert_eq!(
        encode_aon("users", &v).unwrap(),
        "users:\n  - id: 1\n    nome: \"Alice\""
    );
}

#[test]
fn encode_nested_arrays_chain_markers() {
    let v = Value::Array(vec![
        Value::Array(vec![n(1.0), n(2.0)]),
        Value::Array(vec![n(3.0)]),
    ]);
    assert_eq!(
        encode_aon("m", &v).unwrap(),
        "m:\n  - - 1\n    - 2\n  - - 3"
    );
}

#[test]
fn encode_list_item_with_container_member() {
    let v = Value::Array(vec![obj(&[
        ("name", s("a")),
        ("tags", Value::Array(vec![s("x")])),
        ("meta", obj(&[("k", n(1.0))])),
    ])]);
    assert_eq!(
        encode_aon("items", &v).unwrap(),
        "items:\n  - name: \"a\"\n    tags:\n      - \"x\"\n    meta:\n      k: 1"
    );
}

// ============================================================================
// Strings and numbers
// ============================================================================

#[test]
fn strings_are_always_quoted() {
    // Values that would otherwise collide with the grammar.
    let v = Value::Array(vec![s("- "), s("true"), s("42"), s("k: v"), s("")]);
    assert_eq!(
        encode_aon("xs", &v).unwrap(),
        "xs:\n  - \"- \"\n  - \"true\"\n  - \"42\"\n  - \"k: v\"\n  - \"\""
    );
}

#[test]
fn string_escapes_match_json_rules() {
    let v = s("a\"b\\c\nd\té");
    assert_eq!(
        encode_aon("x", &v).unwrap(),
        "x: \"a\\\"b\\\\c\\nd\\té\""
    );
}

#[test]
fn encode_number_formatting() {
    let v = Value::Array(vec![n(1.5), n(100.0), n(-0.0), n(0.001)]);
    assert_eq!(
        encode_aon("ns", &v).unwrap(),
        "ns:\n  - 1.5\n  - 100\n  - 0\n  - 0.001"
    );
}

#[test]
fn no_trailing_newline() {
    let out = encode_aon("x", &obj(&[("a", n(1.0))])).unwrap();
    assert!(!out.ends_with('\n'));
}
