//! The shared value tree both notations decode into and encode from.
//!
//! Objects are an insertion-ordered pair vector rather than a map: AON output
//! order must equal JSON input order (and vice versa), so the representation
//! carries order without depending on an external map crate.

/// A JSON-compatible datum, produced by either decoder and consumed by either
/// encoder.
///
/// All numbers are stored as `f64` — JSON numbers normalize to double
/// precision, so integers outside ±2^53 lose exact representation. That is a
/// documented limitation of the format, not something the codec papers over.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    /// Key-value pairs in insertion order. Keys are unique within one object;
    /// the decoders enforce this with a last-write-wins policy.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Look up a member of an object by key. Returns `None` for non-objects
    /// and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// True for `Null`, `Bool`, `Number`, and `String` — values that render
    /// inline on a single AON line.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Value::Array(_) | Value::Object(_))
    }

    /// Insert `(key, value)` into an object member list with last-write-wins
    /// semantics: a duplicate key replaces the earlier value but keeps the
    /// first occurrence's position.
    pub(crate) fn insert_member(members: &mut Vec<(String, Value)>, key: String, value: Value) {
        if let Some(slot) = members.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            members.push((key, value));
        }
    }
}

/// Equality is order-insensitive for objects and order-sensitive for arrays.
/// Serialization preserves object order, equality ignores it — round-trip
/// tests need exactly this distinction.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(key, val)| {
                        b.iter().any(|(k, v)| k == key && v == val)
                    })
            }
            _ => false,
        }
    }
}
