//! # aon-core
//!
//! Encoder and decoder for **AON (Aligned Object Notation)** — a
//! human-readable, indentation-structured rendering of JSON data. AON wraps
//! a JSON value under a caller-supplied root name and converts back
//! losslessly: nesting is expressed by two-space indentation and `- ` list
//! markers instead of bracket punctuation.
//!
//! ## Quick start
//!
//! ```rust
//! use aon_core::{json_to_aon, aon_to_json};
//!
//! // JSON → AON
//! let aon = json_to_aon(r#"[{"id":1,"nome":"Alice"}]"#, "users").unwrap();
//! assert_eq!(aon, "users:\n  - id: 1\n    nome: \"Alice\"");
//!
//! // AON → JSON (roundtrip, key order preserved)
//! let json = aon_to_json(&aon).unwrap();
//! assert_eq!(json, r#"[{"id":1,"nome":"Alice"}]"#);
//! ```
//!
//! Both directions share the [`Value`] tree, so anything representable in
//! JSON is representable in AON and vice versa. All numbers normalize to
//! `f64` (integers outside ±2^53 lose exactness); object key order and array
//! order survive every transformation.
//!
//! ## Diagnostics
//!
//! The façade functions route failures into an [`ErrorSink`] before
//! propagating them, mirroring the classic `lastError()` call shape: the
//! process-wide sink answers [`last_error`], and a successful call clears
//! it. Callers in concurrency-sensitive code should pass their own sink to
//! the `*_with_sink` variants instead — the global sink is last-writer-wins
//! across threads.
//!
//! ## Modules
//!
//! - [`json`] — hand-rolled JSON decoder/encoder (byte-offset errors)
//! - [`decoder`] — AON text → `(root name, Value)` (line-number errors)
//! - [`encoder`] — `(root name, Value)` → AON text
//! - [`value`] — the shared [`Value`] tree
//! - [`error`] — error taxonomy for all of the above
//! - [`sink`] — the last-error diagnostics sink

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
pub mod sink;
pub mod value;

pub use decoder::{decode_aon, decode_aon_with_depth_limit};
pub use encoder::encode_aon;
pub use error::{AonError, Result};
pub use json::{decode_json, decode_json_with_depth_limit, encode_json};
pub use sink::ErrorSink;
pub use value::Value;

/// Default bound on container nesting enforced by both decoders. Malformed,
/// deeply nested input is the one resource risk in an otherwise
/// input-bounded computation; the `*_with_depth_limit` variants override it
/// per call.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Convert a JSON document to AON text wrapped under `root_name`.
///
/// Fails if `json` is not valid JSON. The failure is recorded in the
/// process-wide sink (see [`last_error`]) and returned. An empty `root_name`
/// is accepted (it renders as the quoted key `""`), but callers should treat
/// a meaningful name as required for meaningful output.
pub fn json_to_aon(json: &str, root_name: &str) -> Result<String> {
    json_to_aon_with_sink(json, root_name, ErrorSink::global())
}

/// [`json_to_aon`] with an injected diagnostics sink.
pub fn json_to_aon_with_sink(json: &str, root_name: &str, sink: &ErrorSink) -> Result<String> {
    sink.clear();
    json::decode_json(json)
        .and_then(|value| encoder::encode_aon(root_name, &value))
        .map_err(|e| {
            sink.record(e.to_string());
            e
        })
}

/// Convert AON text back to minified JSON, discarding the root name (JSON
/// has no named document root).
///
/// Fails if `aon` is not valid AON. The failure is recorded in the
/// process-wide sink (see [`last_error`]) and returned.
pub fn aon_to_json(aon: &str) -> Result<String> {
    aon_to_json_with_sink(aon, ErrorSink::global())
}

/// [`aon_to_json`] with an injected diagnostics sink.
pub fn aon_to_json_with_sink(aon: &str, sink: &ErrorSink) -> Result<String> {
    sink.clear();
    decoder::decode_aon(aon)
        .map(|(_, value)| json::encode_json(&value))
        .map_err(|e| {
            sink.record(e.to_string());
            e
        })
}

/// The most recent failure message recorded by the façade functions, or
/// `None` if no call has failed since the last successful one.
pub fn last_error() -> Option<String> {
    ErrorSink::global().last()
}
