//! AON encoder — renders a root name plus a [`Value`] tree as AON text.
//!
//! Layout rules, the exact left inverse of the decoder:
//!
//! - The root line is `<rootName>:`; a scalar root rides it inline, a
//!   container root gets a block one indent unit (two spaces) deeper.
//! - Object members render one `key:` line each, in stored order; scalar
//!   values inline (`key: 42`), container values as a further-indented block.
//! - Array elements render one `- ` marker each; a nested array chains
//!   markers (`- - 1`), and an object element puts its first member on the
//!   marker line with sibling members aligned beneath it.
//! - Strings are ALWAYS double-quoted, even when harmless, so a value like
//!   `"- "` can never be mistaken for a list marker.
//! - Empty containers render as the scalar tokens `{}` and `[]` — the line
//!   grammar has no other way to tell them apart.

use crate::error::Result;
use crate::json::{format_number, write_quoted};
use crate::value::Value;

/// Encode `(root_name, value)` as AON text. No trailing newline.
///
/// The `Result` keeps the reserved encoding-error channel open; with the
/// current matching type sets every input succeeds.
pub fn encode_aon(root_name: &str, value: &Value) -> Result<String> {
    let mut out = String::new();
    write_key(root_name, &mut out);
    match scalar_token(value) {
        Some(token) => {
            out.push_str(": ");
            out.push_str(&token);
        }
        None => {
            out.push(':');
            write_block(value, 1, &mut out);
        }
    }
    Ok(out)
}

/// Emit a non-empty container as indented lines below the current one.
fn write_block(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Object(members) => {
            for (key, val) in members {
                out.push('\n');
                push_indent(depth, out);
                write_member(key, val, depth, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                out.push('\n');
                push_indent(depth, out);
                out.push_str("- ");
                write_element(item, depth + 1, out);
            }
        }
        // Scalars never reach here; callers inline them.
        _ => {}
    }
}

/// Emit one object member, continuing the current line at the key position.
fn write_member(key: &str, value: &Value, depth: usize, out: &mut String) {
    write_key(key, out);
    match scalar_token(value) {
        Some(token) => {
            out.push_str(": ");
            out.push_str(&token);
        }
        None => {
            out.push(':');
            write_block(value, depth + 1, out);
        }
    }
}

/// Emit one array element, continuing the current marker line. `depth` is
/// the element's own block depth: the column right after the marker, where
/// an object element's sibling members align.
fn write_element(value: &Value, depth: usize, out: &mut String) {
    if let Some(token) = scalar_token(value) {
        out.push_str(&token);
        return;
    }
    match value {
        Value::Object(members) => {
            for (i, (key, val)) in members.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    push_indent(depth, out);
                }
                write_member(key, val, depth, out);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                    push_indent(depth, out);
                }
                out.push_str("- ");
                write_element(item, depth + 1, out);
            }
        }
        _ => {}
    }
}

/// The inline form of a value, if it has one: scalars and empty containers.
fn scalar_token(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some("null".to_string()),
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        Value::Number(n) => Some(format_number(*n)),
        Value::String(s) => {
            let mut quoted = String::with_capacity(s.len() + 2);
            write_quoted(s, &mut quoted);
            Some(quoted)
        }
        Value::Object(members) if members.is_empty() => Some("{}".to_string()),
        Value::Array(items) if items.is_empty() => Some("[]".to_string()),
        _ => None,
    }
}

/// Emit a key, bare when it cannot collide with the line grammar, quoted
/// with the JSON escape rules otherwise (Unicode keys always round-trip).
fn write_key(key: &str, out: &mut String) {
    if is_bare_key(key) {
        out.push_str(key);
    } else {
        write_quoted(key, out);
    }
}

/// Bare keys match `[A-Za-z_][A-Za-z0-9_.-]*`.
fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
