//! Hand-rolled JSON decoder and encoder.
//!
//! The decoder is a byte-offset lexer feeding recursive descent over the JSON
//! grammar: object, array, string, number, `true`/`false`/`null`. Every
//! failure carries the byte offset of the offending input so callers can
//! point at the exact spot.
//!
//! This module also owns the two helpers both notations share, because AON
//! strings use JSON's escape rules and AON numbers use JSON's formatting:
//!
//! - [`scan_string_body`] — unescape a double-quoted string body
//! - [`write_quoted`] / [`format_number`] — the encoder-side counterparts

use crate::error::{AonError, Result};
use crate::value::Value;

/// Decode JSON text into a [`Value`] tree using the default nesting limit.
pub fn decode_json(text: &str) -> Result<Value> {
    decode_json_with_depth_limit(text, crate::DEFAULT_MAX_DEPTH)
}

/// Decode JSON text, refusing containers nested deeper than `max_depth`.
///
/// Duplicate keys within one object resolve last-write-wins; the first
/// occurrence keeps its position. Anything else off-grammar fails with the
/// byte offset of the offending token.
pub fn decode_json_with_depth_limit(text: &str, max_depth: usize) -> Result<Value> {
    let mut parser = Parser {
        text,
        bytes: text.as_bytes(),
        pos: 0,
        max_depth,
    };
    parser.skip_whitespace();
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();
    if parser.pos != parser.bytes.len() {
        return Err(parser.error("trailing content after top-level value"));
    }
    Ok(value)
}

/// Encode a [`Value`] tree as minified JSON text.
///
/// Deterministic: objects render keys in stored order, arrays in stored
/// order, numbers as the shortest decimal that parses back to the same
/// double. The output is directly re-parseable JSON.
pub fn encode_json(value: &Value) -> String {
    let mut out = String::new();
    write_json(value, &mut out);
    out
}

fn write_json(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => write_quoted(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(item, out);
            }
            out.push(']');
        }
        Value::Object(members) => {
            out.push('{');
            for (i, (key, val)) in members.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_quoted(key, out);
                out.push(':');
                write_json(val, out);
            }
            out.push('}');
        }
    }
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> AonError {
        AonError::JsonSyntax {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// `depth` counts enclosing containers; opening one more past
    /// `max_depth` is refused so malformed deeply-nested input cannot
    /// exhaust the stack.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            Some(b'"') => self.parse_string().map(Value::String),
            Some(b't') => self.parse_keyword("true", Value::Bool(true)),
            Some(b'f') => self.parse_keyword("false", Value::Bool(false)),
            Some(b'n') => self.parse_keyword("null", Value::Null),
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number().map(Value::Number),
            Some(b) => Err(self.error(format!("unexpected character '{}'", b as char))),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(self.error(format!(
                "nesting depth limit of {} exceeded",
                self.max_depth
            )));
        }
        Ok(())
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        self.pos += 1; // consume '{'
        let mut members: Vec<(String, Value)> = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(Value::Object(members));
        }
        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error("expected object key"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_whitespace();
            let value = self.parse_value(depth + 1)?;
            Value::insert_member(&mut members, key, value);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(members));
                }
                None => return Err(self.error("unexpected end of input")),
                Some(_) => return Err(self.error("expected ',' or '}' in object")),
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        self.check_depth(depth)?;
        self.pos += 1; // consume '['
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(Value::Array(items));
        }
        loop {
            self.skip_whitespace();
            items.push(self.parse_value(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error("unexpected end of input")),
                Some(_) => return Err(self.error("expected ',' or ']' in array")),
            }
        }
    }

    fn parse_keyword(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.text[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(value)
        } else {
            Err(self.error("unexpected token"))
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        // self.pos is at the opening quote
        match scan_string_body(self.text, self.pos + 1) {
            Ok((s, end)) => {
                self.pos = end;
                Ok(s)
            }
            Err((offset, message)) => Err(AonError::JsonSyntax { offset, message }),
        }
    }

    fn parse_number(&mut self) -> Result<f64> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        // Integer part: '0' alone, or a nonzero digit followed by digits
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.consume_digits(),
            _ => return Err(self.error("invalid number")),
        }
        // Fraction
        if self.peek() == Some(b'.') {
            self.pos += 1;
            match self.peek() {
                Some(b'0'..=b'9') => self.consume_digits(),
                _ => return Err(self.error("expected digit after decimal point")),
            }
        }
        // Exponent
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            match self.peek() {
                Some(b'0'..=b'9') => self.consume_digits(),
                _ => return Err(self.error("expected digit in exponent")),
            }
        }
        let literal = &self.text[start..self.pos];
        let parsed: f64 = literal.parse().map_err(|_| AonError::JsonSyntax {
            offset: start,
            message: format!("invalid number '{literal}'"),
        })?;
        if !parsed.is_finite() {
            return Err(AonError::JsonSyntax {
                offset: start,
                message: format!("number '{literal}' out of range"),
            });
        }
        Ok(parsed)
    }

    fn consume_digits(&mut self) {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
    }
}

/// Unescape the body of a double-quoted string.
///
/// `start` indexes just past the opening quote. Returns the decoded string
/// and the index just past the closing quote. Handles the full JSON escape
/// set (`\" \\ \/ \b \f \n \r \t \uXXXX` with surrogate pairs) and rejects
/// unescaped control characters and lone surrogates. Errors carry the
/// absolute byte offset of the problem.
///
/// AON string scalars and quoted keys use exactly the same rules, so the AON
/// decoder calls this too.
pub(crate) fn scan_string_body(
    text: &str,
    start: usize,
) -> std::result::Result<(String, usize), (usize, String)> {
    let bytes = text.as_bytes();
    let mut out = String::new();
    let mut segment_start = start;
    let mut i = start;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                out.push_str(&text[segment_start..i]);
                return Ok((out, i + 1));
            }
            b'\\' => {
                out.push_str(&text[segment_start..i]);
                let escape_at = i;
                i += 1;
                let decoded = match bytes.get(i) {
                    Some(b'"') => '"',
                    Some(b'\\') => '\\',
                    Some(b'/') => '/',
                    Some(b'b') => '\u{08}',
                    Some(b'f') => '\u{0c}',
                    Some(b'n') => '\n',
                    Some(b'r') => '\r',
                    Some(b't') => '\t',
                    Some(b'u') => {
                        let (ch, next) = scan_unicode_escape(text, escape_at)?;
                        out.push(ch);
                        i = next;
                        segment_start = i;
                        continue;
                    }
                    Some(_) => return Err((escape_at, "invalid escape sequence".to_string())),
                    None => return Err((escape_at, "unterminated string".to_string())),
                };
                out.push(decoded);
                i += 1;
                segment_start = i;
            }
            b if b < 0x20 => {
                return Err((i, "unescaped control character in string".to_string()));
            }
            _ => i += 1,
        }
    }
    Err((start.saturating_sub(1), "unterminated string".to_string()))
}

/// Decode `\uXXXX` (and a following low surrogate when needed) starting at
/// the backslash. Returns the character and the index just past the escape.
fn scan_unicode_escape(
    text: &str,
    escape_at: usize,
) -> std::result::Result<(char, usize), (usize, String)> {
    let first = read_hex4(text, escape_at + 2)
        .ok_or_else(|| (escape_at, "invalid \\u escape".to_string()))?;
    let mut next = escape_at + 6;

    let code_point = match first {
        0xD800..=0xDBFF => {
            // High surrogate: a low surrogate escape must follow
            if !text[next.min(text.len())..].starts_with("\\u") {
                return Err((escape_at, "unpaired surrogate in \\u escape".to_string()));
            }
            let low = read_hex4(text, next + 2)
                .ok_or_else(|| (next, "invalid \\u escape".to_string()))?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err((next, "unpaired surrogate in \\u escape".to_string()));
            }
            next += 6;
            0x10000 + ((first - 0xD800) << 10) + (low - 0xDC00)
        }
        0xDC00..=0xDFFF => {
            return Err((escape_at, "unpaired surrogate in \\u escape".to_string()));
        }
        cp => cp,
    };

    match char::from_u32(code_point) {
        Some(ch) => Ok((ch, next)),
        None => Err((escape_at, "invalid \\u escape".to_string())),
    }
}

fn read_hex4(text: &str, at: usize) -> Option<u32> {
    let digits = text.get(at..at + 4)?;
    u32::from_str_radix(digits, 16).ok()
}

/// Write `s` as a double-quoted string, escaping quotes, backslashes, and
/// control characters. Non-ASCII code points are emitted raw: both notations
/// are UTF-8 text, so there is nothing to protect.
pub(crate) fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Format a stored double as the shortest decimal that parses back to the
/// same value. Whole numbers inside the exactly-representable ±2^53 range
/// print without a fractional part; `-0` normalizes to `0`. Non-finite
/// values cannot be produced by the decoders, so they render as `null`
/// rather than emitting invalid JSON.
pub(crate) fn format_number(f: f64) -> String {
    if !f.is_finite() {
        return "null".to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }
    if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 {
        return format!("{}", f as i64);
    }
    // Rust's Display for f64 is the shortest representation that
    // round-trips, and never uses exponent notation.
    format!("{f}")
}
