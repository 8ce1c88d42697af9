//! AON decoder — converts AON text into a root name plus a [`Value`] tree.
//!
//! AON nesting is defined by indentation depth, not brackets, so the decoder
//! is a line-driven stack machine rather than recursive descent: each line
//! tokenizes into (depth, list-marker count, content), and an explicit stack
//! of partially built containers absorbs it. Frame transitions are driven
//! purely by depth plus the `- ` marker, so no backtracking or lookahead
//! beyond the current line is ever needed.
//!
//! # Key design decisions
//!
//! - **Markers consume depth**: every `- ` on a line stands one indent unit
//!   deep, so `- - 1` is an array inside an array and a list-item object's
//!   sibling members align under the first member, two columns past the
//!   marker's own indent.
//! - **Attach-on-pop**: a frame remembers the key it will be stored under
//!   (`attach_key`); dedenting pops the frame and attaches the finished
//!   container to its parent. Opens are validated against the parent's open
//!   slot, so attachment never has to guess.
//! - **The document is an object frame at depth 0**: top-level lines are its
//!   members, which makes "exactly one root key" a plain member-count check.

use crate::error::{AonError, Result};
use crate::json::scan_string_body;
use crate::value::Value;

/// Decode AON text into `(root_name, value)` using the default nesting limit.
pub fn decode_aon(aon: &str) -> Result<(String, Value)> {
    decode_aon_with_depth_limit(aon, crate::DEFAULT_MAX_DEPTH)
}

/// Decode AON text, refusing blocks nested deeper than `max_depth`.
pub fn decode_aon_with_depth_limit(aon: &str, max_depth: usize) -> Result<(String, Value)> {
    let mut machine = Machine::new(max_depth);
    for (idx, raw) in aon.lines().enumerate() {
        machine.feed(raw, idx + 1)?;
    }
    machine.finish()
}

/// One open container on the stack.
struct Frame {
    /// Indentation depth of this container's own lines (members or markers).
    depth: usize,
    /// Key this container attaches under when popped; `None` when the parent
    /// is an array (the container is one of its elements).
    attach_key: Option<String>,
    building: Building,
}

enum Building {
    Object {
        members: Vec<(String, Value)>,
        /// Key from a `key:` line still waiting for its indented block,
        /// and the line it appeared on.
        pending: Option<(String, usize)>,
    },
    Array {
        items: Vec<Value>,
    },
}

impl Building {
    fn object() -> Building {
        Building::Object {
            members: Vec::new(),
            pending: None,
        }
    }

    fn array() -> Building {
        Building::Array { items: Vec::new() }
    }
}

/// Content of one line after indentation and markers are stripped.
enum Content<'a> {
    /// `key:` (inline `None`) or `key: <scalar>` (inline `Some`).
    Member { key: String, inline: Option<&'a str> },
    /// Bare scalar token — only valid directly after a `- ` marker.
    Scalar(&'a str),
}

struct Machine {
    frames: Vec<Frame>,
    max_depth: usize,
}

impl Machine {
    fn new(max_depth: usize) -> Machine {
        Machine {
            // Document frame: top-level lines are members of this object.
            frames: vec![Frame {
                depth: 0,
                attach_key: None,
                building: Building::object(),
            }],
            max_depth,
        }
    }

    fn feed(&mut self, raw: &str, line: usize) -> Result<()> {
        // Strings are always quoted, so trailing whitespace is never payload.
        let text = raw.trim_end();
        if text.is_empty() {
            return Ok(());
        }

        let indent = measure_indent(text, line)?;
        if indent % 2 != 0 {
            return Err(syntax(
                line,
                format!("indentation of {indent} is not a multiple of 2"),
            ));
        }
        let mut depth = indent / 2;
        let mut rest = &text[indent..];

        // Dedent: close everything deeper than this line.
        while self.top().depth > depth {
            self.close_top()?;
        }

        // Each `- ` marker stands one indent unit deep and selects (or opens)
        // the array whose elements live at that depth.
        let mut markers = 0usize;
        loop {
            if rest == "-" {
                return Err(syntax(line, "missing content after list marker"));
            }
            let Some(after) = rest.strip_prefix("- ") else {
                break;
            };
            self.enter_array(depth, markers == 0, line)?;
            depth += 1;
            markers += 1;
            rest = after;
            if rest.is_empty() {
                return Err(syntax(line, "missing content after list marker"));
            }
            if rest.starts_with(' ') {
                return Err(syntax(line, "unexpected space after list marker"));
            }
        }

        match parse_content(rest, line)? {
            Content::Scalar(token) => {
                if markers == 0 {
                    return Err(syntax(line, "expected a 'key:' line"));
                }
                let value = parse_scalar(token, line)?;
                if let Building::Array { items } = &mut self.top_mut().building {
                    items.push(value);
                }
            }
            Content::Member { key, inline } => {
                if markers > 0 {
                    // First member of a list-item object rides the marker line.
                    self.open_frame(depth, Building::object(), line, true)?;
                } else {
                    self.select_object(depth, line)?;
                }
                self.add_member(key, inline, line)?;
            }
        }
        Ok(())
    }

    fn top(&self) -> &Frame {
        self.frames.last().expect("document frame always present")
    }

    fn top_mut(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("document frame always present")
    }

    /// Make an array at `at_depth` the target for the next element: continue
    /// the one already open there, or open a fresh frame.
    fn enter_array(&mut self, at_depth: usize, first_marker: bool, line: usize) -> Result<()> {
        let top = self.top();
        if first_marker && top.depth == at_depth {
            if matches!(top.building, Building::Array { .. }) {
                return Ok(());
            }
            return Err(structure(
                line,
                "list marker where an object member was expected",
            ));
        }
        // Chained markers (`- - x`) always open; the parent array was entered
        // by the marker before them on the same line.
        self.open_frame(at_depth, Building::array(), line, !first_marker)
    }

    /// Push a new frame at `at_depth`, validating that the current top has an
    /// open slot for it. `from_marker_chain` marks opens that directly
    /// continue a `- ` marker on the current line — the only case where an
    /// array parent is legal.
    fn open_frame(
        &mut self,
        at_depth: usize,
        building: Building,
        line: usize,
        from_marker_chain: bool,
    ) -> Result<()> {
        if at_depth == 0 {
            return Err(structure(line, "the document must start with a root 'key:' line"));
        }
        if at_depth > self.max_depth {
            return Err(structure(
                line,
                format!("nesting depth limit of {} exceeded", self.max_depth),
            ));
        }
        let top = self.top_mut();
        if top.depth != at_depth - 1 {
            return Err(structure(
                line,
                "indentation does not match any open block",
            ));
        }
        let attach_key = match &mut top.building {
            Building::Object { pending, .. } => match pending.take() {
                Some((key, _)) => Some(key),
                None => {
                    return Err(structure(
                        line,
                        "indented content without a 'key:' line to hang it on",
                    ));
                }
            },
            Building::Array { .. } => {
                if !from_marker_chain {
                    // An inline scalar element followed by a deeper block,
                    // or a deeper line under a list with no marker of its own.
                    return Err(structure(
                        line,
                        "mixed list item content: indented block under an inline element",
                    ));
                }
                None
            }
        };
        self.frames.push(Frame {
            depth: at_depth,
            attach_key,
            building,
        });
        Ok(())
    }

    /// Resolve the object frame that a `key:`/`key: scalar` line at `depth`
    /// belongs to, opening the child frame of a pending `key:` if needed.
    fn select_object(&mut self, depth: usize, line: usize) -> Result<()> {
        let top = self.top();
        if top.depth == depth {
            if matches!(top.building, Building::Object { .. }) {
                return Ok(());
            }
            return Err(structure(
                line,
                "expected a '- ' list marker at this indentation",
            ));
        }
        self.open_frame(depth, Building::object(), line, false)
    }

    /// Record one member on the top (object) frame.
    fn add_member(&mut self, key: String, inline: Option<&str>, line: usize) -> Result<()> {
        let is_document = self.frames.len() == 1;
        let value = match inline {
            Some(token) => Some(parse_scalar(token, line)?),
            None => None,
        };
        let Building::Object { members, pending } = &mut self.top_mut().building else {
            unreachable!("add_member always targets an object frame");
        };
        if let Some((prev, prev_line)) = pending.take() {
            return Err(structure(
                prev_line,
                format!("missing indented block after '{prev}:'"),
            ));
        }
        if is_document && !members.is_empty() {
            return Err(structure(line, "more than one top-level key"));
        }
        match value {
            Some(v) => Value::insert_member(members, key, v),
            None => *pending = Some((key, line)),
        }
        Ok(())
    }

    /// Pop the top frame and attach its finished value to the parent.
    fn close_top(&mut self) -> Result<()> {
        let frame = self.frames.pop().expect("close_top never pops the document");
        let value = match frame.building {
            Building::Object { pending: Some((key, line)), .. } => {
                return Err(structure(
                    line,
                    format!("missing indented block after '{key}:'"),
                ));
            }
            Building::Object { members, .. } => Value::Object(members),
            Building::Array { items } => Value::Array(items),
        };
        let parent = self.top_mut();
        match (frame.attach_key, &mut parent.building) {
            (Some(key), Building::Object { members, .. }) => {
                Value::insert_member(members, key, value);
            }
            (None, Building::Array { items }) => items.push(value),
            // open_frame only ever hangs keyed frames off objects and
            // keyless frames off arrays.
            _ => unreachable!("frame attached to a parent of the wrong kind"),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<(String, Value)> {
        while self.frames.len() > 1 {
            self.close_top()?;
        }
        let document = self.frames.pop().expect("document frame always present");
        let Building::Object { mut members, pending } = document.building else {
            unreachable!("document frame is always an object");
        };
        if let Some((key, line)) = pending {
            return Err(structure(
                line,
                format!("missing indented block after '{key}:'"),
            ));
        }
        match members.len() {
            0 => Err(syntax(1, "empty document")),
            1 => {
                let (root_name, value) = members.remove(0);
                Ok((root_name, value))
            }
            // add_member rejects the second top-level key as it arrives.
            _ => unreachable!("document holds at most one member"),
        }
    }
}

/// Count leading spaces; tabs in the indentation are errors.
fn measure_indent(text: &str, line: usize) -> Result<usize> {
    let mut indent = 0;
    for &b in text.as_bytes() {
        match b {
            b' ' => indent += 1,
            b'\t' => return Err(syntax(line, "tab character in indentation")),
            _ => break,
        }
    }
    Ok(indent)
}

/// Split line content into a member (`key:` / `key: scalar`) or a bare
/// scalar. A quoted token is a key only when its closing quote is followed
/// immediately by `:`.
fn parse_content(rest: &str, line: usize) -> Result<Content<'_>> {
    if rest.starts_with('"') {
        let (key, end) = match scan_string_body(rest, 1) {
            Ok(parsed) => parsed,
            Err((_, message)) => return Err(syntax(line, message)),
        };
        if rest[end..].starts_with(':') {
            let inline = member_inline(&rest[end + 1..], line)?;
            return Ok(Content::Member { key, inline });
        }
        return Ok(Content::Scalar(rest));
    }
    match rest.find(':') {
        Some(0) => Err(syntax(line, "missing key before ':'")),
        Some(pos) => {
            let inline = member_inline(&rest[pos + 1..], line)?;
            Ok(Content::Member {
                key: rest[..pos].to_string(),
                inline,
            })
        }
        None => Ok(Content::Scalar(rest)),
    }
}

/// The text after a member's `:` is either empty (block follows) or a single
/// space plus an inline scalar.
fn member_inline<'a>(after_colon: &'a str, line: usize) -> Result<Option<&'a str>> {
    if after_colon.is_empty() {
        return Ok(None);
    }
    match after_colon.strip_prefix(' ') {
        Some(token) if !token.is_empty() && !token.starts_with(' ') => Ok(Some(token)),
        _ => Err(syntax(line, "expected a single space and a scalar after ':'")),
    }
}

/// Parse one scalar token in fixed priority order: literals, empty-container
/// tokens, quoted string, number. Anything else is an error — unquoted
/// strings do not exist in AON.
fn parse_scalar(token: &str, line: usize) -> Result<Value> {
    match token {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "{}" => return Ok(Value::Object(Vec::new())),
        "[]" => return Ok(Value::Array(Vec::new())),
        _ => {}
    }
    if token.starts_with('"') {
        return match scan_string_body(token, 1) {
            Ok((s, end)) if end == token.len() => Ok(Value::String(s)),
            Ok(_) => Err(syntax(line, "unexpected content after string scalar")),
            Err((_, message)) => Err(syntax(line, message)),
        };
    }
    match parse_number_token(token) {
        Some(n) => Ok(Value::Number(n)),
        None => Err(syntax(line, format!("invalid scalar '{token}'"))),
    }
}

/// Validate the JSON number grammar over the whole token, then parse it.
fn parse_number_token(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return None,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return None;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return None;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if i != bytes.len() {
        return None;
    }
    token.parse::<f64>().ok().filter(|f| f.is_finite())
}

fn syntax(line: usize, message: impl Into<String>) -> AonError {
    AonError::AonSyntax {
        line,
        message: message.into(),
    }
}

fn structure(line: usize, message: impl Into<String>) -> AonError {
    AonError::AonStructure {
        line,
        message: message.into(),
    }
}
