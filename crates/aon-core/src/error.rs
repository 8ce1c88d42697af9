//! Error types for AON and JSON encoding/decoding operations.

use thiserror::Error;

/// Errors that can occur while converting between JSON and AON.
#[derive(Error, Debug)]
pub enum AonError {
    /// The input was not valid JSON. Carries the byte offset of the
    /// offending token.
    #[error("JSON syntax error at offset {offset}: {message}")]
    JsonSyntax { offset: usize, message: String },

    /// The input was not valid AON text. Carries the 1-based line number
    /// where the error was detected.
    #[error("AON syntax error at line {line}: {message}")]
    AonSyntax { line: usize, message: String },

    /// The AON text was lexically fine but structurally inconsistent:
    /// a dedent with no matching open block, mixed list-item content,
    /// more than one top-level key, or the nesting depth limit exceeded.
    #[error("AON structure error at line {line}: {message}")]
    AonStructure { line: usize, message: String },

    /// A value could not be represented in the target notation. Reserved:
    /// the JSON and AON type sets currently match, so nothing produces this.
    #[error("encoding error: {message}")]
    Encode { message: String },
}

/// Convenience alias used throughout aon-core.
pub type Result<T> = std::result::Result<T, AonError>;
