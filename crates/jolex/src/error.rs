//! Syntax errors reported by the parser.

use thiserror::Error;

/// A fatal grammar violation, or a premature end of input.
///
/// Errors are sticky: once a call has returned one, every subsequent call on
/// the same [`Parser`](crate::Parser) returns the same error until
/// [`reset`](crate::Parser::reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct SyntaxError {
    /// The construct the grammar expected instead of the offending input.
    pub kind: ErrorKind,
    /// Absolute byte offset of the offending byte (or of the end of input),
    /// counted from the last reset. The offending byte itself is never
    /// consumed.
    pub offset: usize,
}

/// The specific construct the grammar expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A byte that cannot begin a JSON value where a value was expected.
    #[error("expected beginning of JSON value")]
    ExpectedValue,
    /// A byte other than `"` where an object key was expected.
    #[error("expected object key")]
    ExpectedObjectKey,
    /// A byte other than `:` after an object key.
    #[error("expected ':' after object key")]
    ExpectedColon,
    /// A byte other than `,` or `}` after an object member.
    #[error("expected ',' or '}}' after object value")]
    ExpectedCommaOrCloseBrace,
    /// A byte other than `,` or `]` after an array element.
    #[error("expected ',' or ']' after array value")]
    ExpectedCommaOrCloseBracket,
    /// An unescaped control character inside a string body.
    #[error("expected valid string character")]
    InvalidStringCharacter,
    /// An unrecognized character after `\` in a string.
    #[error("expected valid escape sequence after '\\'")]
    InvalidEscape,
    /// A non-hexadecimal character inside a `\u` escape.
    #[error("expected four hexadecimal digits after '\\u'")]
    InvalidUnicodeEscape,
    /// A non-digit after a number's leading `-`.
    #[error("expected digit after '-'")]
    ExpectedIntegerDigit,
    /// A non-digit after a number's decimal point.
    #[error("expected digit after '.' in number")]
    ExpectedFractionDigit,
    /// A missing digit in a number's exponent.
    #[error("expected digit in number exponent")]
    ExpectedExponentDigit,
    /// A mismatched character inside `true`, `false` or `null`.
    #[error("expected '{expected}' in literal {literal}")]
    InvalidLiteral {
        /// The keyword being matched.
        literal: &'static str,
        /// The character the keyword required next.
        expected: char,
    },
    /// A non-whitespace byte after the top-level value completed.
    #[error("expected end of input after top-level value")]
    TrailingData,
    /// [`end`](crate::Parser::end) was called before the top-level value was
    /// complete.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
