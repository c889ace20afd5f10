//! Wire-visible error taxonomy.
//!
//! Mirrors the hand-rolled `DecodeError` the teacher crate carries in its
//! decoding layer: a plain enum with a manual `Display` and
//! `std::error::Error` impl rather than an external error-derive crate. Each
//! variant maps 1:1 to one of the stable error identifiers a host language
//! binding needs to recognize, via [`CodecError::code`].

use std::fmt;

/// A single error surfaced by `encode`, `decode`, or `decode_into`.
///
/// Errors are sticky: the first one produced during a call aborts the rest
/// of that call's recursion (see the crate-level docs).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer is empty, not a multiple of 4 bytes, or otherwise malformed
    /// before the tag/value region can even be located.
    InvalidBuf(String),
    /// Trailing padding bytes are not all equal to the padding marker, or
    /// the padding length is outside `1..=4`.
    InvalidPad(String),
    /// Signature bytes don't form `{user_sig, 240}` in either order.
    InvalidSig(String),
    /// Tag byte's low 5 bits don't name a class in `1..=17`.
    InvalidTag(u8),
    /// Struct buffer had zero matching fields against a non-empty template.
    InvalidStruct(String),
    /// Shape carries more than 255 dimensions (or, in template mode, any
    /// general (>2-D) shape at all).
    NdimsLimit(String),
    /// A dimension, element count, or declared bound was exceeded.
    NumelLimit(String),
    /// Encoded length would exceed `i32::MAX - 3`.
    BufLimit(String),
    /// Tag's class doesn't match what the template (or sparse payload)
    /// requires.
    ClassMismatch(String),
    /// Decoded element count doesn't fit the template's shape category.
    SizeMismatch(String),
    /// An empty cell or struct was seen where template mode requires a
    /// non-empty one.
    EmptyValue(String),
    /// A char16 payload was seen where the template/implementation does not
    /// accept wide characters.
    UnicodeChar(String),
    /// Value's class is outside the 17-class universe.
    UnsupportedClass(String),
    /// `byte_order` selector wasn't one of `native`/`little`/`big`.
    InvalidByteOrder(String),
    /// Cursor didn't land exactly on the expected end of a value's payload.
    CorruptBuf(String),
}

impl CodecError {
    /// The stable wire identifier for this error, e.g. `"numelLimit"`.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::InvalidBuf(_) => "invalidBuf",
            CodecError::InvalidPad(_) => "invalidPad",
            CodecError::InvalidSig(_) => "invalidSig",
            CodecError::InvalidTag(_) => "invalidTag",
            CodecError::InvalidStruct(_) => "invalidStruct",
            CodecError::NdimsLimit(_) => "ndimsLimit",
            CodecError::NumelLimit(_) => "numelLimit",
            CodecError::BufLimit(_) => "bufLimit",
            CodecError::ClassMismatch(_) => "classMismatch",
            CodecError::SizeMismatch(_) => "sizeMismatch",
            CodecError::EmptyValue(_) => "emptyValue",
            CodecError::UnicodeChar(_) => "unicodeChar",
            CodecError::UnsupportedClass(_) => "unsupportedClass",
            CodecError::InvalidByteOrder(_) => "invalidByteOrder",
            CodecError::CorruptBuf(_) => "corruptBuf",
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = match self {
            CodecError::InvalidBuf(m)
            | CodecError::InvalidPad(m)
            | CodecError::InvalidSig(m)
            | CodecError::InvalidStruct(m)
            | CodecError::NdimsLimit(m)
            | CodecError::NumelLimit(m)
            | CodecError::BufLimit(m)
            | CodecError::ClassMismatch(m)
            | CodecError::SizeMismatch(m)
            | CodecError::EmptyValue(m)
            | CodecError::UnicodeChar(m)
            | CodecError::UnsupportedClass(m)
            | CodecError::InvalidByteOrder(m)
            | CodecError::CorruptBuf(m) => m.clone(),
            CodecError::InvalidTag(b) => format!("tag byte 0x{:02x} names no known class", b),
        };
        write!(f, "{}: {}", self.code(), detail)
    }
}

impl std::error::Error for CodecError {}

pub type Result<T> = std::result::Result<T, CodecError>;
