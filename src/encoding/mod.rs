//! Encoding: turns a `Value` into a self-describing byte buffer.

pub mod buffer;
pub mod elements;
pub mod options;
pub mod tag;
pub mod value;

pub use buffer::{EncodeBuffer, BUF_LIMIT};
pub use options::{ByteOrder, ResolvedOrder, DEFAULT_SIGNATURE};
pub use value::encode_value;
