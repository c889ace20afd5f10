//! The encoder's growable output buffer.
//!
//! Design note (spec.md §9): growth doubles capacity (or grows to the
//! required size, whichever is larger), capped at `i32::MAX - 3`. This is a
//! deliberately hand-rolled policy — reproduced here rather than leaning on
//! `Vec`'s own amortized growth — because the cap itself is part of the wire
//! contract (`bufLimit`), not an implementation detail.

use crate::error::CodecError;
use crate::types::NUMEL_LIMIT;

/// Ceiling on total encoded length (spec.md §4.2, `bufLimit`).
pub const BUF_LIMIT: usize = NUMEL_LIMIT - 3;

pub struct EncodeBuffer {
    bytes: Vec<u8>,
}

impl EncodeBuffer {
    pub fn new() -> EncodeBuffer {
        EncodeBuffer { bytes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn grow_for(&mut self, additional: usize) -> Result<(), CodecError> {
        let needed = self
            .bytes
            .len()
            .checked_add(additional)
            .ok_or_else(|| CodecError::BufLimit("encoded length overflowed usize".to_string()))?;
        if needed > BUF_LIMIT {
            return Err(CodecError::BufLimit(format!(
                "encoded length {} would exceed the {} byte limit",
                needed, BUF_LIMIT
            )));
        }
        if self.bytes.capacity() < needed {
            let doubled = self.bytes.capacity().saturating_mul(2);
            let target = doubled.max(needed).min(BUF_LIMIT);
            self.bytes.reserve(target - self.bytes.len());
        }
        Ok(())
    }

    pub fn push_byte(&mut self, byte: u8) -> Result<(), CodecError> {
        self.grow_for(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    pub fn push_bytes(&mut self, data: &[u8]) -> Result<(), CodecError> {
        self.grow_for(data.len())?;
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}

impl Default for EncodeBuffer {
    fn default() -> EncodeBuffer {
        EncodeBuffer::new()
    }
}
