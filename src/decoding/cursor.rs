//! A bounds-checked read cursor over an encoded buffer.

use crate::error::CodecError;

pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Cursor<'a> {
        Cursor { data, pos: 0 }
    }

    pub fn at(data: &'a [u8], pos: usize) -> Cursor<'a> {
        Cursor { data, pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        let b = *self.data.get(self.pos).ok_or_else(|| {
            CodecError::CorruptBuf(format!("expected a byte at offset {}, buffer ended", self.pos))
        })?;
        self.pos += 1;
        Ok(b)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], CodecError> {
        let end = self.pos.checked_add(n).ok_or_else(|| {
            CodecError::CorruptBuf("offset overflow while reading payload".to_string())
        })?;
        let slice = self.data.get(self.pos..end).ok_or_else(|| {
            CodecError::CorruptBuf(format!(
                "expected {} bytes at offset {}, only {} remain",
                n,
                self.pos,
                self.data.len().saturating_sub(self.pos)
            ))
        })?;
        self.pos = end;
        Ok(slice)
    }
}
