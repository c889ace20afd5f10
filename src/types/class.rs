//! Class codes: the stable wire values for each element/value kind.

use crate::error::CodecError;

/// One of the 17 classes in the value universe. The numeric value is the
/// stable wire code (low 5 bits of a tag byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Class {
    F64 = 1,
    F32 = 2,
    I8 = 3,
    U8 = 4,
    I16 = 5,
    U16 = 6,
    I32 = 7,
    U32 = 8,
    I64 = 9,
    U64 = 10,
    Bool = 11,
    Char8 = 12,
    Char16 = 13,
    Cell = 14,
    Struct = 15,
    Sparse = 16,
    Complex = 17,
}

impl Class {
    /// Recover a class from the low 5 bits of a tag byte.
    pub fn from_code(code: u8) -> Result<Class, CodecError> {
        Ok(match code {
            1 => Class::F64,
            2 => Class::F32,
            3 => Class::I8,
            4 => Class::U8,
            5 => Class::I16,
            6 => Class::U16,
            7 => Class::I32,
            8 => Class::U32,
            9 => Class::I64,
            10 => Class::U64,
            11 => Class::Bool,
            12 => Class::Char8,
            13 => Class::Char16,
            14 => Class::Cell,
            15 => Class::Struct,
            16 => Class::Sparse,
            17 => Class::Complex,
            other => return Err(CodecError::InvalidTag(other)),
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Bytes occupied by one element of a fixed-width class. `None` for the
    /// recursive classes (cell, struct, sparse, complex), whose element size
    /// isn't constant.
    pub fn bytes_per_element(self) -> Option<usize> {
        match self {
            Class::F64 => Some(8),
            Class::F32 => Some(4),
            Class::I8 | Class::U8 => Some(1),
            Class::I16 | Class::U16 => Some(2),
            Class::I32 | Class::U32 => Some(4),
            Class::I64 | Class::U64 => Some(8),
            Class::Bool => Some(1),
            Class::Char8 => Some(1),
            Class::Char16 => Some(2),
            Class::Cell | Class::Struct | Class::Sparse | Class::Complex => None,
        }
    }

    pub fn is_fixed_width(self) -> bool {
        self.bytes_per_element().is_some()
    }
}
