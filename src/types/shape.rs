//! Shape: an ordered list of dimensions, and the six size-format encodings
//! used to put one on the wire.

use crate::error::CodecError;

/// INT32_MAX, the ceiling for any single dimension, any element count, and
/// any encoded buffer length minus padding headroom.
pub const NUMEL_LIMIT: usize = i32::MAX as usize;

/// Maximum number of dimensions a shape may carry.
pub const NDIMS_LIMIT: usize = 255;

/// An ordered list of non-negative integer dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Shape {
        Shape(dims)
    }

    pub fn scalar() -> Shape {
        Shape(vec![1, 1])
    }

    /// The canonical 0x0 empty shape.
    pub fn normalized_empty() -> Shape {
        Shape(vec![0, 0])
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn ndims(&self) -> usize {
        self.0.len()
    }

    pub fn numel(&self) -> usize {
        self.0.iter().product()
    }

    pub fn is_scalar(&self) -> bool {
        self.numel() == 1
    }

    pub fn is_empty_value(&self) -> bool {
        self.numel() == 0
    }

    pub fn is_normalized_empty(&self) -> bool {
        self.0 == [0, 0]
    }

    pub fn is_matrix(&self) -> bool {
        self.0.len() == 2
    }

    /// The implied element count if every zero dimension were replaced by
    /// one — used by the encoder's empty-value numel check (spec.md §4.2).
    pub fn implied_numel(&self) -> usize {
        self.0
            .iter()
            .map(|&d| if d == 0 { 1 } else { d })
            .product()
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if self.0.len() > NDIMS_LIMIT {
            return Err(CodecError::NdimsLimit(format!(
                "shape has {} dimensions, limit is {}",
                self.0.len(),
                NDIMS_LIMIT
            )));
        }
        for &d in &self.0 {
            if d > NUMEL_LIMIT {
                return Err(CodecError::NumelLimit(format!(
                    "dimension {} exceeds {}",
                    d, NUMEL_LIMIT
                )));
            }
        }
        let bound = if self.is_empty_value() {
            self.implied_numel()
        } else {
            self.numel()
        };
        if bound > NUMEL_LIMIT {
            return Err(CodecError::NumelLimit(format!(
                "element count {} exceeds {}",
                bound, NUMEL_LIMIT
            )));
        }
        Ok(())
    }
}

/// The six ways a shape's size-format prefix (tag high bits 1/2/3/5/6/7; 0
/// and 4 carry no dimension bytes at all) can appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeFormat {
    Scalar = 0,
    Column = 1,
    Row = 2,
    Matrix = 3,
    NormalizedEmpty = 4,
    GeneralU8 = 5,
    GeneralU16 = 6,
    GeneralU32 = 7,
}

impl SizeFormat {
    pub fn from_fmt_bits(fmt: u8) -> Result<SizeFormat, CodecError> {
        Ok(match fmt {
            0 => SizeFormat::Scalar,
            1 => SizeFormat::Column,
            2 => SizeFormat::Row,
            3 => SizeFormat::Matrix,
            4 => SizeFormat::NormalizedEmpty,
            5 => SizeFormat::GeneralU8,
            6 => SizeFormat::GeneralU16,
            7 => SizeFormat::GeneralU32,
            other => {
                return Err(CodecError::InvalidTag(other));
            }
        })
    }

    pub fn fmt_bits(self) -> u8 {
        self as u8
    }

    /// Choose the size format that the encoder must use for `shape`.
    pub fn select(shape: &Shape) -> SizeFormat {
        if shape.is_scalar() && shape.dims() == [1, 1] {
            return SizeFormat::Scalar;
        }
        if shape.is_normalized_empty() {
            return SizeFormat::NormalizedEmpty;
        }
        if shape.is_matrix() {
            let m = shape.dims()[0];
            let n = shape.dims()[1];
            if m < 256 && n < 256 {
                if n == 1 {
                    return SizeFormat::Column;
                }
                if m == 1 {
                    return SizeFormat::Row;
                }
                return SizeFormat::Matrix;
            }
        }
        let max_dim = shape.dims().iter().copied().max().unwrap_or(0);
        if max_dim <= u8::MAX as usize {
            SizeFormat::GeneralU8
        } else if max_dim <= u16::MAX as usize {
            SizeFormat::GeneralU16
        } else {
            SizeFormat::GeneralU32
        }
    }

    pub fn is_general(self) -> bool {
        matches!(
            self,
            SizeFormat::GeneralU8 | SizeFormat::GeneralU16 | SizeFormat::GeneralU32
        )
    }
}
