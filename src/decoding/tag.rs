//! Tag byte and shape-prefix parsing (spec.md §4.1, §4.3, "Tag parsing").

use super::cursor::Cursor;
use crate::encoding::ResolvedOrder;
use crate::error::CodecError;
use crate::types::{Class, Shape, SizeFormat};

fn read_dim(cur: &mut Cursor, width: u8, order: ResolvedOrder) -> Result<usize, CodecError> {
    Ok(match width {
        1 => cur.read_byte()? as usize,
        2 => {
            let bytes = cur.read_bytes(2)?;
            let mut arr = [0u8; 2];
            arr.copy_from_slice(bytes);
            (match order {
                ResolvedOrder::Little => u16::from_le_bytes(arr),
                ResolvedOrder::Big => u16::from_be_bytes(arr),
            }) as usize
        }
        4 => {
            let bytes = cur.read_bytes(4)?;
            let mut arr = [0u8; 4];
            arr.copy_from_slice(bytes);
            (match order {
                ResolvedOrder::Little => u32::from_le_bytes(arr),
                ResolvedOrder::Big => u32::from_be_bytes(arr),
            }) as usize
        }
        _ => unreachable!("dimension width is always 1, 2, or 4"),
    })
}

/// Whether `ndims > 2` general shapes are accepted at this call site.
/// Dynamic mode accepts them; template mode rejects with `ndimsLimit`
/// (spec.md §4.3, "Tag parsing").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralPolicy {
    Allow,
    RejectBeyond2D,
}

/// Read a tag byte and reconstruct the shape it announces.
pub fn read_tag_and_shape(
    cur: &mut Cursor,
    order: ResolvedOrder,
    general: GeneralPolicy,
) -> Result<(Class, Shape, SizeFormat), CodecError> {
    let tag = cur.read_byte()?;
    let class = Class::from_code(tag & 0x1f)?;
    let fmt = SizeFormat::from_fmt_bits(tag >> 5)?;

    let shape = match fmt {
        SizeFormat::Scalar => Shape::scalar(),
        SizeFormat::NormalizedEmpty => Shape::normalized_empty(),
        SizeFormat::Column => {
            let m = read_dim(cur, 1, order)?;
            Shape::new(vec![m, 1])
        }
        SizeFormat::Row => {
            let n = read_dim(cur, 1, order)?;
            Shape::new(vec![1, n])
        }
        SizeFormat::Matrix => {
            let m = read_dim(cur, 1, order)?;
            let n = read_dim(cur, 1, order)?;
            Shape::new(vec![m, n])
        }
        SizeFormat::GeneralU8 | SizeFormat::GeneralU16 | SizeFormat::GeneralU32 => {
            if general == GeneralPolicy::RejectBeyond2D {
                return Err(CodecError::NdimsLimit(
                    "template mode accepts only 2-D shapes".to_string(),
                ));
            }
            let ndims = cur.read_byte()? as usize;
            if ndims < 2 {
                return Err(CodecError::NdimsLimit(format!(
                    "general shape dimension count must be at least 2, got {}",
                    ndims
                )));
            }
            let width = match fmt {
                SizeFormat::GeneralU8 => 1,
                SizeFormat::GeneralU16 => 2,
                SizeFormat::GeneralU32 => 4,
                _ => unreachable!(),
            };
            let mut dims = Vec::with_capacity(ndims);
            for _ in 0..ndims {
                dims.push(read_dim(cur, width, order)?);
            }
            Shape::new(dims)
        }
    };
    shape.validate()?;

    Ok((class, shape, fmt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scalar_tag_with_no_shape_bytes() {
        let data = [Class::F64.code()];
        let mut cur = Cursor::new(&data);
        let (class, shape, fmt) =
            read_tag_and_shape(&mut cur, ResolvedOrder::Big, GeneralPolicy::Allow).unwrap();
        assert_eq!(class, Class::F64);
        assert_eq!(shape.dims(), &[1, 1]);
        assert_eq!(fmt, SizeFormat::Scalar);
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn reads_row_vector_length_byte() {
        let data = [(2 << 5) | Class::U8.code(), 3];
        let mut cur = Cursor::new(&data);
        let (_, shape, fmt) =
            read_tag_and_shape(&mut cur, ResolvedOrder::Big, GeneralPolicy::Allow).unwrap();
        assert_eq!(shape.dims(), &[1, 3]);
        assert_eq!(fmt, SizeFormat::Row);
    }

    #[test]
    fn rejects_general_shapes_in_template_mode() {
        let data = [(5 << 5) | Class::F32.code(), 3, 2, 3, 4];
        let mut cur = Cursor::new(&data);
        let err = read_tag_and_shape(&mut cur, ResolvedOrder::Big, GeneralPolicy::RejectBeyond2D)
            .unwrap_err();
        assert_eq!(err.code(), "ndimsLimit");
    }

    #[test]
    fn rejects_general_shapes_with_fewer_than_two_dimensions() {
        let data = [(5 << 5) | Class::F32.code(), 1, 7];
        let mut cur = Cursor::new(&data);
        let err =
            read_tag_and_shape(&mut cur, ResolvedOrder::Big, GeneralPolicy::Allow).unwrap_err();
        assert_eq!(err.code(), "ndimsLimit");
    }

    #[test]
    fn rejects_unknown_class_code() {
        let data = [(0 << 5) | 31];
        let mut cur = Cursor::new(&data);
        let err =
            read_tag_and_shape(&mut cur, ResolvedOrder::Big, GeneralPolicy::Allow).unwrap_err();
        assert_eq!(err.code(), "invalidTag");
    }
}
