//! Tag byte and shape-prefix emission (spec.md §4.1, §4.2).

use super::buffer::EncodeBuffer;
use super::options::ResolvedOrder;
use crate::error::CodecError;
use crate::types::{Class, Shape, SizeFormat};

fn write_dim(buf: &mut EncodeBuffer, dim: usize, width: u8, order: ResolvedOrder) -> Result<(), CodecError> {
    match width {
        1 => buf.push_byte(dim as u8),
        2 => {
            let v = dim as u16;
            buf.push_bytes(&match order {
                ResolvedOrder::Little => v.to_le_bytes(),
                ResolvedOrder::Big => v.to_be_bytes(),
            })
        }
        4 => {
            let v = dim as u32;
            buf.push_bytes(&match order {
                ResolvedOrder::Little => v.to_le_bytes(),
                ResolvedOrder::Big => v.to_be_bytes(),
            })
        }
        _ => unreachable!("dimension width is always 1, 2, or 4"),
    }
}

/// Emit a tag byte and its shape prefix for `class`/`shape`, returning the
/// size format that was chosen (callers need it to know how many payload
/// elements follow).
pub fn write_tag_and_shape(
    buf: &mut EncodeBuffer,
    class: Class,
    shape: &Shape,
    order: ResolvedOrder,
) -> Result<SizeFormat, CodecError> {
    shape.validate()?;
    let fmt = SizeFormat::select(shape);
    let tag = (fmt.fmt_bits() << 5) | class.code();
    buf.push_byte(tag)?;

    match fmt {
        SizeFormat::Scalar | SizeFormat::NormalizedEmpty => {}
        SizeFormat::Column => write_dim(buf, shape.dims()[0], 1, order)?,
        SizeFormat::Row => write_dim(buf, shape.dims()[1], 1, order)?,
        SizeFormat::Matrix => {
            write_dim(buf, shape.dims()[0], 1, order)?;
            write_dim(buf, shape.dims()[1], 1, order)?;
        }
        SizeFormat::GeneralU8 | SizeFormat::GeneralU16 | SizeFormat::GeneralU32 => {
            let ndims = shape.ndims();
            if ndims > 255 {
                return Err(CodecError::NdimsLimit(format!(
                    "{} dimensions exceeds the 255-dimension limit",
                    ndims
                )));
            }
            if ndims < 2 {
                return Err(CodecError::NdimsLimit(format!(
                    "general shape dimension count must be at least 2, got {}",
                    ndims
                )));
            }
            buf.push_byte(ndims as u8)?;
            let width = match fmt {
                SizeFormat::GeneralU8 => 1,
                SizeFormat::GeneralU16 => 2,
                SizeFormat::GeneralU32 => 4,
                _ => unreachable!(),
            };
            for &dim in shape.dims() {
                write_dim(buf, dim, width, order)?;
            }
        }
    }

    Ok(fmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Shape;

    #[test]
    fn scalar_writes_only_the_tag_byte() {
        let mut buf = EncodeBuffer::new();
        write_tag_and_shape(&mut buf, Class::F64, &Shape::scalar(), ResolvedOrder::Big).unwrap();
        let bytes = buf.into_vec();
        assert_eq!(bytes.len(), 1);
        assert_eq!(bytes[0] & 0x1f, Class::F64.code());
        assert_eq!(bytes[0] >> 5, 0);
    }

    #[test]
    fn row_vector_writes_one_length_byte() {
        let mut buf = EncodeBuffer::new();
        let fmt = write_tag_and_shape(
            &mut buf,
            Class::U8,
            &Shape::new(vec![1, 3]),
            ResolvedOrder::Big,
        )
        .unwrap();
        assert_eq!(fmt, SizeFormat::Row);
        let bytes = buf.into_vec();
        assert_eq!(bytes, vec![(2 << 5) | Class::U8.code(), 3]);
    }

    #[test]
    fn rejects_a_one_dimensional_shape() {
        let mut buf = EncodeBuffer::new();
        let err = write_tag_and_shape(&mut buf, Class::F64, &Shape::new(vec![5]), ResolvedOrder::Big)
            .unwrap_err();
        assert_eq!(err.code(), "ndimsLimit");
    }

    #[test]
    fn general_form_emits_ndims_then_each_dimension() {
        let mut buf = EncodeBuffer::new();
        let fmt = write_tag_and_shape(
            &mut buf,
            Class::F32,
            &Shape::new(vec![2, 3, 4]),
            ResolvedOrder::Big,
        )
        .unwrap();
        assert_eq!(fmt, SizeFormat::GeneralU8);
        let bytes = buf.into_vec();
        assert_eq!(bytes, vec![(5 << 5) | Class::F32.code(), 3, 2, 3, 4]);
    }
}
