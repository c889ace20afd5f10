//! The skip walker: advances the cursor past one encoded value without
//! materializing it (spec.md §4.4).

use super::cursor::Cursor;
use super::tag::{read_tag_and_shape, GeneralPolicy};
use crate::encoding::ResolvedOrder;
use crate::error::CodecError;
use crate::types::Class;

/// Skip one encoded value, returning the element count of its outer shape
/// (struct-field skipping needs this to know how many child values follow
/// the field-name cell).
pub fn skip_value(cur: &mut Cursor, order: ResolvedOrder) -> Result<usize, CodecError> {
    let (class, shape, _fmt) = read_tag_and_shape(cur, order, GeneralPolicy::Allow)?;
    let numel = shape.numel();

    match class {
        Class::F64 => skip_elements(cur, 8, numel),
        Class::F32 => skip_elements(cur, 4, numel),
        Class::I8 | Class::U8 | Class::Char8 | Class::Bool => skip_elements(cur, 1, numel),
        Class::I16 | Class::U16 | Class::Char16 => skip_elements(cur, 2, numel),
        Class::I32 | Class::U32 => skip_elements(cur, 4, numel),
        Class::I64 | Class::U64 => skip_elements(cur, 8, numel),
        Class::Cell => {
            for _ in 0..numel {
                skip_value(cur, order)?;
            }
            Ok(())
        }
        Class::Struct => {
            let field_count = skip_value(cur, order)?;
            for _ in 0..field_count * numel {
                skip_value(cur, order)?;
            }
            Ok(())
        }
        Class::Sparse => {
            skip_index_vector(cur, order)?;
            skip_numeric_or_bool_vector(cur, order)
        }
        Class::Complex => {
            let real_class = Class::from_code(cur.read_byte()? & 0x1f)?;
            let width = real_class.bytes_per_element().ok_or_else(|| {
                CodecError::CorruptBuf("complex inner tag named a non-fixed-width class".to_string())
            })?;
            skip_elements(cur, width, numel * 2)
        }
    }?;

    Ok(numel)
}

fn skip_elements(cur: &mut Cursor, width: usize, numel: usize) -> Result<(), CodecError> {
    cur.read_bytes(width * numel).map(|_| ())
}

fn skip_index_vector(cur: &mut Cursor, order: ResolvedOrder) -> Result<Class, CodecError> {
    let (class, shape, _fmt) = read_tag_and_shape(cur, order, GeneralPolicy::Allow)?;
    match class {
        Class::U8 => skip_elements(cur, 1, shape.numel())?,
        Class::U16 => skip_elements(cur, 2, shape.numel())?,
        Class::U32 => skip_elements(cur, 4, shape.numel())?,
        other => {
            return Err(CodecError::CorruptBuf(format!(
                "sparse index vector must be uint8/16/32, found class {:?}",
                other
            )))
        }
    }
    Ok(class)
}

fn skip_numeric_or_bool_vector(cur: &mut Cursor, order: ResolvedOrder) -> Result<(), CodecError> {
    let (class, shape, _fmt) = read_tag_and_shape(cur, order, GeneralPolicy::Allow)?;
    let numel = shape.numel();
    match class {
        Class::F64 => skip_elements(cur, 8, numel),
        Class::Bool => skip_elements(cur, 1, numel),
        Class::Complex => {
            let real_class = Class::from_code(cur.read_byte()? & 0x1f)?;
            let width = real_class.bytes_per_element().ok_or_else(|| {
                CodecError::CorruptBuf("complex inner tag named a non-fixed-width class".to_string())
            })?;
            skip_elements(cur, width, numel * 2)
        }
        other => Err(CodecError::CorruptBuf(format!(
            "sparse value vector must be float64/boolean/complex, found class {:?}",
            other
        ))),
    }
}
