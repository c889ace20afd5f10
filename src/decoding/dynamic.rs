//! Dynamic-mode decoding: reconstruct a `Value` purely from the buffer
//! (spec.md §4.3, "Dynamic mode").

use super::cursor::Cursor;
use super::elements::ElementDecode;
use super::tag::{read_tag_and_shape, GeneralPolicy};
use crate::encoding::ResolvedOrder;
use crate::error::CodecError;
use crate::types::{
    CharArray, Class, ComplexArray, NumericArray, Shape, SparseData, SparseValue, StructField,
    StructValue, Value,
};

/// Decode one value and everything nested inside it, with no template to
/// guide the recursion.
pub fn decode_value_dynamic(cur: &mut Cursor, order: ResolvedOrder) -> Result<Value, CodecError> {
    let (class, shape, _fmt) = read_tag_and_shape(cur, order, GeneralPolicy::Allow)?;
    decode_payload(cur, class, shape, order)
}

fn read_numeric_elements<T: ElementDecode>(
    cur: &mut Cursor,
    numel: usize,
    order: ResolvedOrder,
) -> Result<Vec<T>, CodecError> {
    let mut data = Vec::with_capacity(numel);
    for _ in 0..numel {
        data.push(T::read_elem(cur, order)?);
    }
    Ok(data)
}

fn decode_payload(
    cur: &mut Cursor,
    class: Class,
    shape: Shape,
    order: ResolvedOrder,
) -> Result<Value, CodecError> {
    let numel = shape.numel();
    Ok(match class {
        Class::F64 => Value::F64(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::F32 => Value::F32(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::I8 => Value::I8(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::U8 => Value::U8(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::I16 => Value::I16(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::U16 => Value::U16(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::I32 => Value::I32(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::U32 => Value::U32(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::I64 => Value::I64(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::U64 => Value::U64(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::Bool => Value::Bool(NumericArray::new(shape, read_numeric_elements(cur, numel, order)?)),
        Class::Char8 => {
            let bytes = cur.read_bytes(numel)?.to_vec();
            Value::Char8(CharArray::new(shape, bytes))
        }
        Class::Char16 => {
            let data = read_numeric_elements::<u16>(cur, numel, order)?;
            Value::Char16(CharArray::new(shape, data))
        }
        Class::Cell => {
            let mut items = Vec::with_capacity(numel);
            for _ in 0..numel {
                items.push(decode_value_dynamic(cur, order)?);
            }
            Value::Cell(shape, items)
        }
        Class::Struct => {
            let names_value = decode_value_dynamic(cur, order)?;
            let names = match names_value {
                Value::Cell(_, items) => items
                    .into_iter()
                    .map(|v| match v {
                        Value::Char8(ca) => Ok(ca.to_string_lossy()),
                        other => Err(CodecError::InvalidStruct(format!(
                            "field-name cell held a {:?} element instead of char8",
                            other.class()
                        ))),
                    })
                    .collect::<Result<Vec<String>, CodecError>>()?,
                other => {
                    return Err(CodecError::InvalidStruct(format!(
                        "struct's field-name slot held a {:?} instead of a cell",
                        other.class()
                    )))
                }
            };
            let mut fields = Vec::with_capacity(names.len());
            for name in names {
                let mut values = Vec::with_capacity(numel);
                for _ in 0..numel {
                    values.push(decode_value_dynamic(cur, order)?);
                }
                fields.push(StructField { name, values });
            }
            Value::Struct(StructValue::new(shape, fields))
        }
        Class::Sparse => {
            let idx_value = decode_value_dynamic(cur, order)?;
            let idx = numeric_array_to_usize_vec(idx_value)?;
            let nzv_value = decode_value_dynamic(cur, order)?;
            let nzv = match nzv_value {
                Value::F64(a) => SparseData::F64(a.data),
                Value::Bool(a) => SparseData::Bool(a.data),
                Value::Complex(ComplexArray::F64 { re, im, .. }) => SparseData::Complex(
                    re.into_iter()
                        .zip(im)
                        .map(|(re, im)| num_complex::Complex::new(re, im))
                        .collect(),
                ),
                other => {
                    return Err(CodecError::ClassMismatch(format!(
                        "sparse value vector must be float64/boolean/complex, got {:?}",
                        other.class()
                    )))
                }
            };
            Value::Sparse(SparseValue::new(shape, idx, nzv))
        }
        Class::Complex => {
            let inner_tag = cur.read_byte()?;
            let real_class = Class::from_code(inner_tag & 0x1f)?;
            match real_class {
                Class::F64 => {
                    let re = read_numeric_elements::<f64>(cur, numel, order)?;
                    let im = read_numeric_elements::<f64>(cur, numel, order)?;
                    Value::Complex(ComplexArray::F64 { shape, re, im })
                }
                Class::F32 => {
                    let re = read_numeric_elements::<f32>(cur, numel, order)?;
                    let im = read_numeric_elements::<f32>(cur, numel, order)?;
                    Value::Complex(ComplexArray::F32 { shape, re, im })
                }
                other => {
                    return Err(CodecError::UnsupportedClass(format!(
                        "complex real element class must be float64/float32, got {:?}",
                        other
                    )))
                }
            }
        }
    })
}

fn numeric_array_to_usize_vec(v: Value) -> Result<Vec<usize>, CodecError> {
    match v {
        Value::U8(a) => Ok(a.data.into_iter().map(|x| x as usize).collect()),
        Value::U16(a) => Ok(a.data.into_iter().map(|x| x as usize).collect()),
        Value::U32(a) => Ok(a.data.into_iter().map(|x| x as usize).collect()),
        other => Err(CodecError::ClassMismatch(format!(
            "sparse index vector must be uint8/16/32, got {:?}",
            other.class()
        ))),
    }
}
