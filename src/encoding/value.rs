//! Recursive payload encoding for every wire class (spec.md §4.2).

use super::buffer::EncodeBuffer;
use super::elements::ElementEncode;
use super::options::ResolvedOrder;
use super::tag::write_tag_and_shape;
use crate::error::CodecError;
use crate::types::{CharArray, Class, ComplexArray, NumericArray, Shape, SparseData, StructValue, Value};

/// Encode `value`'s tag, shape, and payload into `buf`, recursing into
/// nested values (cell elements, struct field values, sparse idx/nzv).
pub fn encode_value(buf: &mut EncodeBuffer, value: &Value, order: ResolvedOrder) -> Result<(), CodecError> {
    match value {
        Value::F64(a) => encode_numeric(buf, Class::F64, a, order),
        Value::F32(a) => encode_numeric(buf, Class::F32, a, order),
        Value::I8(a) => encode_numeric(buf, Class::I8, a, order),
        Value::U8(a) => encode_numeric(buf, Class::U8, a, order),
        Value::I16(a) => encode_numeric(buf, Class::I16, a, order),
        Value::U16(a) => encode_numeric(buf, Class::U16, a, order),
        Value::I32(a) => encode_numeric(buf, Class::I32, a, order),
        Value::U32(a) => encode_numeric(buf, Class::U32, a, order),
        Value::I64(a) => encode_numeric(buf, Class::I64, a, order),
        Value::U64(a) => encode_numeric(buf, Class::U64, a, order),
        Value::Bool(a) => encode_numeric(buf, Class::Bool, a, order),
        Value::Char8(a) => encode_char8(buf, a, order),
        Value::Char16(a) => encode_char16(buf, a, order),
        Value::Cell(shape, items) => encode_cell(buf, shape, items, order),
        Value::Struct(s) => encode_struct(buf, s, order),
        Value::Sparse(s) => encode_sparse(buf, s, order),
        Value::Complex(c) => encode_complex(buf, c, order),
    }
}

fn encode_numeric<T: ElementEncode>(
    buf: &mut EncodeBuffer,
    class: Class,
    arr: &NumericArray<T>,
    order: ResolvedOrder,
) -> Result<(), CodecError> {
    write_tag_and_shape(buf, class, &arr.shape, order)?;
    for elem in &arr.data {
        elem.write_elem(buf, order)?;
    }
    Ok(())
}

fn encode_char8(buf: &mut EncodeBuffer, arr: &CharArray<u8>, order: ResolvedOrder) -> Result<(), CodecError> {
    write_tag_and_shape(buf, Class::Char8, &arr.shape, order)?;
    buf.push_bytes(&arr.data)
}

fn encode_char16(buf: &mut EncodeBuffer, arr: &CharArray<u16>, order: ResolvedOrder) -> Result<(), CodecError> {
    write_tag_and_shape(buf, Class::Char16, &arr.shape, order)?;
    for &code in &arr.data {
        let bytes = match order {
            ResolvedOrder::Little => code.to_le_bytes(),
            ResolvedOrder::Big => code.to_be_bytes(),
        };
        buf.push_bytes(&bytes)?;
    }
    Ok(())
}

fn encode_cell(
    buf: &mut EncodeBuffer,
    shape: &Shape,
    items: &[Value],
    order: ResolvedOrder,
) -> Result<(), CodecError> {
    write_tag_and_shape(buf, Class::Cell, shape, order)?;
    for item in items {
        encode_value(buf, item, order)?;
    }
    Ok(())
}

/// A struct's field names ride the wire as a 1×N char8 cell immediately
/// after the struct's own tag, before any field values (spec.md §4.2,
/// Struct).
fn encode_struct(buf: &mut EncodeBuffer, s: &StructValue, order: ResolvedOrder) -> Result<(), CodecError> {
    write_tag_and_shape(buf, Class::Struct, &s.shape, order)?;

    let names: Vec<Value> = s
        .fields
        .iter()
        .map(|f| Value::Char8(CharArray::from_str8(&f.name)))
        .collect();
    let names_shape = Shape::new(vec![1, s.fields.len()]);
    encode_cell(buf, &names_shape, &names, order)?;

    for field in &s.fields {
        for v in &field.values {
            encode_value(buf, v, order)?;
        }
    }
    Ok(())
}

/// Pick the narrowest unsigned width that holds every 1-based index, and
/// wrap the indices as a plain column-vector `Value` (spec.md §4.2, Sparse).
fn build_idx_value(idx: &[usize]) -> Value {
    let shape = Shape::new(vec![idx.len(), 1]);
    let max = idx.iter().copied().max().unwrap_or(0);
    if idx.is_empty() || max <= u8::MAX as usize {
        Value::U8(NumericArray::new(shape, idx.iter().map(|&i| i as u8).collect()))
    } else if max <= u16::MAX as usize {
        Value::U16(NumericArray::new(shape, idx.iter().map(|&i| i as u16).collect()))
    } else {
        Value::U32(NumericArray::new(shape, idx.iter().map(|&i| i as u32).collect()))
    }
}

fn build_nzv_value(nzv: &SparseData, len: usize) -> Value {
    let shape = Shape::new(vec![len, 1]);
    match nzv {
        SparseData::F64(v) => Value::F64(NumericArray::new(shape, v.clone())),
        SparseData::Bool(v) => Value::Bool(NumericArray::new(shape, v.clone())),
        SparseData::Complex(v) => {
            let re = v.iter().map(|c| c.re).collect();
            let im = v.iter().map(|c| c.im).collect();
            Value::Complex(ComplexArray::F64 { shape, re, im })
        }
    }
}

fn encode_sparse(
    buf: &mut EncodeBuffer,
    s: &crate::types::SparseValue,
    order: ResolvedOrder,
) -> Result<(), CodecError> {
    write_tag_and_shape(buf, Class::Sparse, &s.shape, order)?;
    encode_value(buf, &build_idx_value(&s.idx), order)?;
    encode_value(buf, &build_nzv_value(&s.nzv, s.idx.len()), order)
}

/// A complex array's tag/shape is followed by a one-byte nested tag naming
/// its real element class, then every real part followed by every
/// imaginary part (spec.md §4.2, Complex).
fn encode_complex(buf: &mut EncodeBuffer, c: &ComplexArray, order: ResolvedOrder) -> Result<(), CodecError> {
    write_tag_and_shape(buf, Class::Complex, c.shape(), order)?;
    buf.push_byte(c.real_class().code())?;
    match c {
        ComplexArray::F64 { re, im, .. } => {
            for v in re {
                v.write_elem(buf, order)?;
            }
            for v in im {
                v.write_elem(buf, order)?;
            }
        }
        ComplexArray::F32 { re, im, .. } => {
            for v in re {
                v.write_elem(buf, order)?;
            }
            for v in im {
                v.write_elem(buf, order)?;
            }
        }
    }
    Ok(())
}
