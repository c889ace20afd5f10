//! Template-guided decoding: overlay buffer data onto a caller-provided
//! value in place (spec.md §4.3, "Template mode").

use super::cursor::Cursor;
use super::dynamic::decode_value_dynamic;
use super::elements::ElementDecode;
use super::options::Bounds;
use super::skip::skip_value;
use super::tag::{read_tag_and_shape, GeneralPolicy};
use crate::encoding::ResolvedOrder;
use crate::error::CodecError;
use crate::types::{Class, ComplexArray, NumericArray, Shape, StructValue, Value};

fn check_bound(numel: usize, bound: usize) -> Result<(), CodecError> {
    if numel > bound {
        return Err(CodecError::NumelLimit(format!(
            "element count {} exceeds the template bound {}",
            numel, bound
        )));
    }
    Ok(())
}

/// A scalar template requires exactly one decoded element (spec.md §4.3,
/// "Size compatibility").
fn check_scalar_compat(template_shape: &Shape, numel: usize) -> Result<(), CodecError> {
    if template_shape.dims() == [1, 1] && numel != 1 {
        return Err(CodecError::SizeMismatch(format!(
            "scalar template expects 1 element, buffer has {}",
            numel
        )));
    }
    Ok(())
}

fn expect_class(decoded: Class, expected: Class) -> Result<(), CodecError> {
    if decoded == expected {
        Ok(())
    } else {
        Err(CodecError::ClassMismatch(format!(
            "expected class {:?}, buffer tag named {:?}",
            expected, decoded
        )))
    }
}

fn overlay_numeric<T: ElementDecode>(
    cur: &mut Cursor,
    arr: &mut NumericArray<T>,
    class: Class,
    expected: Class,
    shape: Shape,
    bounds: &Bounds,
    order: ResolvedOrder,
) -> Result<(), CodecError> {
    expect_class(class, expected)?;
    let numel = shape.numel();
    check_bound(numel, bounds.numeric)?;
    check_scalar_compat(&arr.shape, numel)?;
    let mut data = Vec::with_capacity(numel);
    for _ in 0..numel {
        data.push(T::read_elem(cur, order)?);
    }
    arr.shape = shape;
    arr.data = data;
    Ok(())
}

/// Decode one value from `cur` onto `template`, overwriting its shape and
/// data in place. `template`'s current variant (and, for cells/structs, its
/// element/field templates) fix what the buffer is allowed to contain.
pub fn decode_into_value(
    cur: &mut Cursor,
    template: &mut Value,
    order: ResolvedOrder,
    bounds: &Bounds,
) -> Result<(), CodecError> {
    let (class, shape, _fmt) = read_tag_and_shape(cur, order, GeneralPolicy::RejectBeyond2D)?;
    let numel = shape.numel();

    match template {
        Value::F64(a) => overlay_numeric(cur, a, class, Class::F64, shape, bounds, order),
        Value::F32(a) => overlay_numeric(cur, a, class, Class::F32, shape, bounds, order),
        Value::I8(a) => overlay_numeric(cur, a, class, Class::I8, shape, bounds, order),
        Value::U8(a) => overlay_numeric(cur, a, class, Class::U8, shape, bounds, order),
        Value::I16(a) => overlay_numeric(cur, a, class, Class::I16, shape, bounds, order),
        Value::U16(a) => overlay_numeric(cur, a, class, Class::U16, shape, bounds, order),
        Value::I32(a) => overlay_numeric(cur, a, class, Class::I32, shape, bounds, order),
        Value::U32(a) => overlay_numeric(cur, a, class, Class::U32, shape, bounds, order),
        Value::I64(a) => overlay_numeric(cur, a, class, Class::I64, shape, bounds, order),
        Value::U64(a) => overlay_numeric(cur, a, class, Class::U64, shape, bounds, order),
        Value::Bool(a) => overlay_numeric(cur, a, class, Class::Bool, shape, bounds, order),

        Value::Char8(arr) => {
            if class != Class::Char8 && class != Class::Char16 {
                return Err(CodecError::ClassMismatch(format!(
                    "char8 template expects char8/char16, buffer tag named {:?}",
                    class
                )));
            }
            check_bound(numel, bounds.aggregate)?;
            check_scalar_compat(&arr.shape, numel)?;
            let data = if class == Class::Char8 {
                cur.read_bytes(numel)?.to_vec()
            } else {
                let codes: Vec<u16> = {
                    let mut v = Vec::with_capacity(numel);
                    for _ in 0..numel {
                        v.push(u16::read_elem(cur, order)?);
                    }
                    v
                };
                let mut narrow = Vec::with_capacity(numel);
                for code in codes {
                    if code > u8::MAX as u16 {
                        return Err(CodecError::UnicodeChar(format!(
                            "code point {} doesn't fit an 8-bit char template",
                            code
                        )));
                    }
                    narrow.push(code as u8);
                }
                narrow
            };
            arr.shape = shape;
            arr.data = data;
            Ok(())
        }
        Value::Char16(arr) => {
            if class != Class::Char8 && class != Class::Char16 {
                return Err(CodecError::ClassMismatch(format!(
                    "char16 template expects char8/char16, buffer tag named {:?}",
                    class
                )));
            }
            check_bound(numel, bounds.aggregate)?;
            check_scalar_compat(&arr.shape, numel)?;
            let data = if class == Class::Char16 {
                let mut v = Vec::with_capacity(numel);
                for _ in 0..numel {
                    v.push(u16::read_elem(cur, order)?);
                }
                v
            } else {
                cur.read_bytes(numel)?.iter().map(|&b| b as u16).collect()
            };
            arr.shape = shape;
            arr.data = data;
            Ok(())
        }

        Value::Cell(tshape, items) => {
            expect_class(class, Class::Cell)?;
            check_bound(numel, bounds.aggregate)?;
            check_scalar_compat(tshape, numel)?;
            if items.is_empty() {
                return Err(CodecError::EmptyValue(
                    "template cell must be non-empty in template mode".to_string(),
                ));
            }
            let elem_template = items[0].clone();
            let mut new_items = Vec::with_capacity(numel);
            for _ in 0..numel {
                let mut v = elem_template.clone();
                decode_into_value(cur, &mut v, order, bounds)?;
                new_items.push(v);
            }
            *tshape = shape;
            *items = new_items;
            Ok(())
        }

        Value::Struct(sv) => {
            expect_class(class, Class::Struct)?;
            check_bound(numel, bounds.aggregate)?;
            check_scalar_compat(&sv.shape, numel)?;
            decode_struct_into(cur, sv, shape, numel, order, bounds)
        }

        Value::Sparse(_) => Err(CodecError::ClassMismatch(
            "sparse values are not supported in template mode".to_string(),
        )),

        Value::Complex(carr) => {
            expect_class(class, Class::Complex)?;
            check_bound(numel, bounds.numeric)?;
            check_scalar_compat(carr.shape(), numel)?;
            let inner_tag = cur.read_byte()?;
            let real_class = Class::from_code(inner_tag & 0x1f)?;
            match carr {
                ComplexArray::F64 {
                    shape: cshape,
                    re,
                    im,
                } => {
                    expect_class(real_class, Class::F64)?;
                    let mut new_re = Vec::with_capacity(numel);
                    for _ in 0..numel {
                        new_re.push(f64::read_elem(cur, order)?);
                    }
                    let mut new_im = Vec::with_capacity(numel);
                    for _ in 0..numel {
                        new_im.push(f64::read_elem(cur, order)?);
                    }
                    *cshape = shape;
                    *re = new_re;
                    *im = new_im;
                }
                ComplexArray::F32 {
                    shape: cshape,
                    re,
                    im,
                } => {
                    expect_class(real_class, Class::F32)?;
                    let mut new_re = Vec::with_capacity(numel);
                    for _ in 0..numel {
                        new_re.push(f32::read_elem(cur, order)?);
                    }
                    let mut new_im = Vec::with_capacity(numel);
                    for _ in 0..numel {
                        new_im.push(f32::read_elem(cur, order)?);
                    }
                    *cshape = shape;
                    *re = new_re;
                    *im = new_im;
                }
            }
            Ok(())
        }
    }
}

/// The buffer's field-name cell is ordinary, untemplated data: decode it
/// dynamically and read off each name.
fn decode_field_name_cell(cur: &mut Cursor, order: ResolvedOrder) -> Result<Vec<String>, CodecError> {
    match decode_value_dynamic(cur, order)? {
        Value::Cell(_, items) => items
            .into_iter()
            .map(|item| match item {
                Value::Char8(ca) => Ok(ca.to_string_lossy()),
                other => Err(CodecError::InvalidStruct(format!(
                    "field-name cell held a {:?} element instead of char8",
                    other.class()
                ))),
            })
            .collect(),
        other => Err(CodecError::InvalidStruct(format!(
            "struct's field-name slot held a {:?} instead of a cell",
            other.class()
        ))),
    }
}

fn decode_struct_into(
    cur: &mut Cursor,
    sv: &mut StructValue,
    shape: Shape,
    numel: usize,
    order: ResolvedOrder,
    bounds: &Bounds,
) -> Result<(), CodecError> {
    let names = decode_field_name_cell(cur, order)?;

    if sv.fields.is_empty() {
        if names.is_empty() {
            sv.shape = shape;
            return Ok(());
        }
        return Err(CodecError::EmptyValue(
            "template struct has no fields to match against a non-empty buffer".to_string(),
        ));
    }

    let mut match_count = 0usize;
    for name in &names {
        if let Some(field) = sv.fields.iter_mut().find(|f| &f.name == name) {
            if numel == 0 {
                field.values = Vec::new();
                match_count += 1;
                continue;
            }
            let elem_template = field.values.first().cloned().ok_or_else(|| {
                CodecError::InvalidStruct(format!(
                    "template field {:?} carries no element template",
                    name
                ))
            })?;
            let mut new_values = Vec::with_capacity(numel);
            for _ in 0..numel {
                let mut v = elem_template.clone();
                decode_into_value(cur, &mut v, order, bounds)?;
                new_values.push(v);
            }
            field.values = new_values;
            match_count += 1;
        } else {
            for _ in 0..numel {
                skip_value(cur, order)?;
            }
        }
    }

    if match_count == 0 {
        return Err(CodecError::InvalidStruct(
            "no field name in the buffer matched the template".to_string(),
        ));
    }
    sv.shape = shape;
    Ok(())
}
