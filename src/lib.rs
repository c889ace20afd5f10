//! A self-describing binary codec for a small, numerically-oriented value
//! universe: real and complex numeric arrays, booleans, 8/16-bit character
//! strings, sparse column vectors/matrices, heterogeneous cells, and
//! record-style structs.
//!
//! A buffer is the concatenation of a 2-byte signature, a recursive tagged
//! encoding of the value, and 1-4 padding bytes. The signature doubles as a
//! byte-order marker: whichever signature byte equals the format version
//! tells the decoder which order multi-byte elements were written in, so the
//! same buffer decodes correctly regardless of which host produced it.
//!
//! ```
//! use ndform::{encode, decode, EncodeOptions, DecodeOptions};
//! use ndform::types::{NumericArray, Value};
//!
//! let value = Value::F64(NumericArray::scalar(2.5));
//! let bytes = encode(&value, EncodeOptions::default()).unwrap();
//! let decoded = decode(&bytes, DecodeOptions::default()).unwrap();
//! assert_eq!(decoded, value);
//! ```
//!
//! Decoding also supports a template-guided mode: the caller supplies a
//! value whose class and shape category constrain what the buffer may
//! contain, and the decoder overlays decoded data onto it in place. Struct
//! decoding in this mode tolerates unknown buffer fields and missing
//! template fields, as long as at least one field name matches, so schema
//! evolution doesn't break forward or backward compatibility.

pub mod decoding;
pub mod encoding;
pub mod error;
pub mod types;

use decoding::{decode_into_value, decode_value_dynamic, preflight, Bounds, Cursor};
use encoding::{encode_value, ByteOrder, EncodeBuffer, DEFAULT_SIGNATURE};
use error::CodecError;
use types::Value;

/// The current (and only) supported format version, stored in the high
/// byte of every signature.
pub const FORMAT_VERSION: u8 = 240;

/// Options governing how `encode` writes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub signature: u8,
    pub byte_order: ByteOrder,
}

impl Default for EncodeOptions {
    fn default() -> EncodeOptions {
        EncodeOptions {
            signature: DEFAULT_SIGNATURE,
            byte_order: ByteOrder::Native,
        }
    }
}

/// Options governing how `decode`/`decode_into` read a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    pub signature: u8,
    pub bounds: Bounds,
}

impl Default for DecodeOptions {
    fn default() -> DecodeOptions {
        DecodeOptions {
            signature: DEFAULT_SIGNATURE,
            bounds: Bounds::default(),
        }
    }
}

/// Encode `value` into a signed, padded, self-describing byte buffer.
pub fn encode(value: &Value, options: EncodeOptions) -> Result<Vec<u8>, CodecError> {
    if options.signature >= FORMAT_VERSION {
        return Err(CodecError::InvalidSig(format!(
            "user signature {} must be < {}",
            options.signature, FORMAT_VERSION
        )));
    }
    let order = options.byte_order.resolve();

    let mut buf = EncodeBuffer::new();
    match order {
        encoding::ResolvedOrder::Little => {
            buf.push_byte(options.signature)?;
            buf.push_byte(FORMAT_VERSION)?;
        }
        encoding::ResolvedOrder::Big => {
            buf.push_byte(FORMAT_VERSION)?;
            buf.push_byte(options.signature)?;
        }
    }
    encode_value(&mut buf, value, order)?;

    let value_len = buf.len();
    let pad_len = 4 - (value_len % 4);
    let pad_len = if pad_len == 0 { 4 } else { pad_len };
    let marker = !(pad_len as u8);
    for _ in 0..pad_len {
        buf.push_byte(marker)?;
    }

    Ok(buf.into_vec())
}

/// Decode `bytes` with no template, recovering class and shape purely from
/// the buffer.
pub fn decode(bytes: &[u8], options: DecodeOptions) -> Result<Value, CodecError> {
    let pf = preflight(bytes, options.signature)?;
    let mut cur = Cursor::at(bytes, pf.value_start);
    let value = decode_value_dynamic(&mut cur, pf.order)?;
    if cur.pos() != pf.value_end {
        return Err(CodecError::CorruptBuf(format!(
            "decoder stopped at offset {}, value region ends at {}",
            cur.pos(),
            pf.value_end
        )));
    }
    Ok(value)
}

/// Decode `bytes` onto `template` in place, validating the buffer's class
/// and shape against the template at every nested slot.
pub fn decode_into(bytes: &[u8], template: &mut Value, options: DecodeOptions) -> Result<(), CodecError> {
    let pf = preflight(bytes, options.signature)?;
    let mut cur = Cursor::at(bytes, pf.value_start);
    decode_into_value(&mut cur, template, pf.order, &options.bounds)?;
    if cur.pos() != pf.value_end {
        return Err(CodecError::CorruptBuf(format!(
            "decoder stopped at offset {}, value region ends at {}",
            cur.pos(),
            pf.value_end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{
        CharArray, ComplexArray, NumericArray, Shape, SparseData, SparseValue, StructField,
        StructValue,
    };

    fn round_trip(v: &Value) {
        let bytes = encode(v, EncodeOptions::default()).unwrap();
        let decoded = decode(&bytes, DecodeOptions::default()).unwrap();
        assert_eq!(&decoded, v);
    }

    #[test]
    fn scalar_float64_is_exactly_twelve_bytes() {
        let v = Value::F64(NumericArray::scalar(0.0));
        let bytes = encode(&v, EncodeOptions::default()).unwrap();
        assert_eq!(bytes.len(), 12);
        assert_eq!(*bytes.last().unwrap(), 0xFE);
        round_trip(&v);
    }

    #[test]
    fn normalized_empty_float64_is_exactly_four_bytes() {
        let v = Value::F64(NumericArray::new(Shape::normalized_empty(), vec![]));
        let bytes = encode(&v, EncodeOptions::default()).unwrap();
        assert_eq!(bytes.len(), 4);
        round_trip(&v);
    }

    #[test]
    fn row_vector_uint8_matches_the_documented_byte_count() {
        let v = Value::U8(NumericArray::new(Shape::new(vec![1, 3]), vec![10, 20, 30]));
        let bytes = encode(&v, EncodeOptions::default()).unwrap();
        assert_eq!(bytes.len(), 8);
        round_trip(&v);
    }

    #[test]
    fn every_class_round_trips() {
        round_trip(&Value::F64(NumericArray::scalar(1.5)));
        round_trip(&Value::F32(NumericArray::scalar(1.5)));
        round_trip(&Value::I8(NumericArray::scalar(-1)));
        round_trip(&Value::U8(NumericArray::scalar(1)));
        round_trip(&Value::I16(NumericArray::scalar(-1)));
        round_trip(&Value::U16(NumericArray::scalar(1)));
        round_trip(&Value::I32(NumericArray::scalar(-1)));
        round_trip(&Value::U32(NumericArray::scalar(1)));
        round_trip(&Value::I64(NumericArray::scalar(-1)));
        round_trip(&Value::U64(NumericArray::scalar(1)));
        round_trip(&Value::Bool(NumericArray::scalar(true)));
        round_trip(&Value::Char8(CharArray::from_str8("hi")));
        round_trip(&Value::Char16(CharArray::new(Shape::new(vec![1, 1]), vec![0x4e2d])));
        round_trip(&Value::Cell(
            Shape::new(vec![1, 2]),
            vec![
                Value::I32(NumericArray::scalar(1)),
                Value::Bool(NumericArray::scalar(false)),
            ],
        ));
        round_trip(&Value::Struct(StructValue::new(
            Shape::scalar(),
            vec![
                StructField {
                    name: "a".to_string(),
                    values: vec![Value::F64(NumericArray::scalar(1.0))],
                },
                StructField {
                    name: "b".to_string(),
                    values: vec![Value::F64(NumericArray::scalar(2.0))],
                },
            ],
        )));
        round_trip(&Value::Sparse(SparseValue::new(
            Shape::new(vec![255, 255]),
            vec![255],
            SparseData::F64(vec![1.0]),
        )));
        round_trip(&Value::Complex(ComplexArray::F64 {
            shape: Shape::scalar(),
            re: vec![1.0],
            im: vec![-1.0],
        }));
    }

    #[test]
    fn byte_order_self_detects_on_either_host() {
        let v = Value::U16(NumericArray::scalar(258));

        let little = encode(
            &v,
            EncodeOptions {
                signature: DEFAULT_SIGNATURE,
                byte_order: ByteOrder::Little,
            },
        )
        .unwrap();
        assert_eq!(little[0], DEFAULT_SIGNATURE);
        assert_eq!(little[1], FORMAT_VERSION);

        let big = encode(
            &v,
            EncodeOptions {
                signature: DEFAULT_SIGNATURE,
                byte_order: ByteOrder::Big,
            },
        )
        .unwrap();
        assert_eq!(big[0], FORMAT_VERSION);
        assert_eq!(big[1], DEFAULT_SIGNATURE);

        assert_ne!(little, big);
        assert_eq!(decode(&little, DecodeOptions::default()).unwrap(), v);
        assert_eq!(decode(&big, DecodeOptions::default()).unwrap(), v);
    }

    #[test]
    fn rejects_signature_at_or_above_the_format_version() {
        let v = Value::F64(NumericArray::scalar(0.0));
        let err = encode(
            &v,
            EncodeOptions {
                signature: 240,
                byte_order: ByteOrder::Native,
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "invalidSig");
    }

    #[test]
    fn template_decode_overlays_a_subset_of_struct_fields() {
        let full = Value::Struct(StructValue::new(
            Shape::scalar(),
            vec![
                StructField {
                    name: "a".to_string(),
                    values: vec![Value::F64(NumericArray::scalar(1.0))],
                },
                StructField {
                    name: "b".to_string(),
                    values: vec![Value::Bool(NumericArray::scalar(true))],
                },
            ],
        ));
        let bytes = encode(&full, EncodeOptions::default()).unwrap();

        let mut template = Value::Struct(StructValue::new(
            Shape::scalar(),
            vec![StructField {
                name: "a".to_string(),
                values: vec![Value::F64(NumericArray::scalar(0.0))],
            }],
        ));
        decode_into(&bytes, &mut template, DecodeOptions::default()).unwrap();
        match &template {
            Value::Struct(sv) => {
                assert_eq!(sv.field("a").unwrap().values[0], Value::F64(NumericArray::scalar(1.0)));
            }
            _ => panic!("expected struct"),
        }
    }

    #[test]
    fn bounds_enforcement_rejects_oversized_buffers() {
        let v = Value::U8(NumericArray::new(Shape::new(vec![1, 10]), vec![0; 10]));
        let bytes = encode(&v, EncodeOptions::default()).unwrap();
        let mut template = Value::U8(NumericArray::new(Shape::new(vec![1, 1]), vec![0]));
        let options = DecodeOptions {
            signature: DEFAULT_SIGNATURE,
            bounds: Bounds {
                numeric: 4,
                aggregate: 128,
            },
        };
        let err = decode_into(&bytes, &mut template, options).unwrap_err();
        assert_eq!(err.code(), "numelLimit");
    }

    #[test]
    fn template_decode_leaves_a_superset_field_untouched() {
        let buffer_side = Value::Struct(StructValue::new(
            Shape::scalar(),
            vec![StructField {
                name: "a".to_string(),
                values: vec![Value::F64(NumericArray::scalar(1.0))],
            }],
        ));
        let bytes = encode(&buffer_side, EncodeOptions::default()).unwrap();

        let mut template = Value::Struct(StructValue::new(
            Shape::scalar(),
            vec![
                StructField {
                    name: "a".to_string(),
                    values: vec![Value::F64(NumericArray::scalar(0.0))],
                },
                StructField {
                    name: "untouched".to_string(),
                    values: vec![Value::Bool(NumericArray::scalar(true))],
                },
            ],
        ));
        decode_into(&bytes, &mut template, DecodeOptions::default()).unwrap();
        match &template {
            Value::Struct(sv) => {
                assert_eq!(sv.field("a").unwrap().values[0], Value::F64(NumericArray::scalar(1.0)));
                assert_eq!(sv.field("untouched").unwrap().values[0], Value::Bool(NumericArray::scalar(true)));
            }
            _ => panic!("expected struct"),
        }
    }

    #[test]
    fn scalar_template_against_a_multi_element_buffer_is_size_mismatch() {
        let v = Value::F64(NumericArray::new(Shape::new(vec![1, 2]), vec![1.0, 2.0]));
        let bytes = encode(&v, EncodeOptions::default()).unwrap();
        let mut template = Value::F64(NumericArray::scalar(0.0));
        let err = decode_into(&bytes, &mut template, DecodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "sizeMismatch");
    }

    #[test]
    fn empty_cell_template_is_empty_value() {
        let v = Value::Cell(Shape::scalar(), vec![Value::F64(NumericArray::scalar(1.0))]);
        let bytes = encode(&v, EncodeOptions::default()).unwrap();
        let mut template = Value::Cell(Shape::scalar(), vec![]);
        let err = decode_into(&bytes, &mut template, DecodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "emptyValue");
    }

    #[test]
    fn empty_struct_template_against_a_non_empty_buffer_is_empty_value() {
        let full = Value::Struct(StructValue::new(
            Shape::scalar(),
            vec![StructField {
                name: "a".to_string(),
                values: vec![Value::F64(NumericArray::scalar(1.0))],
            }],
        ));
        let bytes = encode(&full, EncodeOptions::default()).unwrap();
        let mut template = Value::Struct(StructValue::new(Shape::scalar(), vec![]));
        let err = decode_into(&bytes, &mut template, DecodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "emptyValue");
    }

    #[test]
    fn complex_with_an_unsupported_real_class_is_unsupported_class() {
        // signature (little) + complex scalar tag (class 17) + inner tag
        // naming boolean (class 11, not float32/float64) + 4 pad bytes.
        let bytes = vec![
            DEFAULT_SIGNATURE,
            FORMAT_VERSION,
            17,
            11,
            0xFB,
            0xFB,
            0xFB,
            0xFB,
        ];
        let err = decode(&bytes, DecodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "unsupportedClass");
    }

    #[test]
    fn trailing_unconsumed_bytes_before_padding_are_corrupt_buf() {
        // signature (little) + f64 scalar tag/payload + one stray byte the
        // decoder never reads + 4 pad bytes: a well-formed preflight whose
        // value region is longer than what the tag claims to hold.
        let mut bytes = vec![DEFAULT_SIGNATURE, FORMAT_VERSION, 1];
        bytes.extend_from_slice(&0.0f64.to_le_bytes());
        bytes.push(0xAB);
        bytes.extend_from_slice(&[0xFB, 0xFB, 0xFB, 0xFB]);
        assert_eq!(bytes.len() % 4, 0);
        let err = decode(&bytes, DecodeOptions::default()).unwrap_err();
        assert_eq!(err.code(), "corruptBuf");
    }
}
