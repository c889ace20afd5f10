//! The tagged value universe: one variant per wire class.

use num_complex::Complex;

use super::class::Class;
use super::shape::Shape;

/// A dense, column-major array of fixed-width elements.
///
/// Grounded on the teacher crate's `Tensor<T>` (shape + flat data, asserting
/// the length matches the shape's element count at construction).
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray<T> {
    pub shape: Shape,
    pub data: Vec<T>,
}

impl<T> NumericArray<T> {
    pub fn new(shape: Shape, data: Vec<T>) -> NumericArray<T> {
        assert_eq!(
            data.len(),
            shape.numel(),
            "data length {} doesn't match shape {:?} (expected {})",
            data.len(),
            shape.dims(),
            shape.numel()
        );
        NumericArray { shape, data }
    }

    pub fn scalar(value: T) -> NumericArray<T> {
        NumericArray {
            shape: Shape::scalar(),
            data: vec![value],
        }
    }
}

/// A string-like array of fixed-width character codes (char8: `u8`, char16:
/// `u16`), sharing the same shape conventions as numeric arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct CharArray<T> {
    pub shape: Shape,
    pub data: Vec<T>,
}

impl<T> CharArray<T> {
    pub fn new(shape: Shape, data: Vec<T>) -> CharArray<T> {
        assert_eq!(data.len(), shape.numel());
        CharArray { shape, data }
    }
}

impl CharArray<u8> {
    /// A 1×N row of char8 holding one byte per codepoint of `s` (Latin-1
    /// range, 0-255). Panics if `s` contains a codepoint above 255 — callers
    /// crossing that boundary should build a char16 array instead.
    pub fn from_str8(s: &str) -> CharArray<u8> {
        let bytes: Vec<u8> = s
            .chars()
            .map(|c| {
                let code = c as u32;
                assert!(code <= u8::MAX as u32, "codepoint {} doesn't fit char8", code);
                code as u8
            })
            .collect();
        CharArray {
            shape: Shape::new(vec![1, bytes.len()]),
            data: bytes,
        }
    }

    pub fn to_string_lossy(&self) -> String {
        self.data.iter().map(|&b| b as char).collect()
    }
}

impl CharArray<u16> {
    /// A 1×N row of char16 holding the UTF-16 code units of `s`.
    pub fn from_str16(s: &str) -> CharArray<u16> {
        let units: Vec<u16> = s.encode_utf16().collect();
        CharArray {
            shape: Shape::new(vec![1, units.len()]),
            data: units,
        }
    }
}

/// One field of a struct: its name plus one value per element of the
/// struct's own shape.
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    pub name: String,
    pub values: Vec<Value>,
}

/// A record array: field order on the wire is the order fields appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub shape: Shape,
    pub fields: Vec<StructField>,
}

impl StructValue {
    pub fn new(shape: Shape, fields: Vec<StructField>) -> StructValue {
        for field in &fields {
            assert_eq!(
                field.values.len(),
                shape.numel(),
                "field {:?} has {} values, struct shape wants {}",
                field.name,
                field.values.len(),
                shape.numel()
            );
        }
        StructValue { shape, fields }
    }

    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The non-zero value vector of a sparse array: float64, boolean, or
/// complex-float64 (spec.md §3, Sparse invariants).
#[derive(Debug, Clone, PartialEq)]
pub enum SparseData {
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Complex(Vec<Complex<f64>>),
}

impl SparseData {
    pub fn len(&self) -> usize {
        match self {
            SparseData::F64(v) => v.len(),
            SparseData::Bool(v) => v.len(),
            SparseData::Complex(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A sparse column vector/matrix: 1-based linear positions of non-zero
/// entries plus their values, at a declared dense shape.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseValue {
    pub shape: Shape,
    /// 1-based linear (column-major) positions of non-zero entries.
    pub idx: Vec<usize>,
    pub nzv: SparseData,
}

impl SparseValue {
    pub fn new(shape: Shape, idx: Vec<usize>, nzv: SparseData) -> SparseValue {
        assert_eq!(idx.len(), nzv.len(), "idx/nzv length mismatch");
        SparseValue { shape, idx, nzv }
    }
}

/// A complex array over one of the two real element classes.
#[derive(Debug, Clone, PartialEq)]
pub enum ComplexArray {
    F64 {
        shape: Shape,
        re: Vec<f64>,
        im: Vec<f64>,
    },
    F32 {
        shape: Shape,
        re: Vec<f32>,
        im: Vec<f32>,
    },
}

impl ComplexArray {
    pub fn shape(&self) -> &Shape {
        match self {
            ComplexArray::F64 { shape, .. } => shape,
            ComplexArray::F32 { shape, .. } => shape,
        }
    }

    /// The wire class of the nested real-element tag.
    pub fn real_class(&self) -> Class {
        match self {
            ComplexArray::F64 { .. } => Class::F64,
            ComplexArray::F32 { .. } => Class::F32,
        }
    }
}

/// Every value in the supported universe: a class plus a shape plus a
/// payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    F64(NumericArray<f64>),
    F32(NumericArray<f32>),
    I8(NumericArray<i8>),
    U8(NumericArray<u8>),
    I16(NumericArray<i16>),
    U16(NumericArray<u16>),
    I32(NumericArray<i32>),
    U32(NumericArray<u32>),
    I64(NumericArray<i64>),
    U64(NumericArray<u64>),
    Bool(NumericArray<bool>),
    Char8(CharArray<u8>),
    Char16(CharArray<u16>),
    Cell(Shape, Vec<Value>),
    Struct(StructValue),
    Sparse(SparseValue),
    Complex(ComplexArray),
}

impl Value {
    pub fn class(&self) -> Class {
        match self {
            Value::F64(_) => Class::F64,
            Value::F32(_) => Class::F32,
            Value::I8(_) => Class::I8,
            Value::U8(_) => Class::U8,
            Value::I16(_) => Class::I16,
            Value::U16(_) => Class::U16,
            Value::I32(_) => Class::I32,
            Value::U32(_) => Class::U32,
            Value::I64(_) => Class::I64,
            Value::U64(_) => Class::U64,
            Value::Bool(_) => Class::Bool,
            Value::Char8(_) => Class::Char8,
            Value::Char16(_) => Class::Char16,
            Value::Cell(..) => Class::Cell,
            Value::Struct(_) => Class::Struct,
            Value::Sparse(_) => Class::Sparse,
            Value::Complex(_) => Class::Complex,
        }
    }

    pub fn shape(&self) -> &Shape {
        match self {
            Value::F64(a) => &a.shape,
            Value::F32(a) => &a.shape,
            Value::I8(a) => &a.shape,
            Value::U8(a) => &a.shape,
            Value::I16(a) => &a.shape,
            Value::U16(a) => &a.shape,
            Value::I32(a) => &a.shape,
            Value::U32(a) => &a.shape,
            Value::I64(a) => &a.shape,
            Value::U64(a) => &a.shape,
            Value::Bool(a) => &a.shape,
            Value::Char8(a) => &a.shape,
            Value::Char16(a) => &a.shape,
            Value::Cell(shape, _) => shape,
            Value::Struct(s) => &s.shape,
            Value::Sparse(s) => &s.shape,
            Value::Complex(c) => c.shape(),
        }
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Value::Char8(_) | Value::Char16(_))
    }

    /// Build a char string value, picking char8 when every code point fits
    /// in a byte and char16 otherwise (spec.md §4.2, "Char8/char16").
    pub fn char_string(s: &str) -> Value {
        if s.chars().all(|c| (c as u32) <= u8::MAX as u32) {
            Value::Char8(CharArray::from_str8(s))
        } else {
            Value::Char16(CharArray::from_str16(s))
        }
    }

    pub fn is_numeric_real(&self) -> bool {
        matches!(
            self,
            Value::F64(_)
                | Value::F32(_)
                | Value::I8(_)
                | Value::U8(_)
                | Value::I16(_)
                | Value::U16(_)
                | Value::I32(_)
                | Value::U32(_)
                | Value::I64(_)
                | Value::U64(_)
        )
    }
}
