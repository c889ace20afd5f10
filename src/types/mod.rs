//! Core type system: wire classes, shapes, and the tagged value universe.

pub mod class;
pub mod shape;
pub mod value;

pub use class::Class;
pub use shape::{Shape, SizeFormat, NDIMS_LIMIT, NUMEL_LIMIT};
pub use value::{
    CharArray, ComplexArray, NumericArray, SparseData, SparseValue, StructField, StructValue,
    Value,
};
