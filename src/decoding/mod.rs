//! Decoding: dynamic free reconstruction and template-guided overlay.

pub mod cursor;
pub mod dynamic;
pub mod elements;
pub mod options;
pub mod signature;
pub mod skip;
pub mod tag;
pub mod template;

pub use cursor::Cursor;
pub use dynamic::decode_value_dynamic;
pub use options::{Bounds, DEFAULT_AGGREGATE_BOUND, DEFAULT_NUMERIC_BOUND};
pub use signature::{preflight, preflight_default, Preflight, FORMAT_VERSION};
pub use template::decode_into_value;
