//! Per-element byte decoding for the fixed-width numeric classes.

use super::cursor::Cursor;
use crate::encoding::ResolvedOrder;
use crate::error::CodecError;

pub trait ElementDecode: Sized {
    fn read_elem(cur: &mut Cursor, order: ResolvedOrder) -> Result<Self, CodecError>;
}

macro_rules! impl_element_decode_multibyte {
    ($t:ty, $size:expr) => {
        impl ElementDecode for $t {
            fn read_elem(cur: &mut Cursor, order: ResolvedOrder) -> Result<Self, CodecError> {
                let bytes = cur.read_bytes($size)?;
                let mut arr = [0u8; $size];
                arr.copy_from_slice(bytes);
                Ok(match order {
                    ResolvedOrder::Little => <$t>::from_le_bytes(arr),
                    ResolvedOrder::Big => <$t>::from_be_bytes(arr),
                })
            }
        }
    };
}

impl_element_decode_multibyte!(f64, 8);
impl_element_decode_multibyte!(f32, 4);
impl_element_decode_multibyte!(i16, 2);
impl_element_decode_multibyte!(u16, 2);
impl_element_decode_multibyte!(i32, 4);
impl_element_decode_multibyte!(u32, 4);
impl_element_decode_multibyte!(i64, 8);
impl_element_decode_multibyte!(u64, 8);

impl ElementDecode for i8 {
    fn read_elem(cur: &mut Cursor, _order: ResolvedOrder) -> Result<Self, CodecError> {
        Ok(cur.read_byte()? as i8)
    }
}

impl ElementDecode for u8 {
    fn read_elem(cur: &mut Cursor, _order: ResolvedOrder) -> Result<Self, CodecError> {
        cur.read_byte()
    }
}

impl ElementDecode for bool {
    fn read_elem(cur: &mut Cursor, _order: ResolvedOrder) -> Result<Self, CodecError> {
        Ok(cur.read_byte()? != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multibyte_elements_respect_order() {
        let data = [0x00, 0x01];
        let mut cur = Cursor::new(&data);
        assert_eq!(u16::read_elem(&mut cur, ResolvedOrder::Big).unwrap(), 1);

        let mut cur = Cursor::new(&data);
        assert_eq!(u16::read_elem(&mut cur, ResolvedOrder::Little).unwrap(), 256);
    }

    #[test]
    fn bool_reads_zero_or_nonzero() {
        let data = [0u8, 7u8];
        let mut cur = Cursor::new(&data);
        assert!(!bool::read_elem(&mut cur, ResolvedOrder::Big).unwrap());
        assert!(bool::read_elem(&mut cur, ResolvedOrder::Big).unwrap());
    }
}
