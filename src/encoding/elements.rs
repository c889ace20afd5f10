//! Per-element byte encoding for the fixed-width numeric classes.

use super::buffer::EncodeBuffer;
use super::options::ResolvedOrder;
use crate::error::CodecError;

/// One element's worth of wire bytes, written in the caller's byte order.
pub trait ElementEncode {
    fn write_elem(&self, buf: &mut EncodeBuffer, order: ResolvedOrder) -> Result<(), CodecError>;
}

macro_rules! impl_element_encode_multibyte {
    ($t:ty) => {
        impl ElementEncode for $t {
            fn write_elem(
                &self,
                buf: &mut EncodeBuffer,
                order: ResolvedOrder,
            ) -> Result<(), CodecError> {
                match order {
                    ResolvedOrder::Little => buf.push_bytes(&self.to_le_bytes()),
                    ResolvedOrder::Big => buf.push_bytes(&self.to_be_bytes()),
                }
            }
        }
    };
}

impl_element_encode_multibyte!(f64);
impl_element_encode_multibyte!(f32);
impl_element_encode_multibyte!(i16);
impl_element_encode_multibyte!(u16);
impl_element_encode_multibyte!(i32);
impl_element_encode_multibyte!(u32);
impl_element_encode_multibyte!(i64);
impl_element_encode_multibyte!(u64);

impl ElementEncode for i8 {
    fn write_elem(&self, buf: &mut EncodeBuffer, _order: ResolvedOrder) -> Result<(), CodecError> {
        buf.push_byte(*self as u8)
    }
}

impl ElementEncode for u8 {
    fn write_elem(&self, buf: &mut EncodeBuffer, _order: ResolvedOrder) -> Result<(), CodecError> {
        buf.push_byte(*self)
    }
}

impl ElementEncode for bool {
    fn write_elem(&self, buf: &mut EncodeBuffer, _order: ResolvedOrder) -> Result<(), CodecError> {
        buf.push_byte(if *self { 1 } else { 0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multibyte_elements_respect_order() {
        let mut buf = EncodeBuffer::new();
        1u16.write_elem(&mut buf, ResolvedOrder::Big).unwrap();
        assert_eq!(buf.into_vec(), vec![0, 1]);

        let mut buf = EncodeBuffer::new();
        1u16.write_elem(&mut buf, ResolvedOrder::Little).unwrap();
        assert_eq!(buf.into_vec(), vec![1, 0]);
    }

    #[test]
    fn bool_writes_a_single_zero_or_one_byte() {
        let mut buf = EncodeBuffer::new();
        true.write_elem(&mut buf, ResolvedOrder::Big).unwrap();
        false.write_elem(&mut buf, ResolvedOrder::Big).unwrap();
        assert_eq!(buf.into_vec(), vec![1, 0]);
    }
}
