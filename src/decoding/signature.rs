//! Preflight validation: padding, signature, and byte-order detection
//! (spec.md §4.3, "Preflight validation").

use crate::encoding::{ResolvedOrder, DEFAULT_SIGNATURE};
use crate::error::CodecError;

pub const FORMAT_VERSION: u8 = 240;

/// The result of a successful preflight pass: the byte order the value
/// region was written in, and the offset one past its last byte.
pub struct Preflight {
    pub order: ResolvedOrder,
    pub value_start: usize,
    pub value_end: usize,
}

/// Validate buffer shape (length, padding, signature) and detect byte
/// order, without interpreting a single value byte.
pub fn preflight(data: &[u8], user_sig: u8) -> Result<Preflight, CodecError> {
    if data.is_empty() {
        return Err(CodecError::InvalidBuf("buffer is empty".to_string()));
    }
    if data.len() % 4 != 0 {
        return Err(CodecError::InvalidBuf(format!(
            "buffer length {} is not a multiple of 4",
            data.len()
        )));
    }
    if data.len() < 4 {
        return Err(CodecError::InvalidBuf(format!(
            "buffer length {} is too short to hold a signature and padding",
            data.len()
        )));
    }

    let marker = data[data.len() - 1];
    let pad_len = (!marker) as usize;
    if pad_len < 1 || pad_len > 4 {
        return Err(CodecError::InvalidPad(format!(
            "padding length {} derived from marker 0x{:02x} is outside 1..=4",
            pad_len, marker
        )));
    }
    if data.len() < 2 + pad_len {
        return Err(CodecError::InvalidBuf(
            "buffer too short to hold a signature and its padding".to_string(),
        ));
    }
    let pad_start = data.len() - pad_len;
    if data[pad_start..].iter().any(|&b| b != marker) {
        return Err(CodecError::InvalidPad(
            "trailing padding bytes are not all equal to the padding marker".to_string(),
        ));
    }

    let (b0, b1) = (data[0], data[1]);
    let order = if b0 == user_sig && b1 == FORMAT_VERSION {
        ResolvedOrder::Little
    } else if b0 == FORMAT_VERSION && b1 == user_sig {
        ResolvedOrder::Big
    } else {
        return Err(CodecError::InvalidSig(format!(
            "signature bytes {{{:#04x}, {:#04x}}} don't pair user byte {:#04x} with version {}",
            b0, b1, user_sig, FORMAT_VERSION
        )));
    };

    Ok(Preflight {
        order,
        value_start: 2,
        value_end: pad_start,
    })
}

/// Preflight with the default user signature (spec.md §5).
pub fn preflight_default(data: &[u8]) -> Result<Preflight, CodecError> {
    preflight(data, DEFAULT_SIGNATURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_empty_scalar_buf() -> Vec<u8> {
        // signature (little) + tag(fmt=4,class=1) + 1 pad byte.
        vec![DEFAULT_SIGNATURE, FORMAT_VERSION, (4 << 5) | 1, 0xFE]
    }

    #[test]
    fn detects_little_order_signature() {
        let buf = valid_empty_scalar_buf();
        let pf = preflight_default(&buf).unwrap();
        assert!(matches!(pf.order, ResolvedOrder::Little));
        assert_eq!(pf.value_start, 2);
        assert_eq!(pf.value_end, 3);
    }

    #[test]
    fn detects_big_order_signature() {
        let buf = vec![FORMAT_VERSION, DEFAULT_SIGNATURE, (4 << 5) | 1, 0xFE];
        let pf = preflight_default(&buf).unwrap();
        assert!(matches!(pf.order, ResolvedOrder::Big));
    }

    #[test]
    fn rejects_length_not_multiple_of_four() {
        let buf = vec![DEFAULT_SIGNATURE, FORMAT_VERSION, 0xFE];
        assert_eq!(preflight_default(&buf).unwrap_err().code(), "invalidBuf");
    }

    #[test]
    fn rejects_mismatched_padding_bytes() {
        let mut buf = valid_empty_scalar_buf();
        *buf.last_mut().unwrap() = 0xFD; // claims pad_len=2 but only 1 trailing byte set
        assert_eq!(preflight_default(&buf).unwrap_err().code(), "invalidPad");
    }

    #[test]
    fn rejects_unknown_signature_pair() {
        let buf = vec![1, 2, (4 << 5) | 1, 0xFE];
        assert_eq!(preflight_default(&buf).unwrap_err().code(), "invalidSig");
    }
}
