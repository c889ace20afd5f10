//! Byte order selection and per-call encoder options.

use crate::error::CodecError;

/// Which multi-byte representation the encoder writes.
///
/// `Native` resolves to the host's actual endianness at encode time;
/// `Little`/`Big` pin it regardless of host. The decoder never needs to know
/// which one was chosen — it detects the order actually used for each
/// buffer from the signature bytes (spec.md §4.1, "Byte order").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Native,
    Little,
    Big,
}

/// The order actually committed to bytes, after `Native` is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedOrder {
    Little,
    Big,
}

impl ByteOrder {
    pub fn resolve(self) -> ResolvedOrder {
        match self {
            ByteOrder::Little => ResolvedOrder::Little,
            ByteOrder::Big => ResolvedOrder::Big,
            ByteOrder::Native => {
                if cfg!(target_endian = "little") {
                    ResolvedOrder::Little
                } else {
                    ResolvedOrder::Big
                }
            }
        }
    }

    /// Parse a host-binding byte-order code (for callers crossing an FFI
    /// boundary where `ByteOrder` isn't statically known to be valid).
    pub fn from_code(code: u8) -> Result<ByteOrder, CodecError> {
        match code {
            0 => Ok(ByteOrder::Native),
            1 => Ok(ByteOrder::Little),
            2 => Ok(ByteOrder::Big),
            other => Err(CodecError::InvalidByteOrder(format!(
                "byte-order code {} is not native(0)/little(1)/big(2)",
                other
            ))),
        }
    }
}

/// Default signature byte `U` (spec.md §4.1, §5).
pub const DEFAULT_SIGNATURE: u8 = 42;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_resolves_to_a_concrete_order() {
        let resolved = ByteOrder::Native.resolve();
        assert!(matches!(resolved, ResolvedOrder::Little | ResolvedOrder::Big));
    }

    #[test]
    fn from_code_rejects_unknown_codes() {
        let err = ByteOrder::from_code(9).unwrap_err();
        assert_eq!(err.code(), "invalidByteOrder");
        assert_eq!(ByteOrder::from_code(1).unwrap(), ByteOrder::Little);
    }
}
