use std::{fmt, io::Cursor};

use crate::{
    codec::{decode_variable_byte_int, encode_variable_byte_int},
    constants::MAX_REMAINING_LENGTH,
};

use super::FixedHeaderError;

/// The size in bytes of everything in a packet after the fixed header
/// (variable header and payload).
///
/// Reference: <https://docs.oasis-open.org/mqtt/mqtt/v5.0/os/mqtt-v5.0-os.html#_Toc3901105>
///
/// The protocol caps this at 268,435,455 (2^28 - 1); the bound is enforced at
/// construction so an out-of-range value never exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainingLength(u32);

impl RemainingLength {
    /// Builds a `RemainingLength`, enforcing the protocol range.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::OutOfRange` if `value` exceeds
    ///   `MAX_REMAINING_LENGTH`.
    pub fn new(value: u32) -> Result<Self, FixedHeaderError> {
        if value > MAX_REMAINING_LENGTH {
            return Err(FixedHeaderError::OutOfRange { value });
        }

        Ok(Self(value))
    }

    /// Returns the byte count this value represents.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Encodes the value as a 1-4 byte variable byte integer.
    ///
    /// # Errors
    /// - Propagates `FixedHeaderError::OutOfRange` from the codec; unreachable
    ///   for a constructed value, kept as a `Result` rather than panicking.
    pub fn encode(self) -> Result<Vec<u8>, FixedHeaderError> {
        encode_variable_byte_int(self.0)
    }

    /// Decodes a variable byte integer from `buf`.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::MalformedVariableLength` or
    ///   `FixedHeaderError::TruncatedInput` from the codec.
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, FixedHeaderError> {
        // A terminated 4-byte varint is at most 2^28 - 1, so the range check
        // cannot fail here
        Self::new(decode_variable_byte_int(buf)?)
    }
}

impl fmt::Display for RemainingLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
