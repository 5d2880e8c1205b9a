use std::{error::Error, fmt};

pub mod fixed_header;
pub mod flags;
pub mod packet_type;
pub mod remaining_length;

use self::packet_type::PacketType;

/// Errors produced while encoding or decoding a fixed header.
///
/// Every variant is locally detectable and non-retryable: a decode failure
/// means the stream is malformed at the current packet boundary and the
/// caller should reject it. None of them are recoverable by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixedHeaderError {
    /// The packet type code is 0 or 15, both reserved by the protocol.
    ReservedPacketType { code: u8 },

    /// The flag bits do not match the fixed pattern required by the packet type.
    ReservedBitViolation { packet_type: PacketType, expected: u8, received: u8 },

    /// A PUBLISH flag sub-field (dup, qos or retain) is outside its legal set.
    InvalidFlagValue { field: &'static str, value: u8, allowed: &'static [u8] },

    /// A Remaining Length value exceeds the 4-byte variable byte integer range.
    OutOfRange { value: u32 },

    /// A Remaining Length encoding kept its continuation bit set past 4 bytes.
    MalformedVariableLength,

    /// The byte source ran out before the fixed header was complete.
    TruncatedInput,
}

impl fmt::Display for FixedHeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservedPacketType { code } => {
                write!(f, "Reserved packet type code: {code}")
            }
            Self::ReservedBitViolation { packet_type, expected, received } => {
                write!(
                    f,
                    "Reserved bit violation for {packet_type}: expected {expected:#06b}, received {received:#06b}"
                )
            }
            Self::InvalidFlagValue { field, value, allowed } => {
                write!(f, "Invalid flag value: {field} must be one of {allowed:?}, received {value}")
            }
            Self::OutOfRange { value } => {
                write!(f, "Remaining length {value} exceeds the maximum of 268435455")
            }
            Self::MalformedVariableLength => {
                write!(f, "Malformed variable byte integer: more than 4 bytes")
            }
            Self::TruncatedInput => write!(f, "Truncated input"),
        }
    }
}

impl Error for FixedHeaderError {}
