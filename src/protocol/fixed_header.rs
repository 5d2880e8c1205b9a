use std::io::Cursor;

use bytes::Buf;
use log::debug;

use crate::constants::FIXED_FLAG_BITS;

use super::{
    flags::{FlagShape, Flags},
    packet_type::PacketType,
    remaining_length::RemainingLength,
    FixedHeaderError,
};

/// The fixed header present at the start of every control packet.
///
/// # Fixed Header Format
///
/// | Bit       | 7   | 6   | 5   | 4   | 3   | 2   | 1   | 0   |
/// |-----------|-----|-----|-----|-----|-----|-----|-----|-----|
/// | Byte 1    | Packet type           | Packet flags          |
/// | Byte 2..5 | Remaining Length                              |
///
/// Immutable once constructed; the flags are guaranteed to match the packet
/// type's flag rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedHeader {
    packet_type: PacketType,
    flags: Flags,
    remaining_length: RemainingLength,
}

impl FixedHeader {
    /// Composes a fixed header, checking that `flags` satisfies the flag rule
    /// of `packet_type`.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::ReservedBitViolation` if the flags were
    ///   built for a different flag rule than the one `packet_type` requires.
    pub fn new(
        packet_type: PacketType,
        flags: Flags,
        remaining_length: RemainingLength,
    ) -> Result<Self, FixedHeaderError> {
        if flags.shape() != packet_type.flag_shape() {
            let expected = match packet_type.flag_shape() {
                FlagShape::Zero => 0,
                FlagShape::Fixed => FIXED_FLAG_BITS,
                // PUBLISH flags must arrive as Flags::Publish; the mismatch
                // here is the variant, not the bit pattern
                FlagShape::Publish => flags.bits(),
            };

            return Err(FixedHeaderError::ReservedBitViolation {
                packet_type,
                expected,
                received: flags.bits(),
            });
        }

        Ok(Self { packet_type, flags, remaining_length })
    }

    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn remaining_length(&self) -> RemainingLength {
        self.remaining_length
    }

    /// Computes the control byte, the first byte of the fixed header:
    /// the packet type code in the 4 most significant bits and the flag bits
    /// in the 4 least significant bits.
    pub fn control_byte(&self) -> u8 {
        self.packet_type.to_u8() << 4 | self.flags.bits()
    }

    /// Encodes the full fixed header: the control byte followed by the
    /// Remaining Length bytes, 2 to 5 bytes in total.
    ///
    /// # Errors
    /// - Propagates `FixedHeaderError::OutOfRange` from the Remaining Length
    ///   codec; unreachable for a constructed header.
    pub fn encode(&self) -> Result<Vec<u8>, FixedHeaderError> {
        let remaining_length = self.remaining_length.encode()?;

        let mut encoded_value = Vec::with_capacity(1 + remaining_length.len());
        encoded_value.push(self.control_byte());
        encoded_value.extend(remaining_length);

        debug!("Encoded {} fixed header: {}", self.packet_type, hex::encode(&encoded_value));

        Ok(encoded_value)
    }

    /// Decodes a fixed header from `buf`, returning it together with the
    /// exact number of bytes consumed; the variable header starts at that
    /// offset.
    ///
    /// Decoding is two-stage and order-dependent: the packet type is resolved
    /// from the high nibble first, because it determines which flag rule the
    /// low nibble is validated against.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::TruncatedInput` if `buf` is exhausted
    ///   mid-header.
    /// - Returns `FixedHeaderError::ReservedPacketType` for type codes 0 and 15.
    /// - Returns `FixedHeaderError::ReservedBitViolation` or
    ///   `FixedHeaderError::InvalidFlagValue` if the flag nibble is invalid
    ///   for the resolved packet type.
    /// - Returns `FixedHeaderError::MalformedVariableLength` if the Remaining
    ///   Length encoding exceeds 4 bytes.
    pub fn decode(buf: &mut Cursor<&[u8]>) -> Result<(Self, usize), FixedHeaderError> {
        let start = buf.position();

        if !buf.has_remaining() {
            return Err(FixedHeaderError::TruncatedInput);
        }

        let control_byte = buf.get_u8();

        let packet_type = PacketType::from_u8(control_byte >> 4)?;
        let flags = Flags::from_bits(packet_type, control_byte & 0b0000_1111)?;
        let remaining_length = RemainingLength::decode(buf)?;

        let consumed = (buf.position() - start) as usize;
        debug!(
            "Decoded {packet_type} fixed header: remaining_length={remaining_length}, consumed={consumed}"
        );

        Ok((Self { packet_type, flags, remaining_length }, consumed))
    }
}
