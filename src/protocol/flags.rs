use std::fmt;

use crate::constants::FIXED_FLAG_BITS;

use super::{packet_type::PacketType, FixedHeaderError};

const BIT_VALUES: &[u8] = &[0, 1];
const QOS_VALUES: &[u8] = &[0, 1, 2];

/// Which validation rule governs the 4 flag bits of a packet type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagShape {
    /// All four bits are reserved and must be 0.
    Zero,
    /// The bits are the constant pattern `0b0010`.
    Fixed,
    /// The bits carry the dup, `QoS` and retain sub-fields.
    Publish,
}

/// The validated flag bits of a fixed header.
///
/// A value of this type always satisfies the flag rule of the packet type it
/// was constructed for; raw nibbles only enter through [`Flags::from_bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flags {
    /// Reserved flags, all zero.
    Zero,
    /// Reserved flags, constant `0b0010` (PUBREL, SUBSCRIBE, UNSUBSCRIBE).
    Fixed,
    /// PUBLISH flags.
    Publish(PublishFlags),
}

impl Flags {
    /// Validates a raw flag nibble against the rule of `packet_type`.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::ReservedBitViolation` if the nibble does
    ///   not match the fixed pattern required by the packet type.
    /// - Returns `FixedHeaderError::InvalidFlagValue` if a PUBLISH sub-field
    ///   is outside its legal set.
    pub fn from_bits(packet_type: PacketType, bits: u8) -> Result<Self, FixedHeaderError> {
        match packet_type.flag_shape() {
            FlagShape::Zero => {
                if bits != 0 {
                    return Err(FixedHeaderError::ReservedBitViolation {
                        packet_type,
                        expected: 0,
                        received: bits,
                    });
                }

                Ok(Self::Zero)
            }
            FlagShape::Fixed => {
                if bits != FIXED_FLAG_BITS {
                    return Err(FixedHeaderError::ReservedBitViolation {
                        packet_type,
                        expected: FIXED_FLAG_BITS,
                        received: bits,
                    });
                }

                Ok(Self::Fixed)
            }
            FlagShape::Publish => {
                let dup = (bits >> 3) & 0b01;
                let qos = (bits >> 1) & 0b11;
                let retain = bits & 0b01;

                Ok(Self::Publish(PublishFlags::new(dup, qos, retain)?))
            }
        }
    }

    /// Returns the shape this value satisfies.
    pub fn shape(self) -> FlagShape {
        match self {
            Self::Zero => FlagShape::Zero,
            Self::Fixed => FlagShape::Fixed,
            Self::Publish(_) => FlagShape::Publish,
        }
    }

    /// Serializes the flags into bits 3-0 of the control byte.
    pub fn bits(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::Fixed => FIXED_FLAG_BITS,
            Self::Publish(publish_flags) => publish_flags.bits(),
        }
    }
}

/// The dup, `QoS` and retain sub-fields of a PUBLISH fixed header.
///
/// Reference: <https://docs.oasis-open.org/mqtt/mqtt/v5.0/os/mqtt-v5.0-os.html#_Toc3901101>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishFlags {
    dup: u8,
    qos: u8,
    retain: u8,
}

impl PublishFlags {
    /// Validates the sub-fields and builds a `PublishFlags`.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::InvalidFlagValue` if `dup` or `retain` is
    ///   not 0 or 1, or `qos` is not 0, 1 or 2. Out-of-range values are
    ///   rejected, never clamped.
    pub fn new(dup: u8, qos: u8, retain: u8) -> Result<Self, FixedHeaderError> {
        Self::validate_in("dup", dup, BIT_VALUES)?;
        Self::validate_in("qos", qos, QOS_VALUES)?;
        Self::validate_in("retain", retain, BIT_VALUES)?;

        Ok(Self { dup, qos, retain })
    }

    fn validate_in(
        field: &'static str,
        value: u8,
        allowed: &'static [u8],
    ) -> Result<(), FixedHeaderError> {
        if !allowed.contains(&value) {
            return Err(FixedHeaderError::InvalidFlagValue { field, value, allowed });
        }

        Ok(())
    }

    /// Duplicate delivery flag, 0 or 1.
    pub fn dup(self) -> u8 {
        self.dup
    }

    /// `QoS` level, 0, 1 or 2.
    pub fn qos(self) -> u8 {
        self.qos
    }

    /// Retain flag, 0 or 1.
    pub fn retain(self) -> u8 {
        self.retain
    }

    /// Packs the sub-fields into bits 3-0 of the control byte.
    pub fn bits(self) -> u8 {
        (self.dup << 3) | (self.qos << 1) | self.retain
    }
}

impl fmt::Display for PublishFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dup={}, qos={}, retain={}", self.dup, self.qos, self.retain)
    }
}
