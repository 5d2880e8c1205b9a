use std::fmt;

use super::{flags::FlagShape, FixedHeaderError};

/// Represents the MQTT Control Packet Types.
///
/// Type codes 0 and 15 are reserved and never decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    /// Connection request.
    /// Sent by: Client to Server.
    Connect = 0x01,

    /// Connect acknowledgment.
    /// Sent by: Server to Client.
    ConnAck = 0x02,

    /// Publish message.
    /// Sent by: Client to Server or Server to Client.
    Publish = 0x03,

    /// Publish acknowledgment (`QoS` 1).
    /// Sent by: Client to Server or Server to Client.
    PubAck = 0x04,

    /// Publish received (`QoS` 2 delivery part 1).
    /// Sent by: Client to Server or Server to Client.
    PubRec = 0x05,

    /// Publish release (`QoS` 2 delivery part 2).
    /// Sent by: Client to Server or Server to Client.
    PubRel = 0x06,

    /// Publish complete (`QoS` 2 delivery part 3).
    /// Sent by: Client to Server or Server to Client.
    PubComp = 0x07,

    /// Subscribe request.
    /// Sent by: Client to Server.
    Subscribe = 0x08,

    /// Subscribe acknowledgment.
    /// Sent by: Server to Client.
    SubAck = 0x09,

    /// Unsubscribe request.
    /// Sent by: Client to Server.
    Unsubscribe = 0x0A,

    /// Unsubscribe acknowledgment.
    /// Sent by: Server to Client.
    UnsubAck = 0x0B,

    /// PING request.
    /// Sent by: Client to Server.
    PingReq = 0x0C,

    /// PING response.
    /// Sent by: Server to Client.
    PingResp = 0x0D,

    /// Disconnect notification.
    /// Sent by: Client to Server or Server to Client.
    Disconnect = 0x0E,
}

impl PacketType {
    /// Converts a numeric type code to a `PacketType`.
    ///
    /// # Errors
    /// - Returns `FixedHeaderError::ReservedPacketType` if the code does not
    ///   match a known type.
    pub fn from_u8(code: u8) -> Result<Self, FixedHeaderError> {
        match code {
            0x01 => Ok(Self::Connect),
            0x02 => Ok(Self::ConnAck),
            0x03 => Ok(Self::Publish),
            0x04 => Ok(Self::PubAck),
            0x05 => Ok(Self::PubRec),
            0x06 => Ok(Self::PubRel),
            0x07 => Ok(Self::PubComp),
            0x08 => Ok(Self::Subscribe),
            0x09 => Ok(Self::SubAck),
            0x0A => Ok(Self::Unsubscribe),
            0x0B => Ok(Self::UnsubAck),
            0x0C => Ok(Self::PingReq),
            0x0D => Ok(Self::PingResp),
            0x0E => Ok(Self::Disconnect),
            _ => Err(FixedHeaderError::ReservedPacketType { code }),
        }
    }

    /// Converts the `PacketType` to its numeric type code.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Returns the rule governing the 4 flag bits of this packet type.
    ///
    /// The match is exhaustive on purpose: a new variant cannot be added
    /// without deciding its flag rule here.
    pub fn flag_shape(self) -> FlagShape {
        match self {
            Self::Connect
            | Self::ConnAck
            | Self::PubAck
            | Self::PubRec
            | Self::PubComp
            | Self::SubAck
            | Self::UnsubAck
            | Self::PingReq
            | Self::PingResp
            | Self::Disconnect => FlagShape::Zero,

            Self::PubRel | Self::Subscribe | Self::Unsubscribe => FlagShape::Fixed,

            Self::Publish => FlagShape::Publish,
        }
    }
}

impl fmt::Display for PacketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Connect => "CONNECT",
            Self::ConnAck => "CONNACK",
            Self::Publish => "PUBLISH",
            Self::PubAck => "PUBACK",
            Self::PubRec => "PUBREC",
            Self::PubRel => "PUBREL",
            Self::PubComp => "PUBCOMP",
            Self::Subscribe => "SUBSCRIBE",
            Self::SubAck => "SUBACK",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::UnsubAck => "UNSUBACK",
            Self::PingReq => "PINGREQ",
            Self::PingResp => "PINGRESP",
            Self::Disconnect => "DISCONNECT",
        };

        write!(f, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_valid_type_code() {
        for code in 0x01..=0x0E {
            let packet_type = PacketType::from_u8(code).unwrap();
            assert_eq!(packet_type.to_u8(), code);
        }
    }

    #[test]
    fn rejects_reserved_type_codes() {
        assert_eq!(PacketType::from_u8(0x00), Err(FixedHeaderError::ReservedPacketType { code: 0x00 }));
        assert_eq!(PacketType::from_u8(0x0F), Err(FixedHeaderError::ReservedPacketType { code: 0x0F }));
    }

    #[test]
    fn fixed_flag_types() {
        for packet_type in [PacketType::PubRel, PacketType::Subscribe, PacketType::Unsubscribe] {
            assert_eq!(packet_type.flag_shape(), FlagShape::Fixed);
        }
    }

    #[test]
    fn publish_is_the_only_dynamic_flag_type() {
        for code in 0x01..=0x0E {
            let packet_type = PacketType::from_u8(code).unwrap();
            let is_publish = packet_type.flag_shape() == FlagShape::Publish;
            assert_eq!(is_publish, packet_type == PacketType::Publish);
        }
    }
}
