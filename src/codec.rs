use std::io::Cursor;

use bytes::Buf;

use crate::{
    constants::{MAX_REMAINING_LENGTH, MAX_REMAINING_LENGTH_BYTES},
    protocol::FixedHeaderError,
};

/// Encode a variable byte integer.
///
/// Reference: <https://docs.oasis-open.org/mqtt/mqtt/v5.0/os/mqtt-v5.0-os.html#_Toc3901011>
///
/// **Specification:**
///
/// ```text
/// do
///    encodedByte = X MOD 128
///    X = X DIV 128
///    // if there are more data to encode, set the top bit of this byte
///    if (X > 0)
///       encodedByte = encodedByte OR 128
///    endif
///    'output' encodedByte
/// while (X > 0)
/// ```
///
/// where MOD is the modulo operator (% in C), DIV is integer division (/ in C), and OR is bit-wise or (| in C).
///
/// # Errors
/// - Returns `FixedHeaderError::OutOfRange` if `value` exceeds `MAX_REMAINING_LENGTH`.
pub fn encode_variable_byte_int(mut value: u32) -> Result<Vec<u8>, FixedHeaderError> {
    let capacity = match value {
        0..=127 => 1,
        128..=16_383 => 2,
        16_384..=2_097_151 => 3,
        2_097_152..=MAX_REMAINING_LENGTH => 4,
        _ => return Err(FixedHeaderError::OutOfRange { value }),
    };
    let mut encoded_value = Vec::with_capacity(capacity);

    for _ in 0..capacity {
        // Extract the 7 least significant bits from the current value
        // These 7 bits represent the payload of the current byte
        let mut encoded_byte = (value % 128) as u8;

        // Divide the value by 128 to remove the 7 bits just processed
        // The remaining bits will be processed in the next iteration
        value /= 128;

        // If there are still remaining bits, mark this byte as continuation
        if value > 0 {
            encoded_byte |= 128;
        }

        encoded_value.push(encoded_byte);
    }

    Ok(encoded_value)
}

/// Decode a variable byte integer.
///
/// Reference: <https://docs.oasis-open.org/mqtt/mqtt/v5.0/os/mqtt-v5.0-os.html#_Toc3901011>
///
/// **Specification:**
///
/// ```text
/// multiplier = 1
/// value = 0
/// do
///    encodedByte = 'next byte from stream'
///    value += (encodedByte AND 127) * multiplier
///    if (multiplier > 128*128*128)
///       throw Error(Malformed Variable Byte Integer)
///    multiplier *= 128
/// while ((encodedByte AND 128) != 0)
/// ```
///
/// where AND is the bit-wise and operator (& in C).
///
/// Non-canonical encodings that terminate within 4 bytes (e.g. `[0x80, 0x00]`
/// for 0) are accepted; only termination and the 4-byte cap are enforced.
///
/// # Errors
/// - Returns `FixedHeaderError::MalformedVariableLength` if the continuation
///   bit is still set after 4 bytes. The fifth byte is not consumed.
/// - Returns `FixedHeaderError::TruncatedInput` if the buffer is exhausted
///   before a terminating byte is seen.
pub fn decode_variable_byte_int(buf: &mut Cursor<&[u8]>) -> Result<u32, FixedHeaderError> {
    let mut multiplier: u32 = 1;
    let mut decoded_value: u32 = 0;

    for _ in 0..MAX_REMAINING_LENGTH_BYTES {
        if !buf.has_remaining() {
            return Err(FixedHeaderError::TruncatedInput);
        }

        let encoded_byte = buf.get_u8();

        // Take the 7 least significant bits
        let value = u32::from(encoded_byte & 127);

        // Multiply by current multiplier and add to decoded value
        decoded_value += value * multiplier;

        // If the continuation bit is not set, we are done
        if encoded_byte & 128 == 0 {
            return Ok(decoded_value);
        }

        multiplier *= 128;
    }

    // Continuation bit still set after 4 bytes
    Err(FixedHeaderError::MalformedVariableLength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<u32, FixedHeaderError> {
        decode_variable_byte_int(&mut Cursor::new(bytes))
    }

    #[test]
    fn encodes_single_byte_values() {
        assert_eq!(encode_variable_byte_int(0).unwrap(), vec![0x00]);
        assert_eq!(encode_variable_byte_int(127).unwrap(), vec![0x7F]);
    }

    #[test]
    fn encodes_multi_byte_values() {
        assert_eq!(encode_variable_byte_int(128).unwrap(), vec![0x80, 0x01]);
        assert_eq!(encode_variable_byte_int(16_383).unwrap(), vec![0xFF, 0x7F]);
        assert_eq!(encode_variable_byte_int(16_384).unwrap(), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode_variable_byte_int(2_097_151).unwrap(), vec![0xFF, 0xFF, 0x7F]);
        assert_eq!(encode_variable_byte_int(2_097_152).unwrap(), vec![0x80, 0x80, 0x80, 0x01]);
    }

    #[test]
    fn encodes_maximum_value_in_four_bytes() {
        assert_eq!(
            encode_variable_byte_int(MAX_REMAINING_LENGTH).unwrap(),
            vec![0xFF, 0xFF, 0xFF, 0x7F]
        );
    }

    #[test]
    fn rejects_value_above_maximum() {
        assert_eq!(
            encode_variable_byte_int(MAX_REMAINING_LENGTH + 1),
            Err(FixedHeaderError::OutOfRange { value: MAX_REMAINING_LENGTH + 1 })
        );
    }

    #[test]
    fn decodes_boundary_values() {
        assert_eq!(decode(&[0x00]).unwrap(), 0);
        assert_eq!(decode(&[0x7F]).unwrap(), 127);
        assert_eq!(decode(&[0x80, 0x01]).unwrap(), 128);
        assert_eq!(decode(&[0xFF, 0xFF, 0xFF, 0x7F]).unwrap(), MAX_REMAINING_LENGTH);
    }

    #[test]
    fn decode_stops_at_terminating_byte() {
        // Trailing bytes belong to the variable header, not the varint
        let bytes = [0x80, 0x01, 0xAB, 0xCD];
        let mut buf = Cursor::new(&bytes[..]);
        assert_eq!(decode_variable_byte_int(&mut buf).unwrap(), 128);
        assert_eq!(buf.position(), 2);
    }

    #[test]
    fn decode_accepts_non_canonical_encoding() {
        assert_eq!(decode(&[0x80, 0x00]).unwrap(), 0);
        assert_eq!(decode(&[0xFF, 0x00]).unwrap(), 127);
    }

    #[test]
    fn decode_rejects_unterminated_four_byte_encoding() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
        let mut buf = Cursor::new(&bytes[..]);
        assert_eq!(
            decode_variable_byte_int(&mut buf),
            Err(FixedHeaderError::MalformedVariableLength)
        );
        // The fifth byte must stay in the buffer
        assert_eq!(buf.position(), 4);
    }

    #[test]
    fn decode_rejects_truncated_input() {
        assert_eq!(decode(&[]), Err(FixedHeaderError::TruncatedInput));
        assert_eq!(decode(&[0x80]), Err(FixedHeaderError::TruncatedInput));
        assert_eq!(decode(&[0xFF, 0xFF, 0xFF]), Err(FixedHeaderError::TruncatedInput));
    }

    #[test]
    fn round_trips_each_byte_width() {
        for value in [0, 1, 127, 128, 16_383, 16_384, 2_097_151, 2_097_152, MAX_REMAINING_LENGTH] {
            let encoded = encode_variable_byte_int(value).unwrap();
            assert_eq!(decode(&encoded).unwrap(), value, "value {value}");
        }
    }
}
