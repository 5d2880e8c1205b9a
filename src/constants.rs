/// Maximum value of the Remaining Length field (2^28 - 1).
///
/// This is the largest value representable by a 4-byte variable byte integer
/// and therefore the maximum allowed byte count for everything that follows
/// the fixed header of a packet.
pub const MAX_REMAINING_LENGTH: u32 = 268_435_455;

/// Maximum number of bytes a Remaining Length encoding may occupy.
pub const MAX_REMAINING_LENGTH_BYTES: usize = 4;

/// Reserved flag bits required by `PubRel`, `Subscribe` and `Unsubscribe`.
pub const FIXED_FLAG_BITS: u8 = 0b0000_0010;
