//! Encoding and decoding of the MQTT fixed header.
//!
//! Every MQTT control packet starts with the same 2 to 5 bytes: a control
//! byte carrying the packet type and its flag bits, followed by the
//! Remaining Length as a variable byte integer. This crate models that
//! surface and nothing else: it hands the caller a decoded
//! ([`FixedHeader`], bytes consumed) pair and leaves transport, session
//! state and per-packet bodies to the layers around it.
//!
//! All operations are pure functions over immutable value types; nothing
//! here holds state across calls, so decoding may run concurrently for any
//! number of connections without coordination.

pub mod codec;
pub mod constants;
pub mod protocol;

pub use protocol::{
    fixed_header::FixedHeader,
    flags::{FlagShape, Flags, PublishFlags},
    packet_type::PacketType,
    remaining_length::RemainingLength,
    FixedHeaderError,
};
