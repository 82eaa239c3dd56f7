//! Radio pipe addressing shared by every device in the fleet.
//!
//! There are effectively 256 pipe addresses that can be read or written. A whole
//! nRF24 address is 5 bytes, but only the first byte varies between our pipes:
//! the rest is the common base `"_DINO"`. Addresses 128-255 are reserved for
//! client-specific animation data.
//!
//! None of this is negotiated over the air, so every transmitter and receiver
//! must be built against the same constants.
#![no_std]

mod address;
mod channel;
mod config;

pub use address::{write_address, Address};
pub use channel::{ClientIndex, InvalidClientIndex, LogicalChannel, PipeSlot};
pub use config::RadioConfig;

/// RF channel offset from 2400MHz.
pub const FREQUENCY: u8 = 76;

/// Width of every pipe address in bytes.
pub const ADDRESS_WIDTH: usize = 5;

/// Base for all pipe addresses. Byte 0 is replaced by the logical address.
pub const COMMON_BASE_ADDRESS: [u8; ADDRESS_WIDTH] = *b"_DINO";

/// Meta communication. Carries no animation data; the format belongs to the application.
pub const META_ADDRESS: u8 = 0;

/// Animation data shared between all clients.
pub const ANIMATION_COMMON_ADDRESS: u8 = 1;

/// First client-specific animation address.
pub const CLIENT_SPECIFIC_START: u8 = 128;

/// Number of client-specific addresses, `CLIENT_SPECIFIC_START..=255`.
pub const MAX_CLIENTS: usize = 256 - CLIENT_SPECIFIC_START as usize;

/// Hardware pipe slots. 0 can write or read, 1-5 only read.
pub const PIPE_COUNT: usize = 6;

/// Largest payload the radio accepts in one packet.
pub const MAX_PAYLOAD: usize = 32;
