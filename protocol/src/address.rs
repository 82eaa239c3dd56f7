use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{LogicalChannel, ADDRESS_WIDTH, COMMON_BASE_ADDRESS};

/// A full pipe address, least significant byte first as the radio expects it.
#[derive(Serialize, Deserialize, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Address([u8; ADDRESS_WIDTH]);

impl Address {
    /// The common base address with its first byte replaced by `logical`.
    ///
    /// Read pipes 2-5 on the nRF24 share bytes 1-4 with pipe 1, so the
    /// logical address has to live in byte 0.
    pub const fn from_logical(logical: u8) -> Self {
        let mut bytes = COMMON_BASE_ADDRESS;
        bytes[0] = logical;
        Address(bytes)
    }

    pub const fn logical(&self) -> u8 {
        self.0[0]
    }

    pub const fn bytes(&self) -> &[u8; ADDRESS_WIDTH] {
        &self.0
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:#04x}", self.0[0])?;
        for byte in &self.0[1..] {
            write!(f, " {}", *byte as char)?;
        }
        write!(f, ")")
    }
}

/// The address a transmitter writes to in order to reach `target`.
///
/// Receivers bind exactly this address to their reading slot, which is how
/// both ends agree without exchanging the mapping.
pub const fn write_address(target: LogicalChannel) -> Address {
    Address::from_logical(target.logical_address())
}
