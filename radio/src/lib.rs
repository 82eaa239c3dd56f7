//! Pipe addressing and channel multiplexing on top of a single radio transceiver.
//!
//! A [`RadioContext`] owns the transceiver (through the [`Driver`] trait) and
//! binds the meta, animation-common and client-specific channels to the
//! hardware reading pipes. Outbound packets go through the one writing pipe,
//! whose address is rebound before every write.
#![no_std]

mod context;
mod driver;
mod error;
mod log;
#[cfg(test)]
mod mock;
#[cfg(feature = "nrf24")]
pub mod nrf24;

pub use context::{Packet, RadioContext};
pub use driver::{Driver, Payload};
pub use error::{ConfigError, InitError, ReceiveError, TransmitError};
pub use log::{Log, NoLog, WriteLog};

pub use dino_protocol as protocol;
pub use dino_protocol::{write_address, Address, ClientIndex, LogicalChannel, PipeSlot, RadioConfig};
