use dino_protocol::{Address, PipeSlot, MAX_PAYLOAD, PIPE_COUNT};
use heapless::Vec;

/// Bytes of one radio packet.
pub type Payload = Vec<u8, MAX_PAYLOAD>;

/// The transceiver, as seen by the addressing layer.
///
/// Implementations do register access only; none of these calls validate
/// slots or lengths, that happens before they are reached.
pub trait Driver {
    type Error;

    /// One-time hardware bring-up. Failure leaves the radio unusable.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Binds a reading address to one of the read-only slots.
    fn set_read_address(&mut self, slot: PipeSlot, address: &Address) -> Result<(), Self::Error>;

    /// Rebinds the writing slot.
    fn set_write_address(&mut self, address: &Address) -> Result<(), Self::Error>;

    /// Enables reception on the slots marked `true`.
    fn set_reading(&mut self, enabled: &[bool; PIPE_COUNT]) -> Result<(), Self::Error>;

    /// Blocking write of at most 32 bytes. `Ok(false)` means it was not delivered.
    fn write(&mut self, data: &[u8]) -> Result<bool, Self::Error>;

    /// A pending packet and the slot index it arrived on.
    fn read(&mut self) -> nb::Result<(u8, Payload), Self::Error>;
}

impl<D: Driver + ?Sized> Driver for &mut D {
    type Error = D::Error;

    fn init(&mut self) -> Result<(), Self::Error> {
        (**self).init()
    }

    fn set_read_address(&mut self, slot: PipeSlot, address: &Address) -> Result<(), Self::Error> {
        (**self).set_read_address(slot, address)
    }

    fn set_write_address(&mut self, address: &Address) -> Result<(), Self::Error> {
        (**self).set_write_address(address)
    }

    fn set_reading(&mut self, enabled: &[bool; PIPE_COUNT]) -> Result<(), Self::Error> {
        (**self).set_reading(enabled)
    }

    fn write(&mut self, data: &[u8]) -> Result<bool, Self::Error> {
        (**self).write(data)
    }

    fn read(&mut self) -> nb::Result<(u8, Payload), Self::Error> {
        (**self).read()
    }
}
