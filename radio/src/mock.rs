//! A driver that records every call, for asserting exact register traffic.

use dino_protocol::{Address, PipeSlot, PIPE_COUNT};
use heapless::{Deque, Vec};

use crate::{Driver, Payload};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Init,
    SetReadAddress(PipeSlot, Address),
    SetWriteAddress(Address),
    SetReading([bool; PIPE_COUNT]),
    Write(Payload),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MockError;

#[derive(Debug)]
pub struct MockDriver {
    pub calls: Vec<Call, 32>,
    /// Simulated register contents.
    pub read_addresses: [Option<Address>; PIPE_COUNT],
    pub write_address: Option<Address>,
    pub reading: [bool; PIPE_COUNT],
    /// Fail the call made when this many calls have been recorded.
    pub fail_at: Option<usize>,
    pub undelivered: bool,
    /// Packets handed out by `read`, in the order they were queued.
    pub inbox: Deque<(u8, Payload), 4>,
}

impl MockDriver {
    pub fn new() -> Self {
        MockDriver {
            calls: Vec::new(),
            read_addresses: [None; PIPE_COUNT],
            write_address: None,
            reading: [false; PIPE_COUNT],
            fail_at: None,
            undelivered: false,
            inbox: Deque::new(),
        }
    }

    pub fn queue(&mut self, slot: u8, data: &[u8]) {
        let payload = Payload::from_slice(data).unwrap();
        self.inbox.push_back((slot, payload)).unwrap();
    }

    pub fn writes(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| match call {
                Call::Write(_) => true,
                _ => false,
            })
            .count()
    }

    fn record(&mut self, call: Call) -> Result<(), MockError> {
        if self.fail_at == Some(self.calls.len()) {
            return Err(MockError);
        }
        self.calls.push(call).map_err(|_| MockError)
    }
}

impl Driver for MockDriver {
    type Error = MockError;

    fn init(&mut self) -> Result<(), MockError> {
        self.record(Call::Init)
    }

    fn set_read_address(&mut self, slot: PipeSlot, address: &Address) -> Result<(), MockError> {
        self.record(Call::SetReadAddress(slot, *address))?;
        self.read_addresses[slot.index() as usize] = Some(*address);
        Ok(())
    }

    fn set_write_address(&mut self, address: &Address) -> Result<(), MockError> {
        self.record(Call::SetWriteAddress(*address))?;
        self.write_address = Some(*address);
        Ok(())
    }

    fn set_reading(&mut self, enabled: &[bool; PIPE_COUNT]) -> Result<(), MockError> {
        self.record(Call::SetReading(*enabled))?;
        self.reading = *enabled;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<bool, MockError> {
        let payload = Payload::from_slice(data).map_err(|_| MockError)?;
        self.record(Call::Write(payload))?;
        Ok(!self.undelivered)
    }

    fn read(&mut self) -> nb::Result<(u8, Payload), MockError> {
        self.inbox.pop_front().ok_or(nb::Error::WouldBlock)
    }
}
