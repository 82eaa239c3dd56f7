//! [`Driver`] for the nRF24L01(+) on top of `embedded-nrf24l01`.
//!
//! The chip is kept in standby while pipes are reprogrammed, switched to TX
//! mode for each write and parked in RX mode whenever any reading pipe is
//! enabled.

use core::fmt::Debug;

use dino_protocol::{Address, LogicalChannel, PipeSlot, FREQUENCY, PIPE_COUNT};
use embedded_hal::{blocking::spi::Transfer, digital::v2::OutputPin};
use embedded_nrf24l01::{Configuration, Device, RxMode, StandbyMode, NRF24L01};

use crate::{Driver, Payload};

/// RF settings. Every device in the fleet needs the same values.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Nrf24Settings {
    pub frequency: u8,
    /// Auto acknowledgement per reading slot. Every receiver shares the meta
    /// and animation-common addresses, so acking those makes receivers
    /// answer on top of each other. Slot 0 is ignored: it follows the slot
    /// of whatever is being written to.
    pub auto_ack: [bool; PIPE_COUNT],
    /// Auto retransmit delay, in units of 250us past the first 250us.
    pub retransmit_delay: u8,
    /// Up to 15. Zero disables retransmission.
    pub retransmit_count: u8,
}

impl Default for Nrf24Settings {
    fn default() -> Self {
        let mut auto_ack = [false; PIPE_COUNT];
        auto_ack[PipeSlot::AnimationClientSpecific.index() as usize] = true;
        Nrf24Settings {
            frequency: FREQUENCY,
            auto_ack,
            retransmit_delay: 5,
            retransmit_count: 15,
        }
    }
}

impl Nrf24Settings {
    /// Whether a receiver acknowledges packets sent to `address`.
    fn acknowledged(&self, address: &Address) -> bool {
        LogicalChannel::from_logical_address(address.logical())
            .map_or(false, |channel| {
                self.auto_ack[channel.reading_slot().index() as usize]
            })
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum Nrf24Error<E> {
    #[error("nRF24 error: {0:?}")]
    Radio(E),

    /// A mode switch failed and the chip could not be powered back up.
    #[error("nRF24 unavailable")]
    Unavailable,
}

enum Mode<D: Device> {
    Standby(StandbyMode<D>),
    Rx(RxMode<D>),
}

pub struct Nrf24Driver<D: Device> {
    mode: Option<Mode<D>>,
    settings: Nrf24Settings,
    /// Enabled reading pipes as last configured, pipe 0 excluded.
    reading: [bool; PIPE_COUNT],
    /// The current write address expects an acknowledgement on pipe 0.
    ack: bool,
}

impl<E, CE, CSN, SPI, SPIE> Nrf24Driver<NRF24L01<E, CE, CSN, SPI>>
where
    E: Debug,
    CE: OutputPin<Error = E>,
    CSN: OutputPin<Error = E>,
    SPI: Transfer<u8, Error = SPIE>,
    SPIE: Debug,
{
    pub fn from_pins(
        ce: CE,
        csn: CSN,
        spi: SPI,
        settings: Nrf24Settings,
    ) -> Result<Self, Nrf24Error<embedded_nrf24l01::Error<SPIE>>> {
        let standby = NRF24L01::new(ce, csn, spi).map_err(Nrf24Error::Radio)?;
        Ok(Nrf24Driver::new(standby, settings))
    }
}

impl<D: Device> Nrf24Driver<D> {
    pub fn new(standby: StandbyMode<D>, settings: Nrf24Settings) -> Self {
        Nrf24Driver {
            mode: Some(Mode::Standby(standby)),
            settings,
            reading: [false; PIPE_COUNT],
            ack: false,
        }
    }

    pub fn settings(&self) -> &Nrf24Settings {
        &self.settings
    }

    /// Hands the chip back in standby, if it is still usable.
    pub fn release(mut self) -> Option<StandbyMode<D>> {
        self.take_standby().ok()
    }

    fn listening(&self) -> bool {
        self.reading.iter().any(|enabled| *enabled)
    }

    fn take_standby(&mut self) -> Result<StandbyMode<D>, Nrf24Error<D::Error>> {
        match self.mode.take() {
            Some(Mode::Standby(standby)) => Ok(standby),
            Some(Mode::Rx(rx)) => Ok(rx.standby()),
            None => Err(Nrf24Error::Unavailable),
        }
    }

    fn standby(&mut self) -> Result<&mut StandbyMode<D>, Nrf24Error<D::Error>> {
        let standby = self.take_standby()?;
        self.mode = Some(Mode::Standby(standby));
        match &mut self.mode {
            Some(Mode::Standby(standby)) => Ok(standby),
            _ => Err(Nrf24Error::Unavailable),
        }
    }

    /// Puts the chip back into whatever resting mode it should be in.
    fn park(&mut self, standby: StandbyMode<D>) -> Result<(), Nrf24Error<D::Error>> {
        if !self.listening() {
            self.mode = Some(Mode::Standby(standby));
            return Ok(());
        }
        match standby.rx() {
            Ok(rx) => {
                self.mode = Some(Mode::Rx(rx));
                Ok(())
            }
            Err((device, e)) => {
                self.recover(device);
                Err(Nrf24Error::Radio(e))
            }
        }
    }

    fn recover(&mut self, device: D) {
        self.mode = StandbyMode::power_up(device).ok().map(Mode::Standby);
    }

    /// Sends one packet from standby, leaving the chip in standby.
    fn send(
        &mut self,
        mut standby: StandbyMode<D>,
        data: &[u8],
    ) -> Result<(StandbyMode<D>, bool), Nrf24Error<D::Error>> {
        if self.ack {
            // the acknowledgement comes back on pipe 0
            let mut enabled = self.reading;
            enabled[PipeSlot::Writing.index() as usize] = true;
            if let Err(e) = standby.set_pipes_rx_enable(&enabled) {
                self.mode = Some(Mode::Standby(standby));
                return Err(Nrf24Error::Radio(e));
            }
        }

        let mut tx = match standby.tx() {
            Ok(tx) => tx,
            Err((device, e)) => {
                self.recover(device);
                return Err(Nrf24Error::Radio(e));
            }
        };
        let sent = tx.send(data).and_then(|()| nb::block!(tx.poll_send()));
        let mut standby = tx.standby().map_err(Nrf24Error::Radio)?;
        let sent = sent.map_err(Nrf24Error::Radio)?;

        if self.ack {
            if let Err(e) = standby.set_pipes_rx_enable(&self.reading) {
                self.mode = Some(Mode::Standby(standby));
                return Err(Nrf24Error::Radio(e));
            }
        }
        Ok((standby, sent))
    }
}

/// Pipes 2-5 only hold the byte that differs from pipe 1.
fn rx_addr_bytes(pipe: usize, address: &Address) -> &[u8] {
    if pipe < 2 {
        address.as_ref()
    } else {
        &address.as_ref()[..1]
    }
}

impl<D: Device> Driver for Nrf24Driver<D> {
    type Error = Nrf24Error<D::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        let settings = self.settings;
        let mut auto_ack = settings.auto_ack;
        auto_ack[PipeSlot::Writing.index() as usize] = false;

        let standby = self.standby()?;
        standby
            .set_frequency(settings.frequency)
            .map_err(Nrf24Error::Radio)?;
        standby
            .set_auto_retransmit(settings.retransmit_delay, settings.retransmit_count)
            .map_err(Nrf24Error::Radio)?;
        standby.set_auto_ack(&auto_ack).map_err(Nrf24Error::Radio)?;
        // dynamic payload lengths on every pipe
        standby
            .set_pipes_rx_lengths(&[None; PIPE_COUNT])
            .map_err(Nrf24Error::Radio)?;
        standby
            .set_pipes_rx_enable(&[false; PIPE_COUNT])
            .map_err(Nrf24Error::Radio)?;
        standby.flush_tx().map_err(Nrf24Error::Radio)?;
        standby.flush_rx().map_err(Nrf24Error::Radio)?;

        self.reading = [false; PIPE_COUNT];
        self.ack = false;
        Ok(())
    }

    fn set_read_address(&mut self, slot: PipeSlot, address: &Address) -> Result<(), Self::Error> {
        let pipe = slot.index() as usize;
        let standby = self.standby()?;
        standby
            .set_rx_addr(pipe, rx_addr_bytes(pipe, address))
            .map_err(Nrf24Error::Radio)
    }

    /// Pipe 0 receives the acknowledgement, so it follows the writing address.
    fn set_write_address(&mut self, address: &Address) -> Result<(), Self::Error> {
        let ack = self.settings.acknowledged(address);
        let mut auto_ack = self.settings.auto_ack;
        auto_ack[PipeSlot::Writing.index() as usize] = ack;

        let standby = self.standby()?;
        standby
            .set_tx_addr(address.as_ref())
            .map_err(Nrf24Error::Radio)?;
        standby
            .set_rx_addr(PipeSlot::Writing.index() as usize, address.as_ref())
            .map_err(Nrf24Error::Radio)?;
        standby.set_auto_ack(&auto_ack).map_err(Nrf24Error::Radio)?;

        self.ack = ack;
        Ok(())
    }

    fn set_reading(&mut self, enabled: &[bool; PIPE_COUNT]) -> Result<(), Self::Error> {
        let mut reading = *enabled;
        reading[PipeSlot::Writing.index() as usize] = false;

        let standby = self.standby()?;
        standby
            .set_pipes_rx_enable(&reading)
            .map_err(Nrf24Error::Radio)?;
        self.reading = reading;

        let standby = self.take_standby()?;
        self.park(standby)
    }

    fn write(&mut self, data: &[u8]) -> Result<bool, Self::Error> {
        let standby = self.take_standby()?;
        let (standby, sent) = self.send(standby, data)?;
        self.park(standby)?;
        Ok(sent)
    }

    fn read(&mut self) -> nb::Result<(u8, Payload), Self::Error> {
        if let Some(Mode::Standby(_)) = self.mode {
            let standby = self.take_standby()?;
            match standby.rx() {
                Ok(rx) => self.mode = Some(Mode::Rx(rx)),
                Err((device, e)) => {
                    self.recover(device);
                    return Err(nb::Error::Other(Nrf24Error::Radio(e)));
                }
            }
        }

        let rx = match &mut self.mode {
            Some(Mode::Rx(rx)) => rx,
            _ => return Err(nb::Error::Other(Nrf24Error::Unavailable)),
        };

        match rx.can_read().map_err(Nrf24Error::Radio)? {
            Some(pipe) => {
                let packet = rx.read().map_err(Nrf24Error::Radio)?;
                // embedded-nrf24l01 never hands out more than 32 bytes
                let payload = packet.iter().copied().collect();
                Ok((pipe, payload))
            }
            None => Err(nb::Error::WouldBlock),
        }
    }
}
