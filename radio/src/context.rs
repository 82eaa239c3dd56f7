use core::convert::TryFrom;

use dino_protocol::{
    write_address, Address, ClientIndex, LogicalChannel, PipeSlot, RadioConfig, MAX_PAYLOAD,
};

use crate::{ConfigError, Driver, InitError, Log, NoLog, Payload, ReceiveError, TransmitError};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum State {
    Uninitialized,
    Initialized,
    Configured(RadioConfig),
}

/// A packet received on one of the configured channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub channel: LogicalChannel,
    pub payload: Payload,
}

/// Owns the transceiver and its pipe bindings.
///
/// Every operation takes `&mut self`: there is one writing pipe and it is
/// rebound before every transmission, so only one caller may use the radio at
/// a time. If receive interrupts and the application both need it, the
/// embedding firmware has to lock around the context.
pub struct RadioContext<D: Driver, L: Log = NoLog> {
    driver: D,
    log: L,
    state: State,
}

impl<D: Driver, L: Log> RadioContext<D, L> {
    pub fn new(driver: D, log: L) -> Self {
        RadioContext {
            driver,
            log,
            state: State::Uninitialized,
        }
    }

    /// Brings up the transceiver. Does _not_ set up receiving or transmitting.
    ///
    /// Calling it again once it has succeeded does nothing.
    pub fn init(&mut self) -> Result<(), InitError<D::Error>> {
        if self.state != State::Uninitialized {
            return Ok(());
        }

        match self.driver.init() {
            Ok(()) => {
                self.state = State::Initialized;
                self.log.log_str("radio: initialized\n");
                Ok(())
            }
            Err(e) => {
                self.log.log_str("radio: init failed\n");
                Err(InitError::InitFailure(e))
            }
        }
    }

    /// Sets up the reading pipes.
    ///
    /// Meta is always received. Animation-receiving devices also listen on
    /// the common channel and on the channel of `client_index`. The index is
    /// checked before any register is touched.
    pub fn configure_pipes(
        &mut self,
        receiving_animation: bool,
        client_index: u8,
    ) -> Result<(), ConfigError<D::Error>> {
        let client_index = ClientIndex::try_from(client_index)?;
        self.configure(RadioConfig::new(receiving_animation, client_index))
    }

    pub fn configure(&mut self, config: RadioConfig) -> Result<(), ConfigError<D::Error>> {
        if self.state == State::Uninitialized {
            return Err(ConfigError::NotInitialized);
        }

        // Bindings are unknown until the whole sequence succeeds.
        self.state = State::Initialized;

        for (slot, address) in config.bindings() {
            self.driver
                .set_read_address(slot, &address)
                .map_err(ConfigError::Driver)?;
            self.log.log_str("radio: pipe ");
            self.log.log_num(slot.index() as u32);
            self.log.log_str(" reads ");
            self.log.log_num(address.logical() as u32);
            self.log.log_str("\n");
        }

        self.driver
            .set_reading(&config.reading_enabled())
            .map_err(ConfigError::Driver)?;

        self.state = State::Configured(config);
        Ok(())
    }

    /// Transmits `payload` to `target`. The maximum payload size is 32 bytes.
    ///
    /// The writing pipe is rebound to the target's address first. A packet
    /// that is not acknowledged is reported as `DeliveryFailed` and not retried.
    pub fn transmit(
        &mut self,
        target: LogicalChannel,
        payload: &[u8],
    ) -> Result<(), TransmitError<D::Error>> {
        if payload.len() > MAX_PAYLOAD {
            return Err(TransmitError::PayloadTooLarge(payload.len()));
        }
        if !self.is_configured() {
            return Err(TransmitError::NotConfigured);
        }

        let address = write_address(target);
        self.driver
            .set_write_address(&address)
            .map_err(TransmitError::Driver)?;

        match self.driver.write(payload) {
            Ok(true) => Ok(()),
            Ok(false) => {
                self.log.log_str("radio: no ack from ");
                self.log.log_num(address.logical() as u32);
                self.log.log_str("\n");
                Err(TransmitError::DeliveryFailed)
            }
            Err(e) => Err(TransmitError::Driver(e)),
        }
    }

    /// Takes the next pending packet and tags it with the channel it arrived on.
    pub fn receive(&mut self) -> nb::Result<Packet, ReceiveError<D::Error>> {
        let config = match self.state {
            State::Configured(config) => config,
            _ => return Err(nb::Error::Other(ReceiveError::NotConfigured)),
        };

        let (index, payload) = self
            .driver
            .read()
            .map_err(|e| e.map(ReceiveError::Driver))?;

        let channel = PipeSlot::from_index(index)
            .and_then(|slot| config.channel_on(slot))
            .ok_or(nb::Error::Other(ReceiveError::UnexpectedPipe(index)))?;

        Ok(Packet { channel, payload })
    }

    pub fn resolve_write_address(&self, target: LogicalChannel) -> Address {
        write_address(target)
    }

    pub fn config(&self) -> Option<&RadioConfig> {
        match &self.state {
            State::Configured(config) => Some(config),
            _ => None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config().is_some()
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    #[cfg(test)]
    fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn release(self) -> (D, L) {
        (self.driver, self.log)
    }
}
