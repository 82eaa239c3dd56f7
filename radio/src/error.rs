use dino_protocol::{InvalidClientIndex, MAX_PAYLOAD};

/// The transceiver could not be brought up. Nothing else will work.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum InitError<E> {
    #[error("radio init failed: {0:?}")]
    InitFailure(E),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ConfigError<E> {
    #[error(transparent)]
    InvalidClientIndex(#[from] InvalidClientIndex),

    #[error("radio not initialized")]
    NotInitialized,

    /// The hardware was left part way through reconfiguration.
    #[error("radio driver error while configuring pipes: {0:?}")]
    Driver(E),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum TransmitError<E> {
    #[error("payload too large ({0} bytes, max {max})", max = MAX_PAYLOAD)]
    PayloadTooLarge(usize),

    #[error("radio pipes not configured")]
    NotConfigured,

    /// The packet went out but was not acknowledged. Retrying is up to the caller.
    #[error("packet not delivered")]
    DeliveryFailed,

    #[error("radio driver error while transmitting: {0:?}")]
    Driver(E),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum ReceiveError<E> {
    #[error("radio pipes not configured")]
    NotConfigured,

    /// A packet arrived on a slot with no channel bound to it.
    #[error("packet on unexpected pipe {0}")]
    UnexpectedPipe(u8),

    #[error("radio driver error while receiving: {0:?}")]
    Driver(E),
}
