use core::convert::TryFrom;

use serde::{Deserialize, Serialize};

use crate::{ANIMATION_COMMON_ADDRESS, CLIENT_SPECIFIC_START, MAX_CLIENTS, META_ADDRESS};

/// A client index that falls outside the client-specific address range.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("client index {0} out of range (max {max})", max = MAX_CLIENTS - 1)]
pub struct InvalidClientIndex(pub u8);

/// Index of a client device, `0..MAX_CLIENTS`.
///
/// Each client owns the address `CLIENT_SPECIFIC_START + index`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct ClientIndex(u8);

impl ClientIndex {
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < MAX_CLIENTS {
            Some(ClientIndex(index))
        } else {
            None
        }
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Every valid client index in ascending order.
    pub fn all() -> impl Iterator<Item = ClientIndex> {
        (0..MAX_CLIENTS as u8).map(ClientIndex)
    }
}

impl TryFrom<u8> for ClientIndex {
    type Error = InvalidClientIndex;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        ClientIndex::new(index).ok_or(InvalidClientIndex(index))
    }
}

impl From<ClientIndex> for u8 {
    fn from(index: ClientIndex) -> u8 {
        index.0
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum LogicalChannel {
    Meta,
    AnimationCommon,
    AnimationClientSpecific(ClientIndex),
}

impl LogicalChannel {
    /// The one byte that distinguishes this channel's pipe address.
    pub const fn logical_address(self) -> u8 {
        match self {
            LogicalChannel::Meta => META_ADDRESS,
            LogicalChannel::AnimationCommon => ANIMATION_COMMON_ADDRESS,
            LogicalChannel::AnimationClientSpecific(client) => CLIENT_SPECIFIC_START + client.0,
        }
    }

    /// Inverse of `logical_address`. Addresses 2-127 are unallocated.
    pub fn from_logical_address(address: u8) -> Option<Self> {
        match address {
            META_ADDRESS => Some(LogicalChannel::Meta),
            ANIMATION_COMMON_ADDRESS => Some(LogicalChannel::AnimationCommon),
            a if a >= CLIENT_SPECIFIC_START => Some(LogicalChannel::AnimationClientSpecific(
                ClientIndex(a - CLIENT_SPECIFIC_START),
            )),
            _ => None,
        }
    }

    /// Slot a receiver listens on for this channel.
    pub const fn reading_slot(self) -> PipeSlot {
        match self {
            LogicalChannel::Meta => PipeSlot::Meta,
            LogicalChannel::AnimationCommon => PipeSlot::AnimationCommon,
            LogicalChannel::AnimationClientSpecific(_) => PipeSlot::AnimationClientSpecific,
        }
    }
}

/// Allocation of the radio's hardware pipe indexes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum PipeSlot {
    /// The single writing pipe. Its address is changed before each write.
    Writing,
    /// All radios listen to a single address here.
    Meta,
    /// All animation-receiving radios listen to a single address here.
    AnimationCommon,
    /// All animation-receiving radios listen to their own address here.
    AnimationClientSpecific,
}

impl PipeSlot {
    pub const fn index(self) -> u8 {
        match self {
            PipeSlot::Writing => 0,
            PipeSlot::Meta => 1,
            PipeSlot::AnimationCommon => 2,
            PipeSlot::AnimationClientSpecific => 3,
        }
    }

    /// Slots 4 and 5 exist in hardware but are not allocated.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PipeSlot::Writing),
            1 => Some(PipeSlot::Meta),
            2 => Some(PipeSlot::AnimationCommon),
            3 => Some(PipeSlot::AnimationClientSpecific),
            _ => None,
        }
    }

    pub const fn is_writable(self) -> bool {
        match self {
            PipeSlot::Writing => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PIPE_COUNT;

    #[test]
    fn client_index_bounds() {
        assert_eq!(ClientIndex::new(0).map(ClientIndex::get), Some(0));
        assert_eq!(ClientIndex::new(127).map(ClientIndex::get), Some(127));
        assert_eq!(ClientIndex::new(128), None);
        assert_eq!(ClientIndex::try_from(255), Err(InvalidClientIndex(255)));
        assert_eq!(ClientIndex::all().count(), MAX_CLIENTS);
    }

    #[test]
    fn logical_addresses_invert() {
        assert_eq!(LogicalChannel::from_logical_address(0), Some(LogicalChannel::Meta));
        assert_eq!(LogicalChannel::from_logical_address(1), Some(LogicalChannel::AnimationCommon));
        for address in 2..CLIENT_SPECIFIC_START {
            assert_eq!(LogicalChannel::from_logical_address(address), None);
        }
        for client in ClientIndex::all() {
            let channel = LogicalChannel::AnimationClientSpecific(client);
            assert_eq!(
                LogicalChannel::from_logical_address(channel.logical_address()),
                Some(channel)
            );
        }
    }

    #[test]
    fn only_slot_zero_writes() {
        for index in 0..PIPE_COUNT as u8 {
            match PipeSlot::from_index(index) {
                Some(slot) => {
                    assert_eq!(slot.index(), index);
                    assert_eq!(slot.is_writable(), index == 0);
                }
                None => assert!(index >= 4),
            }
        }
    }

    #[test]
    fn channels_read_on_their_slots() {
        let client = ClientIndex::new(9).unwrap();
        assert_eq!(LogicalChannel::Meta.reading_slot().index(), 1);
        assert_eq!(LogicalChannel::AnimationCommon.reading_slot().index(), 2);
        assert_eq!(
            LogicalChannel::AnimationClientSpecific(client).reading_slot().index(),
            3
        );
    }
}
