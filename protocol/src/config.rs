use core::iter;

use serde::{Deserialize, Serialize};

use crate::{write_address, Address, ClientIndex, LogicalChannel, PipeSlot, PIPE_COUNT};

/// How a device listens. Serializable so it can be handed out over the meta channel.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Eq, PartialEq)]
pub struct RadioConfig {
    pub receiving_animation: bool,
    pub client_index: ClientIndex,
}

impl RadioConfig {
    pub fn new(receiving_animation: bool, client_index: ClientIndex) -> Self {
        RadioConfig {
            receiving_animation,
            client_index,
        }
    }

    /// Channels this device listens to. Meta is always first.
    pub fn channels(&self) -> impl Iterator<Item = LogicalChannel> {
        let animation = if self.receiving_animation {
            Some((
                LogicalChannel::AnimationCommon,
                LogicalChannel::AnimationClientSpecific(self.client_index),
            ))
        } else {
            None
        };

        iter::once(LogicalChannel::Meta).chain(
            animation
                .into_iter()
                .flat_map(|(common, client)| iter::once(common).chain(iter::once(client))),
        )
    }

    /// The reading slot bindings this configuration needs, in programming order.
    pub fn bindings(&self) -> impl Iterator<Item = (PipeSlot, Address)> {
        self.channels()
            .map(|channel| (channel.reading_slot(), write_address(channel)))
    }

    /// Reading slots that should be enabled, indexed by slot.
    pub fn reading_enabled(&self) -> [bool; PIPE_COUNT] {
        let mut enabled = [false; PIPE_COUNT];
        for (slot, _) in self.bindings() {
            enabled[slot.index() as usize] = true;
        }
        enabled
    }

    /// The channel bound to `slot`, if any.
    pub fn channel_on(&self, slot: PipeSlot) -> Option<LogicalChannel> {
        self.channels().find(|channel| channel.reading_slot() == slot)
    }
}
