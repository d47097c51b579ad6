use replica_serde::{Packet, PacketData, PacketDataCollection, UnderflowError};

use crate::types::EntityId;

/// One replicated entity trigger as it travels between peers.
///
/// Wire layout: `entity_id | wire_index | payload`. Both current syncable
/// variants imply all their data through the index, so `payload` is empty
/// today and reserved for variant-defined extensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncEvent {
    pub entity_id: EntityId,
    pub wire_index: u8,
    pub payload: Vec<u8>,
}

impl SyncEvent {
    pub fn new(entity_id: EntityId, wire_index: u8) -> Self {
        Self {
            entity_id,
            wire_index,
            payload: Vec::new(),
        }
    }

    /// Decode one batched update payload, as produced by
    /// [`EntityController::flush_outgoing`](crate::EntityController::flush_outgoing).
    pub fn read_batch(packet: &mut Packet) -> Result<Vec<SyncEvent>, UnderflowError> {
        Ok(PacketDataCollection::<SyncEvent>::read_data(packet)?.into_instances())
    }
}

impl PacketData for SyncEvent {
    fn write_data(&self, packet: &mut Packet) {
        packet.write_byte(self.entity_id);
        packet.write_byte(self.wire_index);
        // payload is variant-defined and currently empty for both variants
    }

    fn read_data(packet: &mut Packet) -> Result<Self, UnderflowError> {
        Ok(Self {
            entity_id: packet.read_byte()?,
            wire_index: packet.read_byte()?,
            payload: Vec::new(),
        })
    }
}
