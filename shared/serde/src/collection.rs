use crate::{
    error::UnderflowError,
    packet::{Packet, PacketData},
};

/// Maximum number of records one collection can carry on the wire; the count
/// prefix is a single byte.
pub const MAX_COLLECTION_LEN: usize = u8::MAX as usize;

/// An ordered sequence of up to 255 uniformly-typed records.
///
/// The record count is explicit on the wire (one length byte), never inferred
/// from the remaining payload. If more than [`MAX_COLLECTION_LEN`] records are
/// supplied, encoding silently truncates to the first 255; callers that cannot
/// tolerate truncation must enforce the cap upstream.
// TODO: allow a larger/customizable record count; it is currently limited by
// the one-byte length prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketDataCollection<T: PacketData> {
    instances: Vec<T>,
}

impl<T: PacketData> PacketDataCollection<T> {
    pub fn new() -> Self {
        Self {
            instances: Vec::new(),
        }
    }

    pub fn from_vec(instances: Vec<T>) -> Self {
        Self { instances }
    }

    pub fn push(&mut self, instance: T) {
        self.instances.push(instance);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[T] {
        &self.instances
    }

    pub fn into_instances(self) -> Vec<T> {
        self.instances
    }
}

impl<T: PacketData> Default for PacketDataCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PacketData> PacketData for PacketDataCollection<T> {
    fn write_data(&self, packet: &mut Packet) {
        let length = self.instances.len().min(MAX_COLLECTION_LEN);

        packet.write_byte(length as u8);

        for instance in &self.instances[..length] {
            instance.write_data(packet);
        }
    }

    fn read_data(packet: &mut Packet) -> Result<Self, UnderflowError> {
        let length = packet.read_byte()?;

        let mut instances = Vec::with_capacity(usize::from(length));
        for _ in 0..length {
            instances.push(T::read_data(packet)?);
        }

        Ok(Self { instances })
    }
}
