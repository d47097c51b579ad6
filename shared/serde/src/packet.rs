use crate::error::UnderflowError;

/// An ordered, growable byte sequence with an append-only write cursor and an
/// independent, stateful read cursor.
///
/// Writes append fixed-width little-endian encodings; reads consume in the
/// order values were written, advancing the read cursor by the exact encoded
/// width. No operation skips or pads. The buffer knows nothing about message
/// boundaries or framing, that is the transport's concern.
pub struct Packet {
    buffer: Vec<u8>,
    read_pos: usize,
}

impl Packet {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            read_pos: 0,
        }
    }

    /// Wrap an already-received payload for reading.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buffer: bytes,
            read_pos: 0,
        }
    }

    /// Total number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Bytes left between the read cursor and the written length.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.read_pos
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(u8::from(value));
    }

    pub fn write_byte(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_int(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    pub fn read_bool(&mut self) -> Result<bool, UnderflowError> {
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_byte(&mut self) -> Result<u8, UnderflowError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_int(&mut self) -> Result<i32, UnderflowError> {
        let bytes = self.take(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn take(&mut self, width: usize) -> Result<&[u8], UnderflowError> {
        if self.remaining() < width {
            return Err(UnderflowError {
                requested: width,
                remaining: self.remaining(),
            });
        }
        let start = self.read_pos;
        self.read_pos += width;
        Ok(&self.buffer[start..self.read_pos])
    }
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

/// A value that can write itself into and read itself back out of a
/// [`Packet`].
///
/// `read_data` must consume exactly the bytes `write_data` produced, in the
/// same order.
pub trait PacketData: Sized {
    fn write_data(&self, packet: &mut Packet);

    fn read_data(packet: &mut Packet) -> Result<Self, UnderflowError>;
}
