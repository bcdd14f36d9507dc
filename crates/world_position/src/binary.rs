//! Compact binary encoding of positions for network packets
//!
//! A position goes on the wire as a bare run of 32-bit floats in field
//! order, with no length prefix or tag:
//!
//! - [`StreamShape::Xyz`]: `x, y, z`
//! - [`StreamShape::Xyzo`]: `x, y, z, orientation`
//!
//! The protocol framing around it decides which shape is present. Byte order
//! belongs to the stream; [`ByteBuffer`] uses little-endian.

use crate::angle::normalize_orientation;
use crate::error::{PositionError, Result};
use crate::location::{MapId, WorldLocation};
use crate::position::Position;
use std::mem;
use tracing::{debug, trace};

/// Ordered float reads and writes over some byte stream.
pub trait FloatStream {
    /// Appends one float.
    fn write_f32(&mut self, value: f32);

    /// Consumes the next float.
    fn read_f32(&mut self) -> Result<f32>;
}

/// Which fields of a [`Position`] are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamShape {
    /// x, y, z
    Xyz,
    /// x, y, z, orientation
    Xyzo,
}

impl StreamShape {
    /// Number of 32-bit floats in the encoding.
    pub const fn float_count(self) -> usize {
        match self {
            StreamShape::Xyz => 3,
            StreamShape::Xyzo => 4,
        }
    }

    /// Encoded size in bytes.
    pub const fn byte_len(self) -> usize {
        self.float_count() * mem::size_of::<f32>()
    }
}

/// Growable little-endian byte buffer with a read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    read_pos: usize,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            read_pos: 0,
        }
    }

    /// All bytes written so far, including already-read ones.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning every byte written.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Total bytes written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_pos
    }

    /// Appends a little-endian `u32`.
    pub fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    /// Returns [`PositionError::BufferUnderflow`] when fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.take::<4>()?))
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let remaining = self.remaining();
        if remaining < N {
            debug!("Byte buffer underflow: needed {} bytes, {} remaining", N, remaining);
            return Err(PositionError::BufferUnderflow {
                needed: N,
                remaining,
            });
        }

        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.data[self.read_pos..self.read_pos + N]);
        self.read_pos += N;
        Ok(bytes)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data, read_pos: 0 }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self::from(data.to_vec())
    }
}

impl FloatStream for ByteBuffer {
    fn write_f32(&mut self, value: f32) {
        self.data.extend_from_slice(&value.to_le_bytes());
    }

    fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.take::<4>()?))
    }
}

impl Position {
    /// Writes the fields selected by `shape` in field order.
    pub fn write_to<S: FloatStream + ?Sized>(&self, stream: &mut S, shape: StreamShape) {
        stream.write_f32(self.x);
        stream.write_f32(self.y);
        stream.write_f32(self.z);
        if shape == StreamShape::Xyzo {
            stream.write_f32(self.orientation());
        }
    }

    /// Overwrites the fields selected by `shape` from the stream.
    ///
    /// A decoded orientation is normalized. If the stream runs dry the
    /// position is left unchanged, though the stream may have advanced.
    pub fn read_from<S: FloatStream + ?Sized>(
        &mut self,
        stream: &mut S,
        shape: StreamShape,
    ) -> Result<()> {
        let x = stream.read_f32()?;
        let y = stream.read_f32()?;
        let z = stream.read_f32()?;

        match shape {
            StreamShape::Xyz => self.relocate_xyz(x, y, z),
            StreamShape::Xyzo => {
                let orientation = stream.read_f32()?;
                if normalize_orientation(orientation) != orientation {
                    trace!("Normalizing decoded orientation {}", orientation);
                }
                self.relocate(x, y, z, orientation);
            }
        }
        Ok(())
    }

    /// Writes x, y, z.
    pub fn write_xyz<S: FloatStream + ?Sized>(&self, stream: &mut S) {
        self.write_to(stream, StreamShape::Xyz);
    }

    /// Writes x, y, z, orientation.
    pub fn write_xyzo<S: FloatStream + ?Sized>(&self, stream: &mut S) {
        self.write_to(stream, StreamShape::Xyzo);
    }

    /// Reads x, y, z, keeping the current orientation.
    pub fn read_xyz<S: FloatStream + ?Sized>(&mut self, stream: &mut S) -> Result<()> {
        self.read_from(stream, StreamShape::Xyz)
    }

    /// Reads x, y, z, orientation, normalizing the orientation.
    pub fn read_xyzo<S: FloatStream + ?Sized>(&mut self, stream: &mut S) -> Result<()> {
        self.read_from(stream, StreamShape::Xyzo)
    }
}

/// Standalone byte encoding for types carried whole in a packet.
pub trait BinarySerializable {
    /// Encodes `self` into a fresh byte vector.
    fn serialize_binary(&self) -> Vec<u8>;

    /// Decodes a value from the start of `data`.
    fn deserialize_binary(data: &[u8]) -> Result<Self>
    where
        Self: Sized;
}

/// Encoded as the [`StreamShape::Xyzo`] shape.
impl BinarySerializable for Position {
    fn serialize_binary(&self) -> Vec<u8> {
        let mut buffer = ByteBuffer::with_capacity(StreamShape::Xyzo.byte_len());
        self.write_xyzo(&mut buffer);
        buffer.into_bytes()
    }

    fn deserialize_binary(data: &[u8]) -> Result<Self> {
        let mut buffer = ByteBuffer::from(data);
        let mut pos = Position::default();
        pos.read_xyzo(&mut buffer)?;
        Ok(pos)
    }
}

/// Encoded as the map id (`u32`) followed by the [`StreamShape::Xyzo`] shape.
impl BinarySerializable for WorldLocation {
    fn serialize_binary(&self) -> Vec<u8> {
        let mut buffer =
            ByteBuffer::with_capacity(mem::size_of::<u32>() + StreamShape::Xyzo.byte_len());
        buffer.write_u32(self.map_id.0);
        self.position.write_xyzo(&mut buffer);
        buffer.into_bytes()
    }

    fn deserialize_binary(data: &[u8]) -> Result<Self> {
        let mut buffer = ByteBuffer::from(data);
        let map_id = MapId(buffer.read_u32()?);
        let mut position = Position::default();
        position.read_xyzo(&mut buffer)?;
        Ok(WorldLocation::from_position(map_id, position))
    }
}
