//! Typed reads from, and writes to, byte streams.
//!
//! [`ByteSource`] is implemented for [`Cursor`] over anything that derefs to bytes, and
//! [`ByteSink`] for `Vec<u8>`. Archive readers can implement either trait for their own
//! stream types.

use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Result};

/// A seekable source of typed values.
pub trait ByteSource {
    /// Current read position, in bytes from the start.
    fn position(&self) -> u64;

    /// Moves the read position to `pos`.
    fn seek(&mut self, pos: u64) -> Result<()>;

    /// Advances the read position by `count` bytes.
    fn skip(&mut self, count: u64) -> Result<()> {
        let pos = self.position().saturating_add(count);
        self.seek(pos)
    }

    /// Number of bytes between the read position and the end of the source.
    fn remaining_length(&self) -> u64;

    /// Reads one byte.
    fn read_u8(&mut self) -> Result<u8>;

    /// Reads a little-endian `u16`.
    fn read_u16_le(&mut self) -> Result<u16>;

    /// Reads a big-endian `u16`.
    fn read_u16_be(&mut self) -> Result<u16>;

    /// Reads a little-endian `u32`.
    fn read_u32_le(&mut self) -> Result<u32>;

    /// Reads a big-endian `u32`.
    fn read_u32_be(&mut self) -> Result<u32>;

    /// Reads a little-endian IEEE-754 `f32`.
    fn read_f32_le(&mut self) -> Result<f32>;

    /// Reads a big-endian IEEE-754 `f32`.
    fn read_f32_be(&mut self) -> Result<f32>;

    /// Reads exactly `count` bytes.
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>>;

    /// Reads up to `count` bytes, stopping early at the end of the source.
    fn read_available(&mut self, count: usize) -> Result<Vec<u8>> {
        let available = usize::try_from(self.remaining_length()).unwrap_or(usize::MAX);
        self.read_bytes(count.min(available))
    }
}

/// A sink for typed values.
pub trait ByteSink {
    /// Writes one byte.
    fn write_u8(&mut self, value: u8) -> Result<()>;

    /// Writes a little-endian `u16`.
    fn write_u16_le(&mut self, value: u16) -> Result<()>;

    /// Writes a big-endian `u16`.
    fn write_u16_be(&mut self, value: u16) -> Result<()>;

    /// Writes a little-endian `u32`.
    fn write_u32_le(&mut self, value: u32) -> Result<()>;

    /// Writes a big-endian `u32`.
    fn write_u32_be(&mut self, value: u32) -> Result<()>;

    /// Writes a little-endian IEEE-754 `f32`.
    fn write_f32_le(&mut self, value: f32) -> Result<()>;

    /// Writes raw bytes.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    #[inline]
    fn position(&self) -> u64 {
        Cursor::position(self)
    }

    #[inline]
    fn seek(&mut self, pos: u64) -> Result<()> {
        self.set_position(pos);
        Ok(())
    }

    #[inline]
    fn remaining_length(&self) -> u64 {
        let len = self.get_ref().as_ref().len() as u64;
        len.saturating_sub(Cursor::position(self))
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        ReadBytesExt::read_u8(self)
    }

    #[inline]
    fn read_u16_le(&mut self) -> Result<u16> {
        self.read_u16::<LittleEndian>()
    }

    #[inline]
    fn read_u16_be(&mut self) -> Result<u16> {
        self.read_u16::<BigEndian>()
    }

    #[inline]
    fn read_u32_le(&mut self) -> Result<u32> {
        self.read_u32::<LittleEndian>()
    }

    #[inline]
    fn read_u32_be(&mut self) -> Result<u32> {
        self.read_u32::<BigEndian>()
    }

    #[inline]
    fn read_f32_le(&mut self) -> Result<f32> {
        self.read_f32::<LittleEndian>()
    }

    #[inline]
    fn read_f32_be(&mut self) -> Result<f32> {
        self.read_f32::<BigEndian>()
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; count];
        self.read_exact(&mut bytes)?;
        Ok(bytes)
    }
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        WriteBytesExt::write_u8(self, value)
    }

    #[inline]
    fn write_u16_le(&mut self, value: u16) -> Result<()> {
        self.write_u16::<LittleEndian>(value)
    }

    #[inline]
    fn write_u16_be(&mut self, value: u16) -> Result<()> {
        self.write_u16::<BigEndian>(value)
    }

    #[inline]
    fn write_u32_le(&mut self, value: u32) -> Result<()> {
        self.write_u32::<LittleEndian>(value)
    }

    #[inline]
    fn write_u32_be(&mut self, value: u32) -> Result<()> {
        self.write_u32::<BigEndian>(value)
    }

    #[inline]
    fn write_f32_le(&mut self, value: f32) -> Result<()> {
        self.write_f32::<LittleEndian>(value)
    }

    #[inline]
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn reads_both_endians() {
        let mut source = Cursor::new([0x12u8, 0x34, 0x12, 0x34, 0xAA]);
        assert_eq!(source.read_u16_le().unwrap(), 0x3412);
        assert_eq!(source.read_u16_be().unwrap(), 0x1234);
        assert_eq!(source.remaining_length(), 1);
        assert_eq!(ByteSource::read_u8(&mut source).unwrap(), 0xAA);
        assert_eq!(source.remaining_length(), 0);
    }

    #[test]
    fn short_read_is_unexpected_eof() {
        let mut source = Cursor::new(vec![1u8, 2, 3]);
        let error = source.read_u32_le().unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn read_available_stops_at_end() {
        let mut source = Cursor::new(&[1u8, 2, 3][..]);
        source.skip(1).unwrap();
        assert_eq!(source.read_available(8).unwrap(), [2, 3]);
    }

    #[test]
    fn seeking_past_the_end_leaves_nothing_remaining() {
        let mut source = Cursor::new(&[1u8, 2][..]);
        ByteSource::seek(&mut source, 10).unwrap();
        assert_eq!(source.remaining_length(), 0);
    }

    #[test]
    fn floats_round_trip() {
        let mut sink: Vec<u8> = Vec::new();
        sink.write_f32_le(0.5).unwrap();
        ByteSink::write_u8(&mut sink, 7).unwrap();
        sink.write_u32_be(0x0102_0304).unwrap();

        let mut source = Cursor::new(sink);
        assert_eq!(source.read_f32_le().unwrap(), 0.5);
        assert_eq!(ByteSource::read_u8(&mut source).unwrap(), 7);
        assert_eq!(source.read_u32_be().unwrap(), 0x0102_0304);
    }
}
