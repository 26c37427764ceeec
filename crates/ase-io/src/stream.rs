//! Little-endian byte cursor over an in-memory block.
//!
//! Every multi-byte field of the sprite format is little-endian, so the
//! reader fixes the byte order once instead of threading it through every
//! call site. Reads that run off the end map to [`AseError::Truncated`],
//! which callers treat as a structural failure.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::error::{AseError, AseResult};

/// Sequential reader over a byte slice with position get/set.
pub struct ByteReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

macro_rules! read_le {
    ($name:ident, $ty:ty) => {
        /// Reads a little-endian value.
        #[inline]
        pub fn $name(&mut self) -> AseResult<$ty> {
            self.cursor
                .$name::<LittleEndian>()
                .map_err(|_| AseError::Truncated(stringify!($ty)))
        }
    };
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current byte position.
    #[inline]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Moves the cursor to an absolute position.
    #[inline]
    pub fn set_position(&mut self, pos: u64) {
        self.cursor.set_position(pos);
    }

    /// Bytes left between the cursor and the end of the block.
    #[inline]
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        len.saturating_sub(self.cursor.position()) as usize
    }

    /// True once the cursor has reached the end.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> AseResult<u8> {
        self.cursor
            .read_u8()
            .map_err(|_| AseError::Truncated("u8"))
    }

    /// Reads a single signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> AseResult<i8> {
        self.cursor
            .read_i8()
            .map_err(|_| AseError::Truncated("i8"))
    }

    read_le!(read_u16, u16);
    read_le!(read_i16, i16);
    read_le!(read_u32, u32);
    read_le!(read_i32, i32);
    read_le!(read_u64, u64);
    read_le!(read_i64, i64);
    read_le!(read_f32, f32);
    read_le!(read_f64, f64);

    /// Reads exactly `buf.len()` bytes.
    pub fn read_exact(&mut self, buf: &mut [u8]) -> AseResult<()> {
        self.cursor
            .read_exact(buf)
            .map_err(|_| AseError::Truncated("byte block"))
    }

    /// Reads `n` bytes into a fresh vector.
    pub fn read_bytes(&mut self, n: usize) -> AseResult<Vec<u8>> {
        if self.remaining() < n {
            return Err(AseError::Truncated("byte block"));
        }
        let mut buf = vec![0u8; n];
        self.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads everything from the cursor to the end of the block.
    pub fn read_remaining(&mut self) -> Vec<u8> {
        let start = self.cursor.position() as usize;
        let rest = self.cursor.get_ref()[start..].to_vec();
        self.cursor.set_position(self.cursor.get_ref().len() as u64);
        rest
    }

    /// Advances the cursor by `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> AseResult<()> {
        if self.remaining() < n {
            return Err(AseError::Truncated("padding"));
        }
        self.cursor.set_position(self.cursor.position() + n as u64);
        Ok(())
    }

    /// Reads a length-prefixed string: u16 byte count, then that many
    /// bytes interpreted as UTF-8 (lossily, as sprite names are free text).
    pub fn read_string(&mut self) -> AseResult<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
