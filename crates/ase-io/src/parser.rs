//! Structural parsing: file header, frame sub-headers, raw chunks.
//!
//! This stage has no chunk-type knowledge. It walks the frame/chunk
//! stream, validates the header magic, and collects each chunk's raw
//! payload for the typed decoders in [`crate::chunks`] to pick over.
//!
//! Any stream error on a fixed-width read here is fatal for the file:
//! no partially populated [`AseFile`] escapes.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{AseError, AseResult};
use crate::model::{
    AseFile, CHUNK_HEADER_SIZE, FRAME_MAGIC, Frame, HEADER_MAGIC, Header, RawChunk,
};
use crate::stream::ByteReader;

/// Parses a complete sprite file from memory.
///
/// Produces the structural model only: frames hold raw chunks. Call
/// [`AseFile::decode_chunks`] (or the individual passes in
/// [`crate::chunks`]) to populate the typed collections.
///
/// # Example
///
/// ```rust,ignore
/// let data = std::fs::read("player.aseprite")?;
/// let mut file = ase_io::parser::parse(&data)?;
/// file.decode_chunks()?;
/// ```
pub fn parse(data: &[u8]) -> AseResult<AseFile> {
    let mut r = ByteReader::new(data);
    let header = read_header(&mut r)?;

    let mut frames = Vec::with_capacity(header.frames as usize);
    for _ in 0..header.frames {
        frames.push(read_frame(&mut r)?);
    }

    Ok(AseFile { header, frames })
}

/// Reads and validates the fixed 128-byte header.
pub(crate) fn read_header(r: &mut ByteReader<'_>) -> AseResult<Header> {
    let file_size = r.read_u32()?;
    let magic = r.read_u16()?;
    if magic != HEADER_MAGIC {
        return Err(AseError::BadMagic {
            expected: HEADER_MAGIC,
            found: magic,
        });
    }

    let frames = r.read_u16()?;
    let width = r.read_u16()?;
    let height = r.read_u16()?;
    let depth = r.read_u16()?;
    let flags = r.read_u32()?;
    let speed = r.read_u16()?;
    r.skip(8)?; // two reserved dwords
    let transparent_index = r.read_u8()?;
    r.skip(3)?;
    let num_colors = r.read_u16()?;
    let pixel_width = r.read_u8()?;
    let pixel_height = r.read_u8()?;
    let grid_x = r.read_i16()?;
    let grid_y = r.read_i16()?;
    let grid_width = r.read_u16()?;
    let grid_height = r.read_u16()?;
    r.skip(84)?; // reserved for future use

    Ok(Header {
        file_size,
        magic,
        frames,
        width,
        height,
        depth,
        flags,
        speed,
        transparent_index,
        num_colors,
        pixel_width,
        pixel_height,
        grid_x,
        grid_y,
        grid_width,
        grid_height,
    })
}

/// Reads one frame sub-header and its chunk sequence.
pub(crate) fn read_frame(r: &mut ByteReader<'_>) -> AseResult<Frame> {
    let bytes_in_frame = r.read_u32()?;
    let magic = r.read_u16()?;
    if magic != FRAME_MAGIC {
        // The frame keeps decoding; a wrong sub-header magic has never
        // been fatal in practice and the chunk walk below self-checks.
        tracing::warn!(
            "frame magic mismatch: expected 0x{:04X}, found 0x{:04X}",
            FRAME_MAGIC,
            magic
        );
    }
    let num_chunks = r.read_u16()?;
    let duration_ms = r.read_u16()?;
    r.skip(2)?;
    let new_num_chunks = r.read_u32()?;

    let mut frame = Frame {
        bytes_in_frame,
        duration_ms,
        num_chunks,
        new_num_chunks,
        ..Default::default()
    };

    // The declared count comes from the file; cap the reservation and
    // let the chunk reads themselves fail on a lying count.
    let count = frame.chunk_count();
    frame.chunks.reserve(count.min(1024) as usize);
    for _ in 0..count {
        frame.chunks.push(read_chunk(r)?);
    }

    Ok(frame)
}

fn read_chunk(r: &mut ByteReader<'_>) -> AseResult<RawChunk> {
    let size = r.read_u32()?;
    let tag = r.read_u16()?;
    if size < CHUNK_HEADER_SIZE {
        return Err(AseError::MissingData(format!(
            "chunk declares size {size}, smaller than its own header"
        )));
    }
    let data = r.read_bytes((size - CHUNK_HEADER_SIZE) as usize)?;
    Ok(RawChunk { size, tag, data })
}

// === SpriteBank ===

/// Caller-owned mapping from sprite name to decoded file.
///
/// Names default to the source file stem, mirroring how asset pipelines
/// key sprites by path. The bank performs **no internal synchronization**;
/// if it is shared across threads, the caller provides the locking.
/// Key uniqueness is likewise the caller's responsibility: loading two
/// paths with the same stem replaces the earlier entry.
///
/// # Example
///
/// ```rust,ignore
/// use ase_io::SpriteBank;
///
/// let mut bank = SpriteBank::new();
/// bank.load("assets/player.aseprite")?;
/// let file = bank.get("player").unwrap();
/// println!("{} frames", file.frames.len());
/// ```
#[derive(Debug, Default)]
pub struct SpriteBank {
    files: HashMap<String, AseFile>,
}

impl SpriteBank {
    /// Creates an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and fully decodes a sprite file, keyed by its file stem.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors, on structural parse failures, and when the
    /// path has no usable file stem.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> AseResult<&AseFile> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| {
                AseError::MissingData(format!("cannot derive a sprite name from {path:?}"))
            })?;
        let data = std::fs::read(path)?;
        self.insert_from_memory(name, &data)
    }

    /// Parses and fully decodes a sprite from memory under an explicit name.
    pub fn insert_from_memory(&mut self, name: impl Into<String>, data: &[u8]) -> AseResult<&AseFile> {
        let mut file = parse(data)?;
        file.decode_chunks()?;
        let slot = self.files.entry(name.into()).or_default();
        *slot = file;
        Ok(slot)
    }

    /// Looks up a decoded sprite by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&AseFile> {
        self.files.get(name)
    }

    /// Looks up a decoded sprite by name, failing when absent.
    pub fn require(&self, name: &str) -> AseResult<&AseFile> {
        self.files
            .get(name)
            .ok_or_else(|| AseError::NotFound(name.to_owned()))
    }

    /// Mutable lookup by name.
    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut AseFile> {
        self.files.get_mut(name)
    }

    /// Removes a sprite from the bank, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<AseFile> {
        self.files.remove(name)
    }

    /// Names of every loaded sprite, in arbitrary order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of loaded sprites.
    #[inline]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if no sprite has been loaded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
