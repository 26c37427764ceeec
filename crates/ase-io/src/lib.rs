//! Decoder for the `.aseprite` sprite file format.
//!
//! The format is a little-endian container: a fixed 128-byte header,
//! then frames, each a 16-byte sub-header followed by tagged chunks.
//! Decoding runs in two stages. [`parser::parse`] walks the container
//! structurally and captures every chunk raw; [`model::AseFile::decode_chunks`]
//! then runs one typed pass per chunk family (layers, cels, palettes,
//! tags, slices, user data, ...) and finishes with the cel reorder pass.
//! Pixel bytes stay in the cels they came from until
//! [`pixels::decode_cel_image`] builds an [`ase_core::ImageBuffer`] on
//! demand.
//!
//! # Example
//!
//! ```rust,no_run
//! use ase_io::read;
//!
//! let file = read("sprite.aseprite")?;
//! for layer in &file.frames[0].layers {
//!     println!("{}: {} cels", layer.name, layer.cels.len());
//! }
//! # Ok::<(), ase_io::AseError>(())
//! ```
//!
//! Failures split into two severities: structural damage (bad magic,
//! truncation, undersized chunks) aborts with an error, while per-item
//! conditions (an unknown cel type, an unsupported property value, a
//! tileset chunk) are reported through `tracing` and skipped so the rest
//! of the file still decodes.

#![warn(missing_docs)]

pub mod chunks;
pub mod error;
pub mod model;
pub mod order;
pub mod parser;
pub mod pixels;
pub mod props;
pub mod stream;

pub use error::{AseError, AseResult};
pub use model::{
    AseFile, Cel, CelContent, ChunkType, Frame, Header, Layer, LayerKind, Slice, SliceKey, Tag,
    UserData,
};
pub use parser::{parse, SpriteBank};
pub use pixels::decode_cel_image;
pub use props::PropValue;

use std::path::Path;

/// Reads and fully decodes a sprite file from disk.
pub fn read(path: impl AsRef<Path>) -> AseResult<AseFile> {
    let data = std::fs::read(path)?;
    read_from_memory(&data)
}

/// Fully decodes a sprite file already held in memory.
pub fn read_from_memory(data: &[u8]) -> AseResult<AseFile> {
    let mut file = parse(data)?;
    file.decode_chunks()?;
    Ok(file)
}
