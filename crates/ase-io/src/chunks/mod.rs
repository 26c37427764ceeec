//! Typed chunk decoders and the passes that run them.
//!
//! Each submodule owns one chunk type: it consumes a raw payload span and
//! produces a typed record. The pass functions here walk a parsed
//! [`AseFile`], filter each frame's raw chunks by type, and fill the
//! frame's typed collections.
//!
//! Passes are independent and order-insensitive across types, with two
//! constraints: [`decode_cels`] requires [`decode_layers`] to have run
//! (cels attach to their layer by index), and the reorder pass in
//! [`crate::order`] requires both. [`AseFile::decode_chunks`] runs
//! everything in a valid order.
//!
//! Failure policy: truncated payloads are structural and propagate;
//! per-item conditions (unknown cel type, out-of-range layer index,
//! unsupported property type, tileset chunks) are reported through
//! `tracing` and skipped.

pub mod cel;
pub mod layer;
pub mod misc;
pub mod palette;
pub mod slice;
pub mod tags;
pub mod user_data;

use crate::error::{AseError, AseResult};
use crate::model::{AseFile, ChunkType, Frame};

/// Decodes every layer chunk into [`Frame::layers`].
pub fn decode_layers(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::Layer) {
                frame.layers.push(layer::decode(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes every cel chunk and attaches it to its owning layer.
///
/// Cels with an unknown cel-type value or an out-of-range layer index
/// are reported and skipped; siblings keep decoding.
pub fn decode_cels(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        let Frame { chunks, layers, .. } = frame;
        for chunk in chunks.iter() {
            if chunk.chunk_type() != Some(ChunkType::Cel) {
                continue;
            }
            let cel = match cel::decode(&chunk.data) {
                Ok(cel) => cel,
                Err(AseError::UnsupportedCelType(kind)) => {
                    tracing::warn!("skipping cel with unsupported type {kind}");
                    continue;
                }
                Err(err) => return Err(err),
            };
            match layers.get_mut(cel.layer_index as usize) {
                Some(layer) => layer.cels.push(cel),
                None => tracing::warn!(
                    "cel references layer {} but only {} layers exist",
                    cel.layer_index,
                    layers.len()
                ),
            }
        }
    }
    Ok(())
}

/// Decodes old-format palette chunks (both tag flavors).
pub fn decode_old_palettes(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if let Some(tag @ (ChunkType::OldPalette1 | ChunkType::OldPalette2)) =
                chunk.chunk_type()
            {
                frame.old_palettes.push(palette::decode_old(&chunk.data, tag)?);
            }
        }
    }
    Ok(())
}

/// Decodes new-format palette chunks.
pub fn decode_new_palettes(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::NewPalette) {
                frame.new_palettes.push(palette::decode_new(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes tag chunks into [`Frame::tags`].
pub fn decode_tags(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::Tags) {
                frame.tags.extend(tags::decode(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes slice chunks into [`Frame::slices`].
pub fn decode_slices(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::Slice) {
                frame.slices.push(slice::decode(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes user-data chunks into [`Frame::user_data`].
pub fn decode_user_data(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::UserData) {
                frame.user_data.push(user_data::decode(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes color profile chunks.
pub fn decode_color_profiles(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::ColorProfile) {
                frame.color_profile = Some(misc::decode_color_profile(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes the external files table.
pub fn decode_external_files(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::ExternalFiles) {
                frame
                    .external_files
                    .extend(misc::decode_external_files(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Decodes deprecated mask chunks.
pub fn decode_masks(file: &mut AseFile) -> AseResult<()> {
    for frame in &mut file.frames {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::Mask) {
                frame.masks.push(misc::decode_mask(&chunk.data)?);
            }
        }
    }
    Ok(())
}

/// Reports every tileset chunk as unsupported. No data is produced.
pub fn report_tilesets(file: &AseFile) {
    for (index, frame) in file.frames.iter().enumerate() {
        for chunk in &frame.chunks {
            if chunk.chunk_type() == Some(ChunkType::Tileset) {
                if let Err(err) = misc::decode_tileset(&chunk.data) {
                    tracing::warn!("frame {index}: {err}");
                }
            }
        }
    }
}
