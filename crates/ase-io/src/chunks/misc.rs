//! Decoders for the structural-completeness chunks: color profile
//! (0x2007), external files (0x2008), and the deprecated mask (0x2016).
//! None of these feed pixel reconstruction.

use crate::error::{AseError, AseResult};
use crate::model::{ColorProfile, ExternalFileEntry, MaskData};
use crate::stream::ByteReader;

/// Embedded ICC profile type value.
const PROFILE_ICC: u16 = 2;

/// Decodes a color profile chunk.
pub fn decode_color_profile(payload: &[u8]) -> AseResult<ColorProfile> {
    let mut r = ByteReader::new(payload);

    let kind = r.read_u16()?;
    let flags = r.read_u16()?;
    let gamma = r.read_f64()?;
    r.skip(8)?;

    let icc_data = if kind == PROFILE_ICC {
        let len = r.read_u32()? as usize;
        Some(r.read_bytes(len)?)
    } else {
        None
    };

    Ok(ColorProfile {
        kind,
        flags,
        gamma,
        icc_data,
    })
}

/// Decodes the external files table.
pub fn decode_external_files(payload: &[u8]) -> AseResult<Vec<ExternalFileEntry>> {
    let mut r = ByteReader::new(payload);

    let num_entries = r.read_u32()?;
    let mut entries = Vec::with_capacity(num_entries.min(1024) as usize);
    for _ in 0..num_entries {
        let id = r.read_u32()?;
        let kind = r.read_u8()?;
        r.skip(7)?;
        let name = r.read_string()?;
        entries.push(ExternalFileEntry { id, kind, name });
    }

    Ok(entries)
}

/// Decodes a deprecated mask chunk. Old files still carry these.
pub fn decode_mask(payload: &[u8]) -> AseResult<MaskData> {
    let mut r = ByteReader::new(payload);

    let x = r.read_i16()?;
    let y = r.read_i16()?;
    let width = r.read_u16()?;
    let height = r.read_u16()?;
    r.skip(8)?;
    let name = r.read_string()?;
    let row_bytes = usize::from(width).div_ceil(8);
    let bitmap = r.read_bytes(usize::from(height) * row_bytes)?;

    Ok(MaskData {
        x,
        y,
        width,
        height,
        name,
        bitmap,
    })
}

/// Tileset chunks are recognized but never decoded; tile data has no
/// representation in the model.
pub fn decode_tileset(_payload: &[u8]) -> AseResult<()> {
    Err(AseError::UnsupportedFeature(
        "tileset chunks are not decoded".to_owned(),
    ))
}
