//! Palette chunk decoders: the two old-format flavors (tags 0x0004 and
//! 0x0011) and the new format (tag 0x2019).

use crate::error::AseResult;
use crate::model::{ChunkType, NewPaletteChunk, OldPaletteChunk, PaletteEntry, PalettePacket};
use crate::stream::ByteReader;

/// Decodes an old-format palette chunk.
///
/// The packet stream starts with a packet count and a skip count; the
/// skip count removes that many leading packets from the decode. A
/// per-packet color count of zero means 256 colors.
pub fn decode_old(payload: &[u8], tag: ChunkType) -> AseResult<OldPaletteChunk> {
    let mut r = ByteReader::new(payload);

    let num_packets = r.read_u16()?;
    let skipped = r.read_u8()?;

    let decoded = num_packets.saturating_sub(u16::from(skipped));
    let mut packets = Vec::with_capacity(decoded as usize);
    for _ in 0..decoded {
        let declared = r.read_u8()?;
        let num_colors = if declared == 0 { 256 } else { usize::from(declared) };
        let mut colors = Vec::with_capacity(num_colors);
        for _ in 0..num_colors {
            let mut rgb = [0u8; 3];
            r.read_exact(&mut rgb)?;
            colors.push(rgb);
        }
        packets.push(PalettePacket { colors });
    }

    Ok(OldPaletteChunk { tag, skipped, packets })
}

/// Decodes a new-format palette chunk.
pub fn decode_new(payload: &[u8]) -> AseResult<NewPaletteChunk> {
    let mut r = ByteReader::new(payload);

    let size = r.read_u32()?;
    let first_index = r.read_u32()?;
    let last_index = r.read_u32()?;
    r.skip(8)?;

    let mut entries = Vec::with_capacity(size.min(4096) as usize);
    for _ in 0..size {
        let flags = r.read_u16()?;
        let mut color = [0u8; 4];
        r.read_exact(&mut color)?;
        let name = if flags & 0x1 != 0 {
            Some(r.read_string()?)
        } else {
            None
        };
        entries.push(PaletteEntry { flags, color, name });
    }

    Ok(NewPaletteChunk {
        first_index,
        last_index,
        entries,
    })
}
