//! Animation tag chunk decoder (tag 0x2018).

use crate::error::AseResult;
use crate::model::Tag;
use crate::stream::ByteReader;

/// Decodes one tags chunk payload into its list of animation tags.
pub fn decode(payload: &[u8]) -> AseResult<Vec<Tag>> {
    let mut r = ByteReader::new(payload);

    let num_tags = r.read_u16()?;
    r.skip(8)?;

    let mut tags = Vec::with_capacity(usize::from(num_tags));
    for _ in 0..num_tags {
        let from_frame = r.read_u16()?;
        let to_frame = r.read_u16()?;
        let loop_direction = r.read_u8()?;
        let repeat = r.read_u16()?;
        r.skip(6)?;
        let mut color = [0u8; 3];
        r.read_exact(&mut color)?;
        r.skip(1)?;
        let name = r.read_string()?;

        tags.push(Tag {
            from_frame,
            to_frame,
            loop_direction,
            repeat,
            color,
            name,
        });
    }

    Ok(tags)
}
