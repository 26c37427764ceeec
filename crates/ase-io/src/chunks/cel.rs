//! Cel chunk decoder (tag 0x2005).

use crate::error::{AseError, AseResult};
use crate::model::{Cel, CelContent};
use crate::stream::ByteReader;

const CEL_RAW: u16 = 0;
const CEL_LINKED: u16 = 1;
const CEL_COMPRESSED: u16 = 2;

/// Decodes one cel chunk payload.
///
/// Raw and compressed cels keep their pixel bytes verbatim; inflation
/// and pixel access happen later in [`crate::pixels`]. An unknown
/// cel-type value maps to [`AseError::UnsupportedCelType`] so callers
/// can skip the cel without abandoning the frame.
pub fn decode(payload: &[u8]) -> AseResult<Cel> {
    let mut r = ByteReader::new(payload);

    let layer_index = r.read_u16()?;
    let x = r.read_i16()?;
    let y = r.read_i16()?;
    let opacity = r.read_u8()?;
    let cel_type = r.read_u16()?;
    let z_index = r.read_i16()?;
    r.skip(5)?;

    let content = match cel_type {
        CEL_RAW => {
            let width = r.read_u16()?;
            let height = r.read_u16()?;
            CelContent::Raw {
                width,
                height,
                pixels: r.read_remaining(),
            }
        }
        CEL_LINKED => CelContent::Linked {
            frame: r.read_u16()?,
        },
        CEL_COMPRESSED => {
            let width = r.read_u16()?;
            let height = r.read_u16()?;
            CelContent::Compressed {
                width,
                height,
                data: r.read_remaining(),
            }
        }
        other => return Err(AseError::UnsupportedCelType(other)),
    };

    Ok(Cel {
        layer_index,
        x,
        y,
        opacity,
        z_index,
        content,
    })
}
