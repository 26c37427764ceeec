//! User-data chunk decoder (tag 0x2020).

use crate::error::{AseError, AseResult};
use crate::model::{PropertyMap, UserData, UserProp};
use crate::props::decode_value;
use crate::stream::ByteReader;

/// Flag bit: record carries a text field.
pub const FLAG_TEXT: u32 = 0x1;
/// Flag bit: record carries an RGBA color.
pub const FLAG_COLOR: u32 = 0x2;
/// Flag bit: record carries property maps.
pub const FLAG_PROPERTIES: u32 = 0x4;

/// Decodes one user-data chunk payload.
///
/// An unsupported property value stops the properties section: after
/// such a value the cursor cannot be trusted, so the maps decoded so far
/// are kept, the condition is reported, and the record is returned
/// partially populated. Structural truncation still propagates.
pub fn decode(payload: &[u8]) -> AseResult<UserData> {
    let mut r = ByteReader::new(payload);

    let flags = r.read_u32()?;
    let mut data = UserData {
        flags,
        ..Default::default()
    };

    if flags & FLAG_TEXT != 0 {
        data.text = Some(r.read_string()?);
    }

    if flags & FLAG_COLOR != 0 {
        let mut rgba = [0u8; 4];
        r.read_exact(&mut rgba)?;
        data.color = Some(rgba);
    }

    if flags & FLAG_PROPERTIES != 0 {
        r.skip(4)?; // declared byte size of the section, redundant here
        let num_maps = r.read_u32()?;
        'maps: for _ in 0..num_maps {
            let key = r.read_u32()?;
            let num_props = r.read_u32()?;
            let mut map = PropertyMap {
                key,
                props: Vec::with_capacity(num_props.min(1024) as usize),
            };
            for _ in 0..num_props {
                let name = r.read_string()?;
                let type_tag = r.read_u16()?;
                match decode_value(&mut r, type_tag) {
                    Ok(value) => map.props.push(UserProp { name, value }),
                    Err(AseError::UnsupportedProperty(tag)) => {
                        tracing::warn!(
                            "property \"{name}\" has unsupported type {tag:#06x}; \
                             remaining properties are dropped"
                        );
                        data.properties.push(map);
                        break 'maps;
                    }
                    Err(err) => return Err(err),
                }
            }
            data.properties.push(map);
        }
    }

    Ok(data)
}
