//! Layer chunk decoder (tag 0x2004).

use crate::error::AseResult;
use crate::model::{Layer, LayerKind};
use crate::stream::ByteReader;

/// Decodes one layer chunk payload.
///
/// Layer order is positional: callers push decoded layers in the order
/// the chunks appear, and that position is the index cels refer to.
pub fn decode(payload: &[u8]) -> AseResult<Layer> {
    let mut r = ByteReader::new(payload);

    let flags = r.read_u16()?;
    let kind = LayerKind::from_u16(r.read_u16()?);
    let child_level = r.read_u16()?;
    r.skip(4)?; // default width/height, ignored by the format itself
    let blend_mode = r.read_u16()?;
    let opacity = r.read_u8()?;
    r.skip(3)?;
    let name = r.read_string()?;

    if kind == LayerKind::Tilemap {
        tracing::warn!("layer \"{name}\" is a tilemap layer; tile data is not supported");
    }

    Ok(Layer {
        flags,
        kind,
        child_level,
        blend_mode,
        opacity,
        name,
        cels: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer_payload(flags: u16, kind: u16, name: &str) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&flags.to_le_bytes());
        data.extend_from_slice(&kind.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes()); // child level
        data.extend_from_slice(&[0u8; 4]); // default width/height
        data.extend_from_slice(&5u16.to_le_bytes()); // blend mode
        data.push(200); // opacity
        data.extend_from_slice(&[0u8; 3]);
        data.extend_from_slice(&(name.len() as u16).to_le_bytes());
        data.extend_from_slice(name.as_bytes());
        data
    }

    #[test]
    fn decodes_normal_layer() {
        let layer = decode(&layer_payload(0x3, 0, "Background")).unwrap();
        assert_eq!(layer.kind, LayerKind::Normal);
        assert_eq!(layer.blend_mode, 5);
        assert_eq!(layer.opacity, 200);
        assert_eq!(layer.name, "Background");
        assert!(layer.is_visible());
        assert!(layer.cels.is_empty());
    }

    #[test]
    fn hidden_group_layer() {
        let layer = decode(&layer_payload(0x2, 1, "fx")).unwrap();
        assert_eq!(layer.kind, LayerKind::Group);
        assert!(!layer.is_visible());
    }

    #[test]
    fn unknown_kind_is_preserved() {
        let layer = decode(&layer_payload(1, 9, "x")).unwrap();
        assert_eq!(layer.kind, LayerKind::Unknown(9));
    }

    #[test]
    fn truncated_payload_fails() {
        assert!(decode(&[0x01, 0x00, 0x00]).is_err());
    }
}
