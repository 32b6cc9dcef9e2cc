use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use super::ForwardLights;

/// Fixed part of the lighting uniform block.
///
/// Layout (std140 compatible):
/// header, then `_LightColor[capacity]`, `_LightDirection[capacity]`,
/// `_LightPosition[capacity]`, each element a `vec4<f32>`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LightingHeader {
    pub main_light_direction: [f32; 4], // .w = 0
    pub main_light_color: [f32; 4],     // .w = 0
    pub ambient: [f32; 4],
    pub light_count: u32,
    pub _padding: [u32; 3],
}

/// Single-buffer form of the published lighting globals, for hosts that
/// bind one uniform buffer instead of named properties.
pub struct LightingUniform;

impl LightingUniform {
    pub fn byte_size(capacity: usize) -> usize {
        size_of::<LightingHeader>() + 3 * capacity * size_of::<[f32; 4]>()
    }

    pub fn header(lights: &ForwardLights) -> LightingHeader {
        let (direction, color) = lights
            .main_light()
            .map(|main| (main.direction, main.color))
            .unwrap_or((Vec4::ZERO, Vec4::ZERO));

        LightingHeader {
            main_light_direction: direction.to_array(),
            main_light_color: color.to_array(),
            ambient: lights.ambient().to_array(),
            light_count: lights.packed().count() as u32,
            _padding: [0; 3],
        }
    }

    /// Replaces `out` with the full block. Reuse `out` across frames to avoid
    /// reallocating.
    pub fn write_bytes(lights: &ForwardLights, out: &mut Vec<u8>) {
        let packed = lights.packed();
        out.clear();
        out.reserve(Self::byte_size(packed.capacity()));

        out.extend_from_slice(bytemuck::bytes_of(&Self::header(lights)));
        for array in [packed.colors(), packed.directions(), packed.positions()] {
            for value in array {
                out.extend_from_slice(bytemuck::bytes_of(&value.to_array()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CullingResults;
    use glam::Vec3;
    use pocket_core::{Color, Light, SceneLighting, Transform};

    #[test]
    fn header_is_std140_sized() {
        assert_eq!(size_of::<LightingHeader>(), 64);
    }

    #[test]
    fn block_layout_matches_declared_order() {
        let mut lights = ForwardLights::new(2);
        let culling = CullingResults {
            visible_lights: vec![
                Some(Light::directional(Color::WHITE, 2.0, Transform::default())),
                Some(Light::point(Color::rgb(1.0, 0.0, 0.0), 3.0, 2.0, Vec3::new(4.0, 5.0, 6.0))),
            ],
            visible_renderers: Vec::new(),
        };
        let scene = SceneLighting {
            ambient: Color::rgb(0.1, 0.1, 0.1),
            sun: None,
        };
        lights.prepare(&culling, &scene);

        let mut bytes = Vec::new();
        LightingUniform::write_bytes(&lights, &mut bytes);
        assert_eq!(bytes.len(), LightingUniform::byte_size(2));

        let header: LightingHeader = bytemuck::pod_read_unaligned(&bytes[..64]);
        assert_eq!(header.light_count, 1);
        assert_eq!(header.main_light_color, [2.0, 2.0, 2.0, 0.0]);

        let floats: Vec<f32> = bytes[64..]
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect();
        // colors[0], colors[1], directions[0], directions[1], positions[0], ...
        assert_eq!(&floats[0..4], &[3.0, 0.0, 0.0, 0.0]);
        assert_eq!(&floats[4..8], &[0.0; 4]);
        assert_eq!(&floats[16..20], &[4.0, 5.0, 6.0, 0.25]);
    }
}
