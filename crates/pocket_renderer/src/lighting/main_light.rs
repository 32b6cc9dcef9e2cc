use glam::Vec4;
use pocket_core::{Light, LightId};

use crate::context::CullingResults;

/// Shader-ready data for the dominant directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainLight {
    /// Towards the light, `w = 0`.
    pub direction: Vec4,
    /// `color * intensity`, `w = 0`.
    pub color: Vec4,
}

impl MainLight {
    pub fn from_light(light: &Light) -> Self {
        Self {
            direction: light.direction_to_light(),
            color: light.radiance(),
        }
    }
}

/// Picks the main light among the visible lights.
///
/// The scene's `sun` is taken as soon as it is seen (if directional). Failing
/// that, the brightest directional light wins; a later light has to be
/// strictly brighter to replace an earlier one, and zero-intensity lights
/// never qualify. Enumeration ends at the first empty slot.
pub fn main_light_index(culling: &CullingResults, sun: Option<LightId>) -> Option<usize> {
    let mut brightest_index = None;
    let mut brightest_intensity = 0.0;

    for (index, light) in culling.lights() {
        if !light.is_directional() {
            continue;
        }

        if Some(light.id) == sun {
            return Some(index);
        }

        if light.intensity > brightest_intensity {
            brightest_intensity = light.intensity;
            brightest_index = Some(index);
        }
    }

    brightest_index
}
