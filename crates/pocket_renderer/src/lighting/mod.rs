//! Light selection and packing for the forward pass.

pub mod main_light;
pub mod packer;
pub mod uniform;

use glam::Vec4;
use pocket_core::SceneLighting;

pub use main_light::{MainLight, main_light_index};
pub use packer::PackedLightSet;
pub use uniform::{LightingHeader, LightingUniform};

use crate::{commands::CommandBuffer, context::CullingResults, shader_ids};

/// Per-camera lighting state. Allocated once per pipeline and overwritten
/// for every camera.
#[derive(Debug, Clone)]
pub struct ForwardLights {
    ambient: Vec4,
    main_light: Option<MainLight>,
    main_light_index: Option<usize>,
    packed: PackedLightSet,
}

impl ForwardLights {
    pub fn new(max_additional_lights: usize) -> Self {
        Self {
            ambient: Vec4::ZERO,
            main_light: None,
            main_light_index: None,
            packed: PackedLightSet::with_capacity(max_additional_lights),
        }
    }

    /// Selects the main light and packs the rest from this camera's lights.
    pub fn prepare(&mut self, culling: &CullingResults, scene: &SceneLighting) {
        self.ambient = scene.ambient.to_vec4();

        self.main_light_index = main_light_index(culling, scene.sun);
        self.main_light = self
            .main_light_index
            .and_then(|index| culling.visible_lights.get(index))
            .and_then(Option::as_ref)
            .map(MainLight::from_light);

        self.packed.pack(culling, self.main_light_index);

        log::trace!(
            "lighting: main light {:?}, {} of {} additional slots used",
            self.main_light_index,
            self.packed.count(),
            self.packed.capacity()
        );
    }

    /// Writes the shader globals. Without a main light the main-light slots
    /// are zeroed rather than left at the previous camera's values.
    pub fn record(&self, cmd: &mut CommandBuffer) {
        cmd.set_global_vector(shader_ids::AMBIENT_LIGHT, self.ambient);

        let main = self.main_light.unwrap_or(MainLight {
            direction: Vec4::ZERO,
            color: Vec4::ZERO,
        });
        cmd.set_global_vector(shader_ids::MAIN_LIGHT_DIRECTION, main.direction);
        cmd.set_global_vector(shader_ids::MAIN_LIGHT_COLOR, main.color);

        cmd.set_global_int(shader_ids::LIGHT_COUNT, self.packed.count() as i32);
        cmd.set_global_vector_array(shader_ids::LIGHT_COLOR, self.packed.colors());
        cmd.set_global_vector_array(shader_ids::LIGHT_DIRECTION, self.packed.directions());
        cmd.set_global_vector_array(shader_ids::LIGHT_POSITION, self.packed.positions());
    }

    pub fn ambient(&self) -> Vec4 {
        self.ambient
    }

    pub fn main_light(&self) -> Option<&MainLight> {
        self.main_light.as_ref()
    }

    /// Index of the main light in the camera's visible-light list.
    pub fn main_light_index(&self) -> Option<usize> {
        self.main_light_index
    }

    pub fn packed(&self) -> &PackedLightSet {
        &self.packed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use glam::Vec3;
    use pocket_core::{Color, Light, Transform};

    #[test]
    fn records_every_global_once() {
        let mut lights = ForwardLights::new(4);
        let culling = CullingResults {
            visible_lights: vec![Some(Light::point(Color::WHITE, 1.0, 1.0, Vec3::ZERO))],
            visible_renderers: Vec::new(),
        };
        lights.prepare(&culling, &SceneLighting::default());

        let mut cmd = CommandBuffer::new();
        cmd.begin("Setup Lighting");
        lights.record(&mut cmd);

        let names: Vec<&str> = cmd
            .commands()
            .iter()
            .map(|c| match c {
                Command::SetGlobalVector { name, .. }
                | Command::SetGlobalInt { name, .. }
                | Command::SetGlobalVectorArray { name, .. } => *name,
                Command::ClearRenderTarget { .. } => "clear",
            })
            .collect();
        assert_eq!(
            names,
            vec![
                shader_ids::AMBIENT_LIGHT,
                shader_ids::MAIN_LIGHT_DIRECTION,
                shader_ids::MAIN_LIGHT_COLOR,
                shader_ids::LIGHT_COUNT,
                shader_ids::LIGHT_COLOR,
                shader_ids::LIGHT_DIRECTION,
                shader_ids::LIGHT_POSITION,
            ]
        );
    }

    #[test]
    fn main_light_clears_when_it_disappears() {
        let mut lights = ForwardLights::new(2);
        let with_sun = CullingResults {
            visible_lights: vec![Some(Light::directional(
                Color::WHITE,
                1.0,
                Transform::default(),
            ))],
            visible_renderers: Vec::new(),
        };
        lights.prepare(&with_sun, &SceneLighting::default());
        assert!(lights.main_light().is_some());

        lights.prepare(&CullingResults::default(), &SceneLighting::default());
        assert!(lights.main_light().is_none());
        assert_eq!(lights.main_light_index(), None);
        assert_eq!(lights.packed().count(), 0);
    }
}
