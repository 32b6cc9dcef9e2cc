use glam::Vec3;
use pocket_core::{Camera, CullingParameters, Light};

use crate::{
    commands::CommandBuffer,
    settings::{DrawingSettings, FilteringSettings, ShaderTagId},
};

/// A renderable object that survived culling.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRenderer {
    pub id: u32,
    pub render_queue: i32,
    pub sorting_layer: i32,
    /// Objects sharing a material share GPU state.
    pub material_id: u32,
    pub shader_pass: ShaderTagId,
    /// Bit index tested against `FilteringSettings::layer_mask`.
    pub layer: u32,
    pub bounds_center: Vec3,
    pub bounds_radius: f32,
}

/// What one camera can see this frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CullingResults {
    /// Delivery order matters. The buffer may be over-allocated; the first
    /// `None` marks the end of valid entries.
    pub visible_lights: Vec<Option<Light>>,
    pub visible_renderers: Vec<VisibleRenderer>,
}

impl CullingResults {
    /// Valid visible lights with their delivery index.
    pub fn lights(&self) -> impl Iterator<Item = (usize, &Light)> {
        self.visible_lights
            .iter()
            .map_while(Option::as_ref)
            .enumerate()
    }
}

/// The host engine as seen by the pipeline.
pub trait RenderContext {
    /// Binds viewport and view/projection state for `camera`.
    fn setup_camera_properties(&mut self, camera: &Camera);

    /// Replays the recorded commands (clears, shader globals) in order.
    /// The buffer is only borrowed; the caller releases it afterwards.
    fn execute_command_buffer(&mut self, commands: &CommandBuffer);

    /// Visibility query for one camera.
    fn cull(&mut self, parameters: &CullingParameters) -> CullingResults;

    /// Draws the renderers matching `filtering` with the passes and order
    /// in `drawing`.
    fn draw_renderers(
        &mut self,
        culling: &CullingResults,
        drawing: &DrawingSettings,
        filtering: &FilteringSettings,
    );

    fn draw_skybox(&mut self, camera: &Camera);

    /// Flushes everything issued since the last submit.
    fn submit(&mut self);
}
