use pocket_core::{Camera, CameraError, SceneLighting};

use crate::{
    commands::CommandBuffer,
    config::RenderPipelineConfig,
    context::{CullingResults, RenderContext},
    lighting::ForwardLights,
    settings::{
        DrawingSettings, FilteringSettings, RenderQueueRange, ShaderTagId, SortingCriteria,
        SortingSettings,
    },
};

/// Outcome of one [`MobileRenderPipeline::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub cameras_rendered: usize,
    pub cameras_skipped: usize,
}

/// Forward renderer: clear, cull, light, opaque, skybox, transparent, submit.
pub struct MobileRenderPipeline {
    config: RenderPipelineConfig,
    lights: ForwardLights,
    commands: CommandBuffer,
}

impl MobileRenderPipeline {
    pub fn new(config: RenderPipelineConfig) -> Self {
        log::info!(
            "mobile pipeline: lighting {}, {} additional lights",
            if config.enable_lighting { "on" } else { "off" },
            config.max_additional_lights
        );
        if config.enable_shadows {
            log::warn!("enable_shadows is set but no shadow pass exists; ignoring");
        }

        Self {
            lights: ForwardLights::new(config.max_additional_lights),
            commands: CommandBuffer::new(),
            config,
        }
    }

    pub fn config(&self) -> &RenderPipelineConfig {
        &self.config
    }

    /// Lighting state of the last camera that reached the lighting stage.
    pub fn lights(&self) -> &ForwardLights {
        &self.lights
    }

    /// Renders every camera in order. A camera that cannot be culled is
    /// skipped; the others are unaffected.
    pub fn render<C: RenderContext>(
        &mut self,
        ctx: &mut C,
        cameras: &[Camera],
        scene: &SceneLighting,
    ) -> FrameStats {
        let mut stats = FrameStats::default();

        for camera in cameras {
            match self.render_camera(ctx, camera, scene) {
                Ok(()) => stats.cameras_rendered += 1,
                Err(err) => {
                    log::warn!("skipping camera: {err}");
                    stats.cameras_skipped += 1;
                }
            }
        }

        stats
    }

    pub fn render_camera<C: RenderContext>(
        &mut self,
        ctx: &mut C,
        camera: &Camera,
        scene: &SceneLighting,
    ) -> Result<(), CameraError> {
        log::debug!("rendering camera '{}'", camera.name);

        // 1. Camera state (viewport, matrices)
        ctx.setup_camera_properties(camera);

        // 2. Clear color + depth to the camera background
        execute_scoped(ctx, &mut self.commands, "Clear", |cmd| {
            cmd.clear_render_target(true, true, camera.background);
        });

        // 3. Cull. An invalid camera stops here; nothing was left recording.
        let parameters = camera.try_culling_parameters()?;
        let culling = ctx.cull(&parameters);

        // 4. Lights have to be published before anything lit is drawn
        if self.config.enable_lighting {
            self.setup_lighting(ctx, &culling, scene);
        }

        // 5. Opaque, front to back
        let sorting = SortingSettings::new(camera).with_criteria(SortingCriteria::COMMON_OPAQUE);
        let mut drawing = forward_drawing_settings(sorting);
        let mut filtering = FilteringSettings::new(RenderQueueRange::OPAQUE);
        ctx.draw_renderers(&culling, &drawing, &filtering);

        // 6. Skybox fills whatever the opaques left uncovered
        ctx.draw_skybox(camera);

        // 7. Transparent, back to front
        drawing.sorting.criteria = SortingCriteria::COMMON_TRANSPARENT;
        filtering.render_queue_range = RenderQueueRange::TRANSPARENT;
        ctx.draw_renderers(&culling, &drawing, &filtering);

        // 8. Flush
        ctx.submit();
        Ok(())
    }

    fn setup_lighting<C: RenderContext>(
        &mut self,
        ctx: &mut C,
        culling: &CullingResults,
        scene: &SceneLighting,
    ) {
        self.lights.prepare(culling, scene);

        let lights = &self.lights;
        execute_scoped(ctx, &mut self.commands, "Setup Lighting", |cmd| {
            lights.record(cmd);
        });
    }
}

/// Lit and unlit content both go through the forward pass.
fn forward_drawing_settings(sorting: SortingSettings) -> DrawingSettings {
    let mut drawing = DrawingSettings::new(ShaderTagId::UNIVERSAL_FORWARD, sorting);
    drawing.set_shader_pass_name(1, ShaderTagId::SRP_DEFAULT_UNLIT);
    drawing.set_shader_pass_name(2, ShaderTagId::LIGHTWEIGHT_FORWARD);
    drawing
}

/// Records into `commands`, hands them to the host and releases the buffer.
fn execute_scoped<C: RenderContext>(
    ctx: &mut C,
    commands: &mut CommandBuffer,
    name: &'static str,
    record: impl FnOnce(&mut CommandBuffer),
) {
    commands.begin(name);
    record(commands);
    ctx.execute_command_buffer(commands);
    commands.release();
}
