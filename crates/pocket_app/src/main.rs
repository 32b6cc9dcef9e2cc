use std::process::ExitCode;

use glam::{Quat, Vec3};
use pocket_core::{Camera, Color, Light, SceneLighting, Transform, Viewport};
use pocket_renderer::{
    ContextCall, RecordingContext, RenderPipelineConfig, ShaderTagId, VisibleRenderer, shader_ids,
};

const FRAMES: usize = 3;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional first argument: path to a JSON pipeline config.
    let config = match std::env::args().nth(1) {
        Some(path) => match RenderPipelineConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => RenderPipelineConfig::default(),
    };

    let (lights, mut scene) = setup_lights();
    let mut ctx = RecordingContext::new(lights, setup_renderers());
    let cameras = setup_cameras();
    let mut pipeline = config.create_pipeline();

    for frame in 0..FRAMES {
        ctx.clear_calls();
        let stats = pipeline.render(&mut ctx, &cameras, &scene);

        log::info!(
            "frame {frame}: {} camera(s) rendered, {} skipped, {} additional light(s)",
            stats.cameras_rendered,
            stats.cameras_skipped,
            ctx.global_int(shader_ids::LIGHT_COUNT).unwrap_or(0)
        );
        for call in ctx.calls() {
            if let ContextCall::DrawRenderers {
                queue_range, drawn, ..
            } = call
            {
                log::info!(
                    "  queue {}..={}: {:?}",
                    queue_range.lower,
                    queue_range.upper,
                    drawn
                );
            }
        }

        // Dim the ambient a little each frame.
        scene.ambient = Color::rgb(
            scene.ambient.r * 0.9,
            scene.ambient.g * 0.9,
            scene.ambient.b * 0.9,
        );
    }

    ExitCode::SUCCESS
}

/// Sun, a brighter fill light and a handful of point lights.
fn setup_lights() -> (Vec<Light>, SceneLighting) {
    let sun = Light::directional(
        Color::rgb(1.0, 0.95, 0.85),
        1.2,
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::new(2.0, 0.0, -4.0), Vec3::Y),
    );
    let fill = Light::directional(
        Color::rgb(0.4, 0.5, 1.0),
        2.0,
        Transform::from_rotation(Quat::from_rotation_x(-0.6)),
    );
    let scene = SceneLighting {
        ambient: Color::rgb(0.15, 0.15, 0.2),
        sun: Some(sun.id),
    };

    let mut lights = vec![fill, sun];
    for i in 0..6 {
        let x = i as f32 * 2.0 - 5.0;
        lights.push(Light::point(
            Color::rgb(1.0, 0.6, 0.3),
            1.5,
            3.0 + i as f32,
            Vec3::new(x, 1.0, -6.0),
        ));
    }

    (lights, scene)
}

fn setup_renderers() -> Vec<VisibleRenderer> {
    let mut renderers = Vec::new();
    for i in 0..8u32 {
        let transparent = i % 3 == 0;
        renderers.push(VisibleRenderer {
            id: i,
            render_queue: if transparent { 3000 } else { 2000 },
            sorting_layer: 0,
            material_id: i % 2,
            shader_pass: if i == 5 {
                ShaderTagId::SRP_DEFAULT_UNLIT
            } else {
                ShaderTagId::UNIVERSAL_FORWARD
            },
            layer: 0,
            bounds_center: Vec3::new((i as f32 - 4.0) * 0.5, 0.0, -3.0 - i as f32 * 4.0),
            bounds_radius: 1.0,
        });
    }
    renderers
}

fn setup_cameras() -> Vec<Camera> {
    let main = Camera::new(
        "Main",
        Transform::from_xyz(0.0, 2.0, 5.0).looking_at(Vec3::new(0.0, 0.0, -10.0), Vec3::Y),
    );
    let rear = Camera {
        viewport: Viewport {
            x: 960.0,
            y: 0.0,
            width: 320.0,
            height: 180.0,
        },
        background: Color::BLACK,
        ..Camera::new(
            "Rear View",
            Transform::from_xyz(0.0, 2.0, -40.0).looking_at(Vec3::ZERO, Vec3::Y),
        )
    };
    // Collapsed viewport: skipped every frame.
    let minimap = Camera {
        viewport: Viewport::new(0.0, 0.0),
        ..Camera::new("Minimap", Transform::default())
    };

    vec![main, rear, minimap]
}
