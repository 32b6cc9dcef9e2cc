use glam::{Quat, Vec3, Vec4};
use pocket_core::{Camera, Color, Light, LightKind, SceneLighting, Transform, Viewport};
use pocket_renderer::{
    ContextCall, MobileRenderPipeline, RecordingContext, RenderPipelineConfig, RenderQueueRange,
    ShaderTagId, VisibleRenderer, shader_ids,
};

fn pipeline(max_additional_lights: usize) -> MobileRenderPipeline {
    RenderPipelineConfig {
        max_additional_lights,
        ..Default::default()
    }
    .create_pipeline()
}

fn sun_light(intensity: f32) -> Light {
    Light::directional(
        Color::rgb(1.0, 0.9, 0.8),
        intensity,
        Transform::from_rotation(Quat::from_rotation_x(-1.0)),
    )
}

fn point_light(range: f32, x: f32) -> Light {
    Light::point(Color::rgb(0.2, 0.4, 0.6), 2.0, range, Vec3::new(x, 1.0, -3.0))
}

fn renderer(id: u32, queue: i32, material_id: u32, distance: f32) -> VisibleRenderer {
    VisibleRenderer {
        id,
        render_queue: queue,
        sorting_layer: 0,
        material_id,
        shader_pass: ShaderTagId::UNIVERSAL_FORWARD,
        layer: 0,
        bounds_center: Vec3::new(0.0, 0.0, -distance),
        bounds_radius: 0.5,
    }
}

fn broken_camera() -> Camera {
    Camera {
        name: "Broken".to_string(),
        viewport: Viewport::new(0.0, 0.0),
        ..Default::default()
    }
}

fn packed_count(ctx: &RecordingContext) -> i32 {
    ctx.global_int(shader_ids::LIGHT_COUNT).unwrap()
}

#[test]
fn scenario_a_preferred_sun_is_main_and_not_packed() {
    let sun = sun_light(3.0);
    let scene = SceneLighting {
        ambient: Color::rgb(0.1, 0.1, 0.1),
        sun: Some(sun.id),
    };
    let mut ctx = RecordingContext::new(vec![sun.clone()], Vec::new());
    let mut pipeline = pipeline(4);

    pipeline.render(&mut ctx, &[Camera::default()], &scene);

    assert_eq!(pipeline.lights().main_light_index(), Some(0));
    assert_eq!(packed_count(&ctx), 0);
    assert_eq!(
        ctx.global_vector(shader_ids::MAIN_LIGHT_COLOR),
        Some(sun.radiance())
    );
    assert!(
        ctx.global_vector(shader_ids::MAIN_LIGHT_DIRECTION)
            .unwrap()
            .abs_diff_eq(sun.direction_to_light(), 1e-6)
    );
    assert_eq!(
        ctx.global_vector(shader_ids::AMBIENT_LIGHT),
        Some(Vec4::new(0.1, 0.1, 0.1, 1.0))
    );
}

#[test]
fn scenario_b_brightest_directional_wins() {
    let lights = vec![sun_light(1.0), sun_light(5.0), sun_light(2.0)];
    let mut ctx = RecordingContext::new(lights.clone(), Vec::new());
    let mut pipeline = pipeline(4);

    pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    assert_eq!(pipeline.lights().main_light_index(), Some(1));
    assert_eq!(packed_count(&ctx), 2);
    let colors = ctx.global_vector_array(shader_ids::LIGHT_COLOR).unwrap();
    assert_eq!(colors[0], lights[0].radiance());
    assert_eq!(colors[1], lights[2].radiance());
}

#[test]
fn scenario_c_point_light_attenuation() {
    let mut ctx = RecordingContext::new(vec![point_light(2.0, 0.0)], Vec::new());
    pipeline(4).render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    let positions = ctx.global_vector_array(shader_ids::LIGHT_POSITION).unwrap();
    assert_eq!(packed_count(&ctx), 1);
    assert!((positions[0].w - 0.25).abs() < 1e-6);
    assert_eq!(positions[0].truncate(), Vec3::new(0.0, 1.0, -3.0));
}

#[test]
fn scenario_d_over_budget_lights_are_dropped() {
    let lights: Vec<Light> = (0..5).map(|i| point_light(1.0, i as f32)).collect();
    let mut ctx = RecordingContext::new(lights, Vec::new());
    pipeline(4).render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    assert_eq!(packed_count(&ctx), 4);
    let positions = ctx.global_vector_array(shader_ids::LIGHT_POSITION).unwrap();
    assert_eq!(positions.len(), 4);
    let xs: Vec<f32> = positions.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn scenario_e_invalid_camera_is_skipped_and_batch_continues() {
    let renderers = vec![renderer(0, 2000, 0, 5.0), renderer(1, 3000, 0, 6.0)];
    let mut ctx = RecordingContext::new(vec![sun_light(1.0)], renderers);
    let mut pipeline = pipeline(4);
    let good = Camera::new("Good", Transform::default());

    let stats = pipeline.render(
        &mut ctx,
        &[broken_camera(), good],
        &SceneLighting::default(),
    );
    assert_eq!(stats.cameras_skipped, 1);
    assert_eq!(stats.cameras_rendered, 1);

    let stages: Vec<String> = ctx.calls().iter().map(ContextCall::stage).collect();
    assert_eq!(
        stages,
        vec![
            // Broken camera: set up and cleared, then abandoned.
            "setup_camera",
            "execute:Clear",
            // Good camera: the full sequence.
            "setup_camera",
            "execute:Clear",
            "cull",
            "execute:Setup Lighting",
            "draw_renderers",
            "draw_skybox",
            "draw_renderers",
            "submit",
        ]
    );
    assert_eq!(ctx.submits(), 1);

    let skybox_cameras: Vec<&str> = ctx
        .calls()
        .iter()
        .filter_map(|call| match call {
            ContextCall::DrawSkybox { camera } => Some(camera.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(skybox_cameras, vec!["Good"]);
}

#[test]
fn clear_uses_camera_background() {
    let camera = Camera {
        background: Color::rgb(0.5, 0.0, 0.25),
        ..Default::default()
    };
    let mut ctx = RecordingContext::default();
    pipeline(4).render(&mut ctx, &[camera], &SceneLighting::default());

    let clear = ctx
        .calls()
        .iter()
        .find_map(|call| match call {
            ContextCall::ExecuteCommandBuffer { name: "Clear", commands } => Some(commands),
            _ => None,
        })
        .unwrap();
    assert_eq!(
        clear,
        &vec![pocket_renderer::Command::ClearRenderTarget {
            clear_depth: true,
            clear_color: true,
            background: Color::rgb(0.5, 0.0, 0.25),
        }]
    );
}

#[test]
fn opaque_then_transparent_in_their_own_order() {
    let renderers = vec![
        renderer(0, 2000, 2, 30.0),
        renderer(1, 3000, 0, 10.0),
        renderer(2, 2000, 1, 5.0),
        renderer(3, 3000, 0, 40.0),
        renderer(4, 2450, 0, 1.0),
    ];
    let mut ctx = RecordingContext::new(Vec::new(), renderers);
    pipeline(4).render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    let draws: Vec<_> = ctx.draws().collect();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0], (RenderQueueRange::OPAQUE, &[2u32, 0, 4][..]));
    assert_eq!(draws[1], (RenderQueueRange::TRANSPARENT, &[3u32, 1][..]));
}

#[test]
fn unlit_and_legacy_passes_are_drawn() {
    let mut unlit = renderer(0, 2000, 0, 5.0);
    unlit.shader_pass = ShaderTagId::SRP_DEFAULT_UNLIT;
    let mut legacy = renderer(1, 2000, 0, 6.0);
    legacy.shader_pass = ShaderTagId::LIGHTWEIGHT_FORWARD;
    let mut shadow = renderer(2, 2000, 0, 7.0);
    shadow.shader_pass = ShaderTagId("ShadowCaster");

    let mut ctx = RecordingContext::new(Vec::new(), vec![unlit, legacy, shadow]);
    pipeline(4).render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    let (_, opaque) = ctx.draws().next().unwrap();
    assert_eq!(opaque, &[0, 1]);
}

#[test]
fn capacity_never_exceeded() {
    for budget in 0..6 {
        let mut lights: Vec<Light> = (0..8).map(|i| point_light(1.0 + i as f32, i as f32)).collect();
        lights.insert(3, sun_light(2.0));
        lights.push(sun_light(0.5));

        let mut ctx = RecordingContext::new(lights, Vec::new());
        let mut pipeline = pipeline(budget);
        pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());

        assert!(pipeline.lights().packed().count() <= budget);
        assert_eq!(packed_count(&ctx) as usize, pipeline.lights().packed().count());
        assert_eq!(
            ctx.global_vector_array(shader_ids::LIGHT_COLOR).unwrap().len(),
            budget
        );
    }
}

#[test]
fn main_light_never_packed() {
    let lights = vec![sun_light(1.0), sun_light(4.0), point_light(3.0, 0.0)];
    let main = lights[1].clone();
    let mut ctx = RecordingContext::new(lights, Vec::new());
    let mut pipeline = pipeline(8);
    pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    let packed = pipeline.lights().packed();
    assert_eq!(packed.count(), 2);
    // Identical direction and color would mean the main light slipped in.
    let main_color = main.radiance();
    assert!(
        packed.colors()[..packed.count()]
            .iter()
            .all(|c| *c != main_color)
    );
}

#[test]
fn spot_lights_pack_like_points() {
    let spot = Light::spot(
        Color::WHITE,
        3.0,
        4.0,
        Transform::from_xyz(1.0, 2.0, 3.0).looking_to(Vec3::NEG_Y, Vec3::Z),
    );
    assert_eq!(spot.kind, LightKind::Spot);
    let mut ctx = RecordingContext::new(vec![spot], Vec::new());
    pipeline(2).render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    let positions = ctx.global_vector_array(shader_ids::LIGHT_POSITION).unwrap();
    let directions = ctx.global_vector_array(shader_ids::LIGHT_DIRECTION).unwrap();
    assert!(positions[0].abs_diff_eq(Vec4::new(1.0, 2.0, 3.0, 1.0 / 16.0), 1e-6));
    assert!(directions[0].abs_diff_eq(Vec4::new(0.0, 1.0, 0.0, 0.0), 1e-5));
}

#[test]
fn packing_is_deterministic() {
    let lights: Vec<Light> = (0..7).map(|i| point_light(1.0 + i as f32, i as f32)).collect();
    let mut ctx = RecordingContext::new(lights, Vec::new());
    let mut pipeline = pipeline(3);

    pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());
    let first = pipeline.lights().packed().clone();
    pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());

    assert_eq!(&first, pipeline.lights().packed());
}

#[test]
fn absent_light_entry_ends_enumeration() {
    let sun = sun_light(1.0);
    let scene = SceneLighting {
        ambient: Color::BLACK,
        sun: Some(sun.id),
    };
    let mut ctx = RecordingContext::default();
    ctx.set_visible_lights(vec![Some(point_light(1.0, 0.0)), None, Some(sun)]);
    let mut pipeline = pipeline(4);
    pipeline.render(&mut ctx, &[Camera::default()], &scene);

    assert_eq!(pipeline.lights().main_light_index(), None);
    assert_eq!(packed_count(&ctx), 1);
    assert_eq!(
        ctx.global_vector(shader_ids::MAIN_LIGHT_COLOR),
        Some(Vec4::ZERO)
    );
}

#[test]
fn padded_light_buffer_is_ignored() {
    let ctx_lights = vec![point_light(1.0, 0.0), point_light(1.0, 1.0)];
    let mut ctx = RecordingContext::new(ctx_lights, Vec::new()).with_light_padding(6);
    pipeline(4).render(&mut ctx, &[Camera::default()], &SceneLighting::default());
    assert_eq!(packed_count(&ctx), 2);
}

#[test]
fn each_camera_publishes_its_own_lights() {
    let mut ctx = RecordingContext::new(vec![sun_light(1.0)], Vec::new());
    let mut pipeline = pipeline(4);
    pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());
    assert_ne!(
        ctx.global_vector(shader_ids::MAIN_LIGHT_COLOR),
        Some(Vec4::ZERO)
    );

    ctx.set_visible_lights(Vec::new());
    pipeline.render(&mut ctx, &[Camera::default()], &SceneLighting::default());
    assert_eq!(
        ctx.global_vector(shader_ids::MAIN_LIGHT_COLOR),
        Some(Vec4::ZERO)
    );
    assert_eq!(packed_count(&ctx), 0);
}
