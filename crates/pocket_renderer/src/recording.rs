//! A [`RenderContext`] that draws nothing and remembers everything.
//!
//! Used by the tests and the demo binary in place of a real host engine.

use std::collections::HashMap;

use glam::{Vec3, Vec4};
use pocket_core::{Camera, CullingParameters, Light};

use crate::{
    commands::{Command, CommandBuffer},
    context::{CullingResults, RenderContext, VisibleRenderer},
    settings::{DrawingSettings, FilteringSettings, RenderQueueRange, SortingCriteria},
    sorting::sort_renderers,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ContextCall {
    SetupCamera {
        camera: String,
    },
    ExecuteCommandBuffer {
        name: &'static str,
        commands: Vec<Command>,
    },
    Cull {
        camera_position: Vec3,
        visible_renderers: usize,
    },
    DrawRenderers {
        queue_range: RenderQueueRange,
        criteria: SortingCriteria,
        /// Renderer ids in submission order.
        drawn: Vec<u32>,
    },
    DrawSkybox {
        camera: String,
    },
    Submit,
}

impl ContextCall {
    /// Short label, handy for asserting on call order.
    pub fn stage(&self) -> String {
        match self {
            ContextCall::SetupCamera { .. } => "setup_camera".to_string(),
            ContextCall::ExecuteCommandBuffer { name, .. } => format!("execute:{name}"),
            ContextCall::Cull { .. } => "cull".to_string(),
            ContextCall::DrawRenderers { .. } => "draw_renderers".to_string(),
            ContextCall::DrawSkybox { .. } => "draw_skybox".to_string(),
            ContextCall::Submit => "submit".to_string(),
        }
    }
}

/// Last value written to a shader global.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalValue {
    Vector(Vec4),
    Int(i32),
    VectorArray(Vec<Vec4>),
}

#[derive(Debug, Default)]
pub struct RecordingContext {
    lights: Vec<Option<Light>>,
    renderers: Vec<VisibleRenderer>,
    calls: Vec<ContextCall>,
    globals: HashMap<&'static str, GlobalValue>,
    submits: usize,
}

impl RecordingContext {
    pub fn new(lights: Vec<Light>, renderers: Vec<VisibleRenderer>) -> Self {
        Self {
            lights: lights.into_iter().map(Some).collect(),
            renderers,
            ..Default::default()
        }
    }

    /// Appends empty slots after the lights, the way an over-allocated
    /// culling buffer looks.
    pub fn with_light_padding(mut self, empty_slots: usize) -> Self {
        self.lights.extend(std::iter::repeat_n(None, empty_slots));
        self
    }

    /// Raw visible-light buffer handed out by `cull`, gaps included.
    pub fn set_visible_lights(&mut self, lights: Vec<Option<Light>>) {
        self.lights = lights;
    }

    pub fn calls(&self) -> &[ContextCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn submits(&self) -> usize {
        self.submits
    }

    pub fn globals(&self) -> &HashMap<&'static str, GlobalValue> {
        &self.globals
    }

    pub fn global_vector(&self, name: &str) -> Option<Vec4> {
        match self.globals.get(name) {
            Some(GlobalValue::Vector(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn global_int(&self, name: &str) -> Option<i32> {
        match self.globals.get(name) {
            Some(GlobalValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn global_vector_array(&self, name: &str) -> Option<&[Vec4]> {
        match self.globals.get(name) {
            Some(GlobalValue::VectorArray(values)) => Some(values),
            _ => None,
        }
    }

    /// Every `draw_renderers` call as `(queue range, drawn ids)`.
    pub fn draws(&self) -> impl Iterator<Item = (RenderQueueRange, &[u32])> {
        self.calls.iter().filter_map(|call| match call {
            ContextCall::DrawRenderers {
                queue_range, drawn, ..
            } => Some((*queue_range, drawn.as_slice())),
            _ => None,
        })
    }
}

impl RenderContext for RecordingContext {
    fn setup_camera_properties(&mut self, camera: &Camera) {
        self.calls.push(ContextCall::SetupCamera {
            camera: camera.name.clone(),
        });
    }

    fn execute_command_buffer(&mut self, commands: &CommandBuffer) {
        for command in commands.commands() {
            match command {
                Command::SetGlobalVector { name, value } => {
                    self.globals.insert(*name, GlobalValue::Vector(*value));
                }
                Command::SetGlobalInt { name, value } => {
                    self.globals.insert(*name, GlobalValue::Int(*value));
                }
                Command::SetGlobalVectorArray { name, values } => {
                    self.globals
                        .insert(*name, GlobalValue::VectorArray(values.clone()));
                }
                Command::ClearRenderTarget { .. } => {}
            }
        }

        self.calls.push(ContextCall::ExecuteCommandBuffer {
            name: commands.name(),
            commands: commands.commands().to_vec(),
        });
    }

    fn cull(&mut self, parameters: &CullingParameters) -> CullingResults {
        let visible_renderers: Vec<VisibleRenderer> = self
            .renderers
            .iter()
            .filter(|r| parameters.sphere_visible(r.bounds_center, r.bounds_radius))
            .cloned()
            .collect();

        self.calls.push(ContextCall::Cull {
            camera_position: parameters.position,
            visible_renderers: visible_renderers.len(),
        });

        CullingResults {
            visible_lights: self.lights.clone(),
            visible_renderers,
        }
    }

    fn draw_renderers(
        &mut self,
        culling: &CullingResults,
        drawing: &DrawingSettings,
        filtering: &FilteringSettings,
    ) {
        let mut list: Vec<&VisibleRenderer> = culling
            .visible_renderers
            .iter()
            .filter(|r| filtering.render_queue_range.contains(r.render_queue))
            .filter(|r| filtering.includes_layer(r.layer))
            .filter(|r| drawing.accepts(r.shader_pass))
            .collect();
        sort_renderers(&mut list, &drawing.sorting);

        self.calls.push(ContextCall::DrawRenderers {
            queue_range: filtering.render_queue_range,
            criteria: drawing.sorting.criteria,
            drawn: list.iter().map(|r| r.id).collect(),
        });
    }

    fn draw_skybox(&mut self, camera: &Camera) {
        self.calls.push(ContextCall::DrawSkybox {
            camera: camera.name.clone(),
        });
    }

    fn submit(&mut self) {
        self.submits += 1;
        self.calls.push(ContextCall::Submit);
    }
}
