//! Minimal forward render pipeline for mobile GPUs.
//!
//! The pipeline owns no GPU objects. Everything it needs from the host engine
//! goes through [`RenderContext`], and everything it hands back to shaders is
//! published as named globals (see [`shader_ids`]).

pub mod commands;
pub mod config;
pub mod context;
pub mod lighting;
pub mod pipeline;
pub mod recording;
pub mod settings;
pub mod shader_ids;
pub mod sorting;

pub use commands::{Command, CommandBuffer};
pub use config::{ConfigError, RenderPipelineConfig};
pub use context::{CullingResults, RenderContext, VisibleRenderer};
pub use lighting::{ForwardLights, MainLight, PackedLightSet};
pub use pipeline::{FrameStats, MobileRenderPipeline};
pub use recording::{ContextCall, RecordingContext};
pub use settings::{
    DrawingSettings, FilteringSettings, RenderQueueRange, ShaderTagId, SortingCriteria,
    SortingSettings,
};
