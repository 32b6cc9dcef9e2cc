use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::MobileRenderPipeline;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read pipeline config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pipeline config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Author-time pipeline settings. Frozen once a pipeline is created from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderPipelineConfig {
    pub enable_lighting: bool,
    /// Size of the additional-light arrays shaders are compiled against.
    pub max_additional_lights: usize,
    /// Reserved. There is no shadow pass yet.
    pub enable_shadows: bool,
}

impl Default for RenderPipelineConfig {
    fn default() -> Self {
        Self {
            enable_lighting: true,
            max_additional_lights: 4,
            enable_shadows: false,
        }
    }
}

impl RenderPipelineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn create_pipeline(self) -> MobileRenderPipeline {
        MobileRenderPipeline::new(self)
    }
}
