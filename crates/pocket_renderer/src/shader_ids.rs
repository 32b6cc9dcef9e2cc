//! Global shader property names published every frame.
//!
//! Shaders read `_LightCount` entries from the three `_Light*` arrays and
//! nothing beyond that.

pub const MAIN_LIGHT_DIRECTION: &str = "_MainLightDirection";
pub const MAIN_LIGHT_COLOR: &str = "_MainLightColor";
pub const AMBIENT_LIGHT: &str = "_AmbientLight";

pub const LIGHT_COUNT: &str = "_LightCount";
pub const LIGHT_COLOR: &str = "_LightColor";
pub const LIGHT_DIRECTION: &str = "_LightDirection";
pub const LIGHT_POSITION: &str = "_LightPosition";
