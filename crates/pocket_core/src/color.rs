use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }

    /// RGB scaled by `intensity`, alpha dropped to zero.
    /// This is the radiance form consumed by the lighting shaders.
    pub fn scaled_rgb(self, intensity: f32) -> Vec4 {
        Vec4::new(
            self.r * intensity,
            self.g * intensity,
            self.b * intensity,
            0.0,
        )
    }
}

impl From<Color> for Vec4 {
    fn from(color: Color) -> Self {
        color.to_vec4()
    }
}
