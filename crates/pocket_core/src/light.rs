use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{color::Color, transform::Transform};

/// Stable identity of a light. Used to recognise the scene's sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LightId(pub Uuid);

impl LightId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LightId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    #[serde(default)]
    pub id: LightId,
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance. Point and spot lights require `range > 0`.
    #[serde(default = "default_range")]
    pub range: f32,
    #[serde(default)]
    pub transform: Transform,
}

fn default_range() -> f32 {
    10.0
}

impl Light {
    pub fn directional(color: Color, intensity: f32, transform: Transform) -> Self {
        Self {
            id: LightId::new(),
            kind: LightKind::Directional,
            color,
            intensity,
            range: default_range(),
            transform,
        }
    }

    pub fn point(color: Color, intensity: f32, range: f32, position: Vec3) -> Self {
        Self {
            id: LightId::new(),
            kind: LightKind::Point,
            color,
            intensity,
            range,
            transform: Transform::from_translation(position),
        }
    }

    pub fn spot(color: Color, intensity: f32, range: f32, transform: Transform) -> Self {
        Self {
            id: LightId::new(),
            kind: LightKind::Spot,
            color,
            intensity,
            range,
            transform,
        }
    }

    pub fn is_directional(&self) -> bool {
        self.kind == LightKind::Directional
    }

    /// Emission direction in world space.
    pub fn forward(&self) -> Vec3 {
        self.transform.forward()
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// `color * intensity`, alpha zeroed.
    pub fn radiance(&self) -> Vec4 {
        self.color.scaled_rgb(self.intensity)
    }

    /// Vector from a lit surface towards the light, `w = 0`.
    pub fn direction_to_light(&self) -> Vec4 {
        (-self.forward()).extend(0.0)
    }

    /// Inverse-square falloff scale, `1 / range²`.
    ///
    /// A zero range is a content error; it is caught in debug builds and
    /// produces an infinite factor otherwise.
    pub fn attenuation(&self) -> f32 {
        debug_assert!(
            self.range > 0.0,
            "light {:?} has non-positive range {}",
            self.id,
            self.range
        );
        1.0 / (self.range * self.range)
    }
}

/// Scene-wide lighting inputs that are not part of the culled light list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneLighting {
    pub ambient: Color,
    /// Preferred main light. Wins over brighter directionals when visible.
    #[serde(default)]
    pub sun: Option<LightId>,
}
