use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::{color::Color, error::CameraError, transform::Transform};

/// Pixel rectangle the camera renders into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width / self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
    /// Color the targets are cleared to before anything is drawn.
    #[serde(default)]
    pub background: Color,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            name: "Main Camera".to_string(),
            transform: Transform::default(),
            fov_y: 45.0f32.to_radians(),
            near: 0.1,
            far: 100.0,
            viewport: Viewport::new(1280.0, 720.0), // 16:9
            background: Color::rgb(0.1, 0.2, 0.3),
        }
    }
}

impl Camera {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            ..Default::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    /// Computes the "Projection Matrix" (View -> Clip)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.viewport.aspect_ratio(), self.near, self.far)
    }

    /// Computes the "View Matrix" (World -> View)
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.translation;
        Mat4::look_to_rh(eye, self.transform.forward(), self.transform.up())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Derives what the culling stage needs, or explains why this camera
    /// cannot be rendered this frame.
    pub fn try_culling_parameters(&self) -> Result<CullingParameters, CameraError> {
        let vp = &self.viewport;
        if !(vp.width > 0.0 && vp.height > 0.0) || !vp.width.is_finite() || !vp.height.is_finite()
        {
            return Err(CameraError::EmptyViewport {
                camera: self.name.clone(),
                width: vp.width,
                height: vp.height,
            });
        }

        if !(self.near > 0.0 && self.far > self.near && self.far.is_finite()) {
            return Err(CameraError::InvalidClipPlanes {
                camera: self.name.clone(),
                near: self.near,
                far: self.far,
            });
        }

        if !(self.fov_y > 0.0 && self.fov_y < std::f32::consts::PI) {
            return Err(CameraError::InvalidFieldOfView {
                camera: self.name.clone(),
                fov_y: self.fov_y,
            });
        }

        if !self.transform.is_finite() {
            return Err(CameraError::NonFiniteTransform {
                camera: self.name.clone(),
            });
        }

        let view_projection = self.view_projection();
        if !view_projection.is_finite() {
            return Err(CameraError::NonFiniteTransform {
                camera: self.name.clone(),
            });
        }

        Ok(CullingParameters {
            view_projection,
            position: self.position(),
            far: self.far,
            planes: extract_frustum_planes(&view_projection),
        })
    }
}

/// Inputs for the host's visibility query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullingParameters {
    pub view_projection: Mat4,
    pub position: Vec3,
    pub far: f32,
    /// Left, right, bottom, top, near, far. `xyz` is the inward unit normal.
    pub planes: [Vec4; 6],
}

impl CullingParameters {
    pub fn sphere_visible(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(center) + plane.w >= -radius)
    }
}

// Gribb/Hartmann, for a [0, 1] depth range.
fn extract_frustum_planes(m: &Mat4) -> [Vec4; 6] {
    let (r0, r1, r2, r3) = (m.row(0), m.row(1), m.row(2), m.row(3));
    [r3 + r0, r3 - r0, r3 + r1, r3 - r1, r2, r3 - r2].map(|plane| {
        let len = plane.truncate().length();
        if len > 0.0 { plane / len } else { plane }
    })
}
