use thiserror::Error;

/// Reasons a camera cannot produce culling parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera '{camera}' has an empty viewport ({width}x{height})")]
    EmptyViewport {
        camera: String,
        width: f32,
        height: f32,
    },

    #[error("camera '{camera}' has invalid clip planes (near: {near}, far: {far})")]
    InvalidClipPlanes { camera: String, near: f32, far: f32 },

    #[error("camera '{camera}' has an invalid vertical field of view ({fov_y} rad)")]
    InvalidFieldOfView { camera: String, fov_y: f32 },

    #[error("camera '{camera}' has a non-finite transform")]
    NonFiniteTransform { camera: String },
}
