pub mod camera;
pub mod color;
pub mod error;
pub mod light;
pub mod transform;

pub use camera::{Camera, CullingParameters, Viewport};
pub use color::Color;
pub use error::CameraError;
pub use light::{Light, LightId, LightKind, SceneLighting};
pub use transform::Transform;
