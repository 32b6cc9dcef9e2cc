use bitflags::bitflags;
use glam::Vec3;
use pocket_core::Camera;

/// Name of a shader pass a renderer can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderTagId(pub &'static str);

impl ShaderTagId {
    pub const UNIVERSAL_FORWARD: Self = Self("UniversalForward");
    pub const SRP_DEFAULT_UNLIT: Self = Self("SRPDefaultUnlit");
    pub const LIGHTWEIGHT_FORWARD: Self = Self("LightweightForward");
}

bitflags! {
    /// How a draw list is ordered. Earlier flags take precedence.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SortingCriteria: u32 {
        const SORTING_LAYER = 1 << 0;
        const RENDER_QUEUE = 1 << 1;
        const BACK_TO_FRONT = 1 << 2;
        const QUANTIZED_FRONT_TO_BACK = 1 << 3;
        const OPTIMIZE_STATE_CHANGES = 1 << 4;
        const CANVAS_ORDER = 1 << 5;

        const COMMON_OPAQUE = Self::SORTING_LAYER.bits()
            | Self::RENDER_QUEUE.bits()
            | Self::QUANTIZED_FRONT_TO_BACK.bits()
            | Self::OPTIMIZE_STATE_CHANGES.bits()
            | Self::CANVAS_ORDER.bits();
        const COMMON_TRANSPARENT = Self::SORTING_LAYER.bits()
            | Self::RENDER_QUEUE.bits()
            | Self::BACK_TO_FRONT.bits()
            | Self::OPTIMIZE_STATE_CHANGES.bits();
    }
}

/// Sort criteria plus the camera data needed to evaluate distances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortingSettings {
    pub criteria: SortingCriteria,
    pub camera_position: Vec3,
    pub camera_far: f32,
}

impl SortingSettings {
    pub fn new(camera: &Camera) -> Self {
        Self {
            criteria: SortingCriteria::empty(),
            camera_position: camera.position(),
            camera_far: camera.far,
        }
    }

    pub fn with_criteria(mut self, criteria: SortingCriteria) -> Self {
        self.criteria = criteria;
        self
    }
}

pub const MAX_SHADER_PASSES: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct DrawingSettings {
    pub sorting: SortingSettings,
    passes: [Option<ShaderTagId>; MAX_SHADER_PASSES],
}

impl DrawingSettings {
    pub fn new(first_pass: ShaderTagId, sorting: SortingSettings) -> Self {
        let mut passes = [None; MAX_SHADER_PASSES];
        passes[0] = Some(first_pass);
        Self { sorting, passes }
    }

    /// Sets the pass drawn at `index`. Indices past [`MAX_SHADER_PASSES`]
    /// are ignored.
    pub fn set_shader_pass_name(&mut self, index: usize, pass: ShaderTagId) {
        match self.passes.get_mut(index) {
            Some(slot) => *slot = Some(pass),
            None => log::warn!(
                "shader pass index {index} out of range (max {MAX_SHADER_PASSES}), '{}' ignored",
                pass.0
            ),
        }
    }

    pub fn shader_pass_name(&self, index: usize) -> Option<ShaderTagId> {
        self.passes.get(index).copied().flatten()
    }

    pub fn shader_passes(&self) -> impl Iterator<Item = ShaderTagId> + '_ {
        self.passes.iter().filter_map(|pass| *pass)
    }

    pub fn accepts(&self, pass: ShaderTagId) -> bool {
        self.shader_passes().any(|p| p == pass)
    }
}

/// Inclusive range of render queue values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderQueueRange {
    pub lower: i32,
    pub upper: i32,
}

impl RenderQueueRange {
    pub const OPAQUE: Self = Self {
        lower: 0,
        upper: 2500,
    };
    pub const TRANSPARENT: Self = Self {
        lower: 2501,
        upper: 5000,
    };
    pub const ALL: Self = Self {
        lower: 0,
        upper: 5000,
    };

    pub fn contains(&self, queue: i32) -> bool {
        (self.lower..=self.upper).contains(&queue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteringSettings {
    pub render_queue_range: RenderQueueRange,
    /// One bit per renderer layer.
    pub layer_mask: u32,
}

impl FilteringSettings {
    pub fn new(render_queue_range: RenderQueueRange) -> Self {
        Self {
            render_queue_range,
            layer_mask: u32::MAX,
        }
    }

    pub fn includes_layer(&self, layer: u32) -> bool {
        layer < 32 && self.layer_mask & (1 << layer) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_ranges_do_not_overlap() {
        assert!(RenderQueueRange::OPAQUE.contains(2500));
        assert!(!RenderQueueRange::TRANSPARENT.contains(2500));
        assert!(RenderQueueRange::TRANSPARENT.contains(3000));
        assert!(!RenderQueueRange::OPAQUE.contains(3000));
    }

    #[test]
    fn pass_slots_keep_their_index() {
        let sorting = SortingSettings::new(&Camera::default());
        let mut drawing = DrawingSettings::new(ShaderTagId::UNIVERSAL_FORWARD, sorting);
        drawing.set_shader_pass_name(2, ShaderTagId::LIGHTWEIGHT_FORWARD);
        drawing.set_shader_pass_name(MAX_SHADER_PASSES, ShaderTagId::SRP_DEFAULT_UNLIT);

        assert_eq!(drawing.shader_pass_name(1), None);
        assert_eq!(
            drawing.shader_pass_name(2),
            Some(ShaderTagId::LIGHTWEIGHT_FORWARD)
        );
        assert!(!drawing.accepts(ShaderTagId::SRP_DEFAULT_UNLIT));
        assert_eq!(drawing.shader_passes().count(), 2);
    }

    #[test]
    fn layer_mask_filters_by_bit() {
        let mut filtering = FilteringSettings::new(RenderQueueRange::ALL);
        filtering.layer_mask = 0b101;
        assert!(filtering.includes_layer(0));
        assert!(!filtering.includes_layer(1));
        assert!(filtering.includes_layer(2));
        assert!(!filtering.includes_layer(40));
    }
}
