use glam::Vec4;
use pocket_core::{Light, LightKind};

use crate::context::CullingResults;

/// Fixed-capacity additional-light arrays, laid out the way the shaders
/// read them (one array per attribute).
///
/// The arrays are always `capacity` long. Only the first `count` entries are
/// meaningful; the rest are kept zeroed.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedLightSet {
    colors: Vec<Vec4>,
    directions: Vec<Vec4>,
    positions: Vec<Vec4>,
    count: usize,
}

impl PackedLightSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            colors: vec![Vec4::ZERO; capacity],
            directions: vec![Vec4::ZERO; capacity],
            positions: vec![Vec4::ZERO; capacity],
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.colors.len()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_full(&self) -> bool {
        self.count == self.capacity()
    }

    pub fn colors(&self) -> &[Vec4] {
        &self.colors
    }

    pub fn directions(&self) -> &[Vec4] {
        &self.directions
    }

    pub fn positions(&self) -> &[Vec4] {
        &self.positions
    }

    /// Zeroes the used prefix so stale lights from the last camera never
    /// reach a shader.
    pub fn reset(&mut self) {
        let used = self.count;
        self.colors[..used].fill(Vec4::ZERO);
        self.directions[..used].fill(Vec4::ZERO);
        self.positions[..used].fill(Vec4::ZERO);
        self.count = 0;
    }

    /// Appends one light. Returns `false` (and drops the light) when full.
    pub fn push(&mut self, light: &Light) -> bool {
        if self.is_full() {
            return false;
        }

        let slot = self.count;
        self.colors[slot] = light.radiance();
        self.directions[slot] = light.direction_to_light();
        self.positions[slot] = match light.kind {
            LightKind::Directional => Vec4::ZERO,
            LightKind::Point | LightKind::Spot => light.position().extend(light.attenuation()),
        };
        self.count += 1;
        true
    }

    /// Single pass over the visible lights in delivery order, skipping the
    /// main light, until the arrays are full. Whatever does not fit is dropped.
    pub fn pack(&mut self, culling: &CullingResults, main_light: Option<usize>) {
        self.reset();

        for (index, light) in culling.lights() {
            if self.is_full() {
                log::trace!(
                    "additional light budget ({}) reached at visible light {index}",
                    self.capacity()
                );
                break;
            }
            if Some(index) == main_light {
                continue;
            }
            self.push(light);
        }
    }
}
