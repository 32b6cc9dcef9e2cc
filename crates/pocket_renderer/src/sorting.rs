use std::cmp::Ordering;

use crate::{
    context::VisibleRenderer,
    settings::{SortingCriteria, SortingSettings},
};

/// Number of depth bands used by `QUANTIZED_FRONT_TO_BACK`.
pub const DEPTH_BUCKETS: u32 = 64;

/// Orders a draw list by `settings.criteria`.
///
/// The sort is stable: whatever the criteria leave tied keeps culling order.
pub fn sort_renderers(items: &mut [&VisibleRenderer], settings: &SortingSettings) {
    items.sort_by(|a, b| compare(a, b, settings));
}

pub fn compare(a: &VisibleRenderer, b: &VisibleRenderer, settings: &SortingSettings) -> Ordering {
    let criteria = settings.criteria;
    let mut order = Ordering::Equal;

    if criteria.contains(SortingCriteria::SORTING_LAYER) {
        order = order.then(a.sorting_layer.cmp(&b.sorting_layer));
    }
    if criteria.contains(SortingCriteria::RENDER_QUEUE) {
        order = order.then(a.render_queue.cmp(&b.render_queue));
    }
    if criteria.contains(SortingCriteria::BACK_TO_FRONT) {
        order = order.then_with(|| distance_sq(b, settings).total_cmp(&distance_sq(a, settings)));
    }
    if criteria.contains(SortingCriteria::QUANTIZED_FRONT_TO_BACK) {
        order = order.then_with(|| depth_bucket(a, settings).cmp(&depth_bucket(b, settings)));
    }
    if criteria.contains(SortingCriteria::OPTIMIZE_STATE_CHANGES) {
        order = order.then(a.material_id.cmp(&b.material_id));
    }

    order
}

fn distance_sq(item: &VisibleRenderer, settings: &SortingSettings) -> f32 {
    item.bounds_center.distance_squared(settings.camera_position)
}

/// Coarse front-to-back band so nearby objects can still be grouped by state.
pub fn depth_bucket(item: &VisibleRenderer, settings: &SortingSettings) -> u32 {
    if settings.camera_far <= 0.0 {
        return 0;
    }
    let distance = distance_sq(item, settings).sqrt();
    let normalized = (distance / settings.camera_far).clamp(0.0, 1.0);
    ((normalized * (DEPTH_BUCKETS - 1) as f32) as u32).min(DEPTH_BUCKETS - 1)
}
