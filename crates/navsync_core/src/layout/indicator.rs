//! Active-item indicator positioning.

use crate::model::geometry::{IndicatorGeometry, Rect};
use std::collections::BTreeMap;

/// Computes where the indicator sits under `active_id`.
///
/// `candidates` maps nav item ids to their current rects, in the same
/// coordinate space as `container`. The result is hidden (with zeroed
/// extents) iff `active_id` has no candidate rect; callers that want to keep
/// the last position should use [`IndicatorGeometry::hidden`] on the previous
/// value instead.
pub fn compute_geometry(
    active_id: &str,
    candidates: &BTreeMap<String, Rect>,
    container: &Rect,
) -> IndicatorGeometry {
    match candidates.get(active_id) {
        Some(candidate) => {
            IndicatorGeometry::visible_at(candidate.left - container.left, candidate.width)
        }
        None => IndicatorGeometry::HIDDEN,
    }
}
