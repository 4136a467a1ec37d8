//! Layout geometry records.

use serde::{Deserialize, Serialize};

/// Bounding rectangle reported by the host layout engine.
///
/// All rectangles handed to one computation must share a coordinate space
/// (viewport-relative client coordinates in a browser host).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns whether this rect has no usable area.
    ///
    /// Collapsed or not-yet-laid-out elements report zero (or non-finite)
    /// extents; geometry derived from them is meaningless.
    pub fn is_zero_sized(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Where the active-item indicator should be drawn.
///
/// Offsets are relative to the nav container's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorGeometry {
    pub offset_x: f64,
    pub width: f64,
    pub visible: bool,
}

impl IndicatorGeometry {
    /// Hidden geometry with zeroed extents (initial state).
    pub const HIDDEN: Self = Self {
        offset_x: 0.0,
        width: 0.0,
        visible: false,
    };

    pub fn visible_at(offset_x: f64, width: f64) -> Self {
        Self {
            offset_x,
            width,
            visible: true,
        }
    }

    /// Same offset/width, marked hidden.
    ///
    /// Used so a transiently missing element fades the indicator out in
    /// place instead of snapping it to zero.
    pub fn hidden(self) -> Self {
        Self {
            visible: false,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IndicatorGeometry, Rect};

    #[test]
    fn zero_sized_detects_collapsed_and_non_finite_rects() {
        assert!(Rect::default().is_zero_sized());
        assert!(Rect::new(0.0, 0.0, 120.0, 0.0).is_zero_sized());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 40.0).is_zero_sized());
        assert!(!Rect::new(-10.0, -10.0, 120.0, 40.0).is_zero_sized());
    }

    #[test]
    fn hidden_keeps_last_extents() {
        let geometry = IndicatorGeometry::visible_at(42.0, 80.0).hidden();
        assert!(!geometry.visible);
        assert_eq!(geometry.offset_x, 42.0);
        assert_eq!(geometry.width, 80.0);
    }
}
