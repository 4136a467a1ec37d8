//! Scroll progress percentages.

use crate::config::TimelineConfig;
use crate::model::geometry::Rect;

/// Page scroll progress in `[0, 100]`.
///
/// `scroll_top / max(1, scroll_height - client_height) * 100`, clamped. A page
/// no taller than the viewport has nothing to scroll and reports 0 for any
/// offset. Non-finite input also reports 0.
pub fn compute_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable.is_nan() || scrollable <= 0.0 {
        return 0.0;
    }
    let range = scrollable.max(1.0);
    let progress = scroll_top / range * 100.0;
    if !progress.is_finite() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// Progress of a single section through the viewport center, in `[0, 100]`.
///
/// Starts at 0 when the section top reaches `viewport center + start_offset`
/// and ends at 100 when the section bottom reaches the viewport center. This
/// drives the experience timeline fill.
pub fn section_progress(section: &Rect, viewport_height: f64, start_offset: f64) -> f64 {
    let center = viewport_height / 2.0;
    let travelled = center + start_offset - section.top;
    let span = section.height + start_offset;
    if !(travelled.is_finite() && span.is_finite()) {
        return 0.0;
    }
    if span <= 0.0 {
        return if travelled > 0.0 { 100.0 } else { 0.0 };
    }
    (travelled / span * 100.0).clamp(0.0, 100.0)
}

/// [`section_progress`] with the configured timeline start offset.
pub fn timeline_progress(section: &Rect, viewport_height: f64, config: &TimelineConfig) -> f64 {
    section_progress(section, viewport_height, config.start_offset_px)
}

#[cfg(test)]
mod tests {
    use super::{compute_progress, section_progress, timeline_progress};
    use crate::config::{NavConfig, TimelineConfig};
    use crate::model::geometry::Rect;

    #[test]
    fn progress_is_a_clamped_ratio() {
        assert_eq!(compute_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(compute_progress(500.0, 3000.0, 1000.0), 25.0);
        assert_eq!(compute_progress(2000.0, 3000.0, 1000.0), 100.0);
        assert_eq!(compute_progress(2600.0, 3000.0, 1000.0), 100.0);
        assert_eq!(compute_progress(-40.0, 3000.0, 1000.0), 0.0);
    }

    #[test]
    fn degenerate_page_reports_zero() {
        for scroll_top in [0.0, 0.5, 10.0, 900.0] {
            assert_eq!(compute_progress(scroll_top, 800.0, 800.0), 0.0);
        }
    }

    #[test]
    fn non_finite_input_reports_zero() {
        assert_eq!(compute_progress(f64::NAN, 3000.0, 1000.0), 0.0);
        assert_eq!(compute_progress(10.0, f64::INFINITY, 1000.0), 0.0);
    }

    #[test]
    fn section_progress_tracks_center_crossing() {
        // center = 400, start at top == 440, end at bottom == 400
        let before = Rect::new(0.0, 900.0, 800.0, 1000.0);
        assert_eq!(section_progress(&before, 800.0, 40.0), 0.0);

        let start = Rect::new(0.0, 440.0, 800.0, 1000.0);
        assert_eq!(section_progress(&start, 800.0, 40.0), 0.0);

        let halfway = Rect::new(0.0, -80.0, 800.0, 1000.0);
        assert_eq!(section_progress(&halfway, 800.0, 40.0), 50.0);

        let past = Rect::new(0.0, -2000.0, 800.0, 1000.0);
        assert_eq!(section_progress(&past, 800.0, 40.0), 100.0);
    }

    #[test]
    fn empty_section_jumps_from_zero_to_full() {
        let above = Rect::new(0.0, 100.0, 800.0, 0.0);
        assert_eq!(section_progress(&above, 800.0, 0.0), 100.0);
        let below = Rect::new(0.0, 700.0, 800.0, 0.0);
        assert_eq!(section_progress(&below, 800.0, 0.0), 0.0);
    }

    #[test]
    fn timeline_progress_uses_configured_start_offset() {
        let section = Rect::new(0.0, 440.0, 800.0, 1000.0);
        assert_eq!(timeline_progress(&section, 800.0, &TimelineConfig::default()), 0.0);

        // start at top == 400 + 140; the same section is 100px in
        let config = NavConfig::from_json_str(r#"{"timeline": {"start_offset_px": 140}}"#)
            .expect("timeline override should parse");
        let expected = 100.0 / 1140.0 * 100.0;
        assert_eq!(timeline_progress(&section, 800.0, &config.timeline), expected);
    }
}
