use navsync_core::{compute_geometry, compute_progress, IndicatorGeometry, Rect};
use std::collections::BTreeMap;

#[test]
fn progress_is_monotonic_and_bounded_for_scrollable_pages() {
    for (scroll_height, client_height) in [(1001.0, 1000.0), (2400.0, 800.0), (10_000.0, 375.5)] {
        let mut previous = f64::NEG_INFINITY;
        let mut scroll_top = -200.0;
        while scroll_top <= scroll_height + 200.0 {
            let progress = compute_progress(scroll_top, scroll_height, client_height);
            assert!((0.0..=100.0).contains(&progress), "out of range: {progress}");
            assert!(progress >= previous, "not monotonic at {scroll_top}");
            previous = progress;
            scroll_top += 7.25;
        }
    }
}

#[test]
fn degenerate_page_always_reports_zero() {
    for height in [0.0, 1.0, 640.0, 1080.0] {
        for scroll_top in [0.0, 1.0, 50.0, 10_000.0] {
            assert_eq!(compute_progress(scroll_top, height, height), 0.0);
        }
    }
}

#[test]
fn sub_pixel_scroll_range_is_guarded() {
    // 0.5px of scrollable content divides by 1, not by 0.5.
    assert_eq!(compute_progress(0.25, 1000.5, 1000.0), 25.0);
}

#[test]
fn geometry_visible_iff_candidate_present() {
    let container = Rect::new(37.5, 0.0, 640.0, 48.0);
    let candidates = BTreeMap::from([
        ("home".to_string(), Rect::new(40.0, 8.0, 72.0, 32.0)),
        ("skills".to_string(), Rect::new(121.25, 8.0, 66.5, 32.0)),
    ]);

    for id in ["home", "skills", "projects", ""] {
        let geometry = compute_geometry(id, &candidates, &container);
        match candidates.get(id) {
            Some(rect) => {
                assert!(geometry.visible);
                assert_eq!(geometry.offset_x, rect.left - container.left);
                assert_eq!(geometry.width, rect.width);
            }
            None => assert_eq!(geometry, IndicatorGeometry::HIDDEN),
        }
    }
}
