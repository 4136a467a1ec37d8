//! Viewport-driven navigation synchronizer and content normalizer.
//!
//! This crate owns every behavioral rule of the portfolio navigation:
//! which section is active, where the indicator sits, how far the page has
//! scrolled, and how bullet content is cleaned up. Hosts plug in through the
//! capability traits in [`port`].

pub mod config;
pub mod content;
pub mod layout;
pub mod logging;
pub mod model;
pub mod nav;
pub mod observe;
pub mod port;
pub mod reactive;

pub use config::{ConfigError, FocusBand, IndicatorConfig, NavConfig, TimelineConfig};
pub use content::bullets::normalize;
pub use content::experience::{ExperienceEntry, ExperienceTimeline};
pub use layout::indicator::compute_geometry;
pub use layout::progress::{compute_progress, section_progress, timeline_progress};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget, LoggingConfig};
pub use model::geometry::{IndicatorGeometry, Rect};
pub use model::nav::{ActiveState, NavItem, NavItems, NavItemsError, SectionObservation};
pub use nav::{EventSink, Lifecycle, NavCoordinator, NavEvent, NavPorts, NavSnapshot};
pub use observe::{select_active, ObservationSink, SectionObserver};
pub use port::{
    AnimationPort, AnimationTarget, Easing, ElementHandle, IntersectionSource, LayoutSource,
    ScrollMetrics, ScrollTarget, TriggerSource, TweenProperty,
};
pub use reactive::cell::{Observable, SubscriptionId};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
