//! Host capability ports.
//!
//! # Responsibility
//! - Declare the minimal surface the synchronizer consumes from its host
//!   (browser bridge, native shell, or test fake).
//! - Keep the core free of any concrete DOM or tweening API.
//!
//! # Invariants
//! - All ports are driven from a single thread; none requires `Send`.
//! - Ports report absence (`None`) instead of failing.

use crate::config::FocusBand;
use crate::model::geometry::Rect;
use crate::nav::event::EventSink;
use crate::observe::ObservationSink;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Viewport intersection capability.
///
/// The host reports visibility changes for every registered region through
/// the sink handed over at registration. One sink may be shared by many
/// regions; hosts are free to batch entries of one frame together.
pub trait IntersectionSource {
    /// Starts tracking `region_id` against `band`.
    ///
    /// Registering an id twice is a host contract violation; configured ids
    /// are unique, so the synchronizer never does it.
    fn register(&mut self, region_id: &str, band: &FocusBand, sink: ObservationSink);

    /// Stops tracking `region_id`. Unknown ids are ignored.
    fn unregister(&mut self, region_id: &str);
}

/// Element identifier understood by [`LayoutSource`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementHandle {
    /// The wrapper the indicator is positioned inside.
    Container,
    /// The nav button for one item id.
    NavItem(String),
}

/// Layout geometry capability.
pub trait LayoutSource {
    /// Current bounding rect, or `None` when the element is not mounted.
    fn bounding_rect(&self, handle: &ElementHandle) -> Option<Rect>;
}

/// Document scroll metrics, polled on every scroll/resize tick.
pub trait ScrollMetrics {
    fn scroll_top(&self) -> f64;
    fn scroll_height(&self) -> f64;
    fn client_height(&self) -> f64;
}

/// Push-style trigger (scroll listener, resize observer, element-set
/// watcher).
///
/// While attached, the host sends `NavEvent`s through the sink. `detach`
/// must be safe to call when already detached.
pub trait TriggerSource {
    fn attach(&mut self, sink: EventSink);
    fn detach(&mut self);
}

/// Scrolls a section into view on explicit navigation.
pub trait ScrollTarget {
    /// Best effort; hosts ignore ids they cannot resolve.
    fn scroll_into_view(&mut self, section_id: &str);
}

/// Element animated through [`AnimationPort`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationTarget {
    /// The sliding active-item underline.
    Indicator,
}

/// One animated property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenProperty {
    TranslateX(f64),
    Width(f64),
    Opacity(f64),
}

/// Tween easing curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "power2.out")]
    Power2Out,
    #[serde(rename = "power3.out")]
    Power3Out,
}

impl Easing {
    /// Host-facing curve name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Power2Out => "power2.out",
            Self::Power3Out => "power3.out",
        }
    }
}

/// Tweening engine capability.
pub trait AnimationPort {
    /// Tweens `target` towards `properties`; zero duration applies at once.
    fn animate_to(
        &mut self,
        target: &AnimationTarget,
        properties: &[TweenProperty],
        duration: Duration,
        easing: Easing,
    );

    /// Stops every running tween started through this port.
    fn kill_all(&mut self);
}
