//! Navigation coordinator state machine.

use crate::config::{IndicatorConfig, NavConfig};
use crate::layout::indicator::compute_geometry;
use crate::layout::progress::compute_progress;
use crate::model::geometry::{IndicatorGeometry, Rect};
use crate::model::nav::{ActiveState, NavItems, SectionObservation};
use crate::nav::event::{EventQueue, EventSink, NavEvent};
use crate::observe::{select_active, SectionObserver};
use crate::port::{
    AnimationPort, AnimationTarget, ElementHandle, IntersectionSource, LayoutSource,
    ScrollMetrics, ScrollTarget, TriggerSource, TweenProperty,
};
use crate::reactive::cell::Observable;
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// Host capabilities consumed by one coordinator.
pub struct NavPorts {
    pub intersections: Box<dyn IntersectionSource>,
    pub layout: Box<dyn LayoutSource>,
    pub scroll: Box<dyn ScrollMetrics>,
    /// Scroll listener, resize observer, element-set watcher, ...
    pub triggers: Vec<Box<dyn TriggerSource>>,
    pub scroll_target: Option<Box<dyn ScrollTarget>>,
    pub animation: Option<Box<dyn AnimationPort>>,
}

impl NavPorts {
    pub fn new(
        intersections: Box<dyn IntersectionSource>,
        layout: Box<dyn LayoutSource>,
        scroll: Box<dyn ScrollMetrics>,
    ) -> Self {
        Self {
            intersections,
            layout,
            scroll,
            triggers: Vec::new(),
            scroll_target: None,
            animation: None,
        }
    }

    pub fn with_trigger(mut self, trigger: Box<dyn TriggerSource>) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn with_scroll_target(mut self, target: Box<dyn ScrollTarget>) -> Self {
        self.scroll_target = Some(target);
        self
    }

    pub fn with_animation(mut self, animation: Box<dyn AnimationPort>) -> Self {
        self.animation = Some(animation);
        self
    }
}

/// Coordinator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built, no host registrations yet.
    Created,
    /// Sections registered and triggers attached.
    Mounted,
    /// Torn down; terminal.
    Disposed,
}

/// Full coordinator state record.
#[derive(Debug, Clone, PartialEq)]
pub struct NavSnapshot {
    pub active_id: String,
    pub scroll_progress: f64,
    pub geometry: IndicatorGeometry,
}

/// Keeps the nav highlight, indicator and progress bar in sync with the
/// page.
///
/// Hosts push [`NavEvent`]s through [`EventSink`]s (or [`dispatch`]) and
/// call [`pump`] once per frame; every event is one atomic transition, and
/// both output cells are written before either notifies.
///
/// [`dispatch`]: NavCoordinator::dispatch
/// [`pump`]: NavCoordinator::pump
pub struct NavCoordinator {
    items: NavItems,
    indicator: IndicatorConfig,
    ports: NavPorts,
    observer: SectionObserver,
    queue: EventQueue,
    active: Observable<ActiveState>,
    geometry: Observable<IndicatorGeometry>,
    state: NavSnapshot,
    geometry_stale: bool,
    lifecycle: Lifecycle,
}

impl NavCoordinator {
    /// Creates an unmounted coordinator.
    ///
    /// Initial state: first configured id, 0% progress, hidden indicator.
    pub fn new(config: &NavConfig, ports: NavPorts) -> Self {
        let state = NavSnapshot {
            active_id: config.items.first_id().to_string(),
            scroll_progress: 0.0,
            geometry: IndicatorGeometry::HIDDEN,
        };
        Self {
            items: config.items.clone(),
            indicator: config.indicator.clone(),
            observer: SectionObserver::new(&config.items, config.focus_band.clone()),
            ports,
            queue: EventQueue::new(),
            active: Observable::new(ActiveState {
                active_id: state.active_id.clone(),
                scroll_progress: state.scroll_progress,
            }),
            geometry: Observable::new(state.geometry),
            state,
            geometry_stale: false,
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn items(&self) -> &NavItems {
        &self.items
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn snapshot(&self) -> NavSnapshot {
        self.state.clone()
    }

    /// Read/subscribe handle for the active item and progress.
    pub fn active_state(&self) -> Observable<ActiveState> {
        self.active.clone()
    }

    /// Read/subscribe handle for the indicator geometry.
    pub fn indicator_geometry(&self) -> Observable<IndicatorGeometry> {
        self.geometry.clone()
    }

    /// New sending handle into this coordinator's queue.
    pub fn sink(&self) -> EventSink {
        self.queue.sink()
    }

    /// Registers sections, attaches triggers and paints the first frame.
    ///
    /// Only the first call on a fresh coordinator has any effect.
    pub fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        let sink = self.queue.sink();
        self.observer.register(self.ports.intersections.as_mut(), &sink);
        for trigger in &mut self.ports.triggers {
            trigger.attach(sink.clone());
        }
        self.lifecycle = Lifecycle::Mounted;
        info!(
            "event=nav_mount module=nav status=ok items={} triggers={} animation={}",
            self.items.len(),
            self.ports.triggers.len(),
            self.ports.animation.is_some()
        );

        sink.send(NavEvent::Resize);
        self.pump();
    }

    /// Enqueues one event and drains the queue.
    ///
    /// Returns the number of events applied (0 after teardown).
    pub fn dispatch(&mut self, event: NavEvent) -> usize {
        if !self.queue.sink().send(event) {
            return 0;
        }
        self.pump()
    }

    /// Applies every queued event in arrival order.
    ///
    /// Events enqueued by subscribers while draining are applied in the same
    /// drain. A geometry refresh left pending by an activation or
    /// element-set change runs once the queue is empty.
    pub fn pump(&mut self) -> usize {
        if self.lifecycle == Lifecycle::Disposed {
            return 0;
        }
        let mut applied = 0;
        loop {
            while let Some(event) = self.queue.pop() {
                trace!("event=nav_event module=nav kind={}", event.kind());
                self.apply(event);
                self.publish();
                applied += 1;
            }
            if !self.geometry_stale {
                break;
            }
            self.refresh_geometry();
            self.publish();
        }
        applied
    }

    /// Detaches every host registration at once.
    ///
    /// Closes the event queue first, so a source that fires during or after
    /// teardown cannot reach the state. Returns `false` when already torn
    /// down.
    pub fn teardown(&mut self) -> bool {
        if self.lifecycle == Lifecycle::Disposed {
            return false;
        }
        self.queue.close();
        self.observer.unregister_all(self.ports.intersections.as_mut());
        for trigger in &mut self.ports.triggers {
            trigger.detach();
        }
        if let Some(animation) = self.ports.animation.as_mut() {
            animation.kill_all();
        }
        self.active.clear_subscribers();
        self.geometry.clear_subscribers();
        self.lifecycle = Lifecycle::Disposed;
        info!(
            "event=nav_teardown module=nav status=ok active_id={}",
            self.state.active_id
        );
        true
    }

    fn apply(&mut self, event: NavEvent) {
        match event {
            NavEvent::Observed(batch) => self.on_observed(&batch),
            NavEvent::Scroll | NavEvent::Resize => self.on_tick(),
            NavEvent::ElementsChanged => self.geometry_stale = true,
            NavEvent::NavigateTo(id) => self.on_navigate(id),
        }
    }

    fn on_observed(&mut self, batch: &[SectionObservation]) {
        let Some(next) = select_active(&self.items, batch) else {
            return;
        };
        if next == self.state.active_id {
            return;
        }
        debug!(
            "event=nav_activate module=nav status=ok source=observer from={} to={}",
            self.state.active_id, next
        );
        self.state.active_id = next.to_string();
        self.geometry_stale = true;
    }

    fn on_tick(&mut self) {
        let metrics = self.ports.scroll.as_ref();
        let progress = compute_progress(
            metrics.scroll_top(),
            metrics.scroll_height(),
            metrics.client_height(),
        );
        self.state.scroll_progress = progress;
        self.refresh_geometry();
    }

    fn on_navigate(&mut self, id: String) {
        if !self.items.contains(&id) {
            debug!("event=nav_request module=nav status=ignored reason=unknown_id id={id}");
            return;
        }
        if let Some(target) = self.ports.scroll_target.as_mut() {
            target.scroll_into_view(&id);
        }
        debug!(
            "event=nav_activate module=nav status=ok source=request from={} to={}",
            self.state.active_id, id
        );
        self.state.active_id = id;
        self.refresh_geometry();
    }

    fn refresh_geometry(&mut self) {
        self.geometry_stale = false;
        let previous = self.state.geometry;
        let next = match self.ports.layout.bounding_rect(&ElementHandle::Container) {
            Some(container) if !container.is_zero_sized() => {
                let candidates = self.candidate_rects();
                let computed = compute_geometry(&self.state.active_id, &candidates, &container);
                if computed.visible {
                    computed
                } else {
                    previous.hidden()
                }
            }
            _ => previous.hidden(),
        };
        if next == previous {
            return;
        }
        self.state.geometry = next;
        self.animate_indicator(&next);
    }

    fn candidate_rects(&self) -> BTreeMap<String, Rect> {
        self.items
            .ids()
            .filter_map(|id| {
                self.ports
                    .layout
                    .bounding_rect(&ElementHandle::NavItem(id.to_string()))
                    .map(|rect| (id.to_string(), rect))
            })
            .collect()
    }

    fn animate_indicator(&mut self, geometry: &IndicatorGeometry) {
        let Some(animation) = self.ports.animation.as_mut() else {
            return;
        };
        let properties = if geometry.visible {
            vec![
                TweenProperty::TranslateX(geometry.offset_x),
                TweenProperty::Width(geometry.width),
                TweenProperty::Opacity(1.0),
            ]
        } else {
            vec![TweenProperty::Opacity(0.0)]
        };
        animation.animate_to(
            &AnimationTarget::Indicator,
            &properties,
            self.indicator.duration(),
            self.indicator.easing,
        );
    }

    fn publish(&self) {
        let active_changed = self.active.store(ActiveState {
            active_id: self.state.active_id.clone(),
            scroll_progress: self.state.scroll_progress,
        });
        let geometry_changed = self.geometry.store(self.state.geometry);
        if active_changed {
            self.active.notify();
        }
        if geometry_changed {
            self.geometry.notify();
        }
    }
}

impl Drop for NavCoordinator {
    fn drop(&mut self) {
        self.teardown();
    }
}
