#![allow(dead_code)]

use navsync_core::{
    AnimationPort, AnimationTarget, Easing, ElementHandle, EventSink, FocusBand,
    IntersectionSource, LayoutSource, NavEvent, NavPorts, ObservationSink, Rect, ScrollMetrics,
    ScrollTarget, SectionObservation, TriggerSource, TweenProperty,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

pub const SCROLL_TRIGGER: &str = "scroll";
pub const RESIZE_TRIGGER: &str = "resize";

#[derive(Debug, Clone, PartialEq)]
pub struct AnimationCall {
    pub target: AnimationTarget,
    pub properties: Vec<TweenProperty>,
    pub duration: Duration,
    pub easing: Easing,
}

#[derive(Default)]
pub struct HostState {
    pub registrations: BTreeMap<String, (FocusBand, ObservationSink)>,
    pub unregistered: Vec<String>,
    pub rects: BTreeMap<ElementHandle, Rect>,
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
    pub triggers: BTreeMap<&'static str, EventSink>,
    pub detached: Vec<&'static str>,
    pub scrolled_into_view: Vec<String>,
    pub animations: Vec<AnimationCall>,
    pub kill_all_calls: usize,
}

/// Scriptable in-memory host shared by every fake port.
#[derive(Clone, Default)]
pub struct FakeHost {
    pub state: Rc<RefCell<HostState>>,
}

impl FakeHost {
    pub fn new() -> Self {
        let host = Self::default();
        host.set_scroll(0.0, 3000.0, 1000.0);
        host
    }

    /// Container at x=100 and one 80px button per id, 10px apart.
    pub fn with_buttons(ids: &[&str]) -> Self {
        let host = Self::new();
        host.set_rect(ElementHandle::Container, Rect::new(100.0, 0.0, 800.0, 56.0));
        for (index, id) in ids.iter().enumerate() {
            host.set_rect(
                ElementHandle::NavItem(id.to_string()),
                Rect::new(110.0 + index as f64 * 90.0, 12.0, 80.0, 32.0),
            );
        }
        host
    }

    pub fn ports(&self) -> NavPorts {
        NavPorts::new(
            Box::new(FakeIntersections(self.clone())),
            Box::new(FakeLayout(self.clone())),
            Box::new(FakeScroll(self.clone())),
        )
        .with_trigger(Box::new(FakeTrigger {
            host: self.clone(),
            name: SCROLL_TRIGGER,
        }))
        .with_trigger(Box::new(FakeTrigger {
            host: self.clone(),
            name: RESIZE_TRIGGER,
        }))
        .with_scroll_target(Box::new(FakeScrollTarget(self.clone())))
        .with_animation(Box::new(FakeAnimation(self.clone())))
    }

    pub fn set_rect(&self, handle: ElementHandle, rect: Rect) {
        self.state.borrow_mut().rects.insert(handle, rect);
    }

    pub fn remove_rect(&self, handle: &ElementHandle) {
        self.state.borrow_mut().rects.remove(handle);
    }

    pub fn set_scroll(&self, top: f64, height: f64, client: f64) {
        let mut state = self.state.borrow_mut();
        state.scroll_top = top;
        state.scroll_height = height;
        state.client_height = client;
    }

    /// Emits one batch through the sink registered for the first entry.
    pub fn emit(&self, batch: Vec<SectionObservation>) -> usize {
        let sink = {
            let state = self.state.borrow();
            state.registrations.values().next().map(|(_, sink)| sink.clone())
        };
        match sink {
            Some(sink) => sink.emit(batch),
            None => 0,
        }
    }

    /// Sends `event` through an attached trigger.
    pub fn fire(&self, trigger: &str, event: NavEvent) -> bool {
        let sink = self.state.borrow().triggers.get(trigger).cloned();
        sink.map(|sink| sink.send(event)).unwrap_or(false)
    }

    pub fn animations(&self) -> Vec<AnimationCall> {
        self.state.borrow().animations.clone()
    }
}

struct FakeIntersections(FakeHost);

impl IntersectionSource for FakeIntersections {
    fn register(&mut self, region_id: &str, band: &FocusBand, sink: ObservationSink) {
        self.0
            .state
            .borrow_mut()
            .registrations
            .insert(region_id.to_string(), (band.clone(), sink));
    }

    fn unregister(&mut self, region_id: &str) {
        let mut state = self.0.state.borrow_mut();
        state.registrations.remove(region_id);
        state.unregistered.push(region_id.to_string());
    }
}

struct FakeLayout(FakeHost);

impl LayoutSource for FakeLayout {
    fn bounding_rect(&self, handle: &ElementHandle) -> Option<Rect> {
        self.0.state.borrow().rects.get(handle).copied()
    }
}

struct FakeScroll(FakeHost);

impl ScrollMetrics for FakeScroll {
    fn scroll_top(&self) -> f64 {
        self.0.state.borrow().scroll_top
    }

    fn scroll_height(&self) -> f64 {
        self.0.state.borrow().scroll_height
    }

    fn client_height(&self) -> f64 {
        self.0.state.borrow().client_height
    }
}

struct FakeTrigger {
    host: FakeHost,
    name: &'static str,
}

impl TriggerSource for FakeTrigger {
    fn attach(&mut self, sink: EventSink) {
        self.host.state.borrow_mut().triggers.insert(self.name, sink);
    }

    fn detach(&mut self) {
        let mut state = self.host.state.borrow_mut();
        if state.triggers.remove(self.name).is_some() {
            state.detached.push(self.name);
        }
    }
}

struct FakeScrollTarget(FakeHost);

impl ScrollTarget for FakeScrollTarget {
    fn scroll_into_view(&mut self, section_id: &str) {
        self.0
            .state
            .borrow_mut()
            .scrolled_into_view
            .push(section_id.to_string());
    }
}

struct FakeAnimation(FakeHost);

impl AnimationPort for FakeAnimation {
    fn animate_to(
        &mut self,
        target: &AnimationTarget,
        properties: &[TweenProperty],
        duration: Duration,
        easing: Easing,
    ) {
        self.0.state.borrow_mut().animations.push(AnimationCall {
            target: target.clone(),
            properties: properties.to_vec(),
            duration,
            easing,
        });
    }

    fn kill_all(&mut self) {
        self.0.state.borrow_mut().kill_all_calls += 1;
    }
}
