//! Scripted scenario replay.
//!
//! # Responsibility
//! - Describe a page layout plus a list of user/browser steps as JSON.
//! - Drive a real coordinator through those steps with an in-memory host.
//! - Record every published state change, tagged with the step index.
//! - Track the experience timeline fill when the scenario places that
//!   section.
//!
//! # Invariants
//! - Step 0 is the first paint performed by `mount`.
//! - The coordinator is torn down before records are returned.

use log::debug;
use navsync_core::{
    timeline_progress, ActiveState, ElementHandle, EventSink, FocusBand, IndicatorGeometry,
    IntersectionSource, LayoutSource, NavConfig, NavCoordinator, NavEvent, NavPorts,
    ObservationSink, Rect, ScrollMetrics, ScrollTarget, SectionObservation, TimelineConfig,
    TriggerSource,
};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Recorded page plus the steps to replay.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub viewport: Viewport,
    #[serde(default)]
    pub container: Option<Rect>,
    /// Nav button rects by item id.
    #[serde(default)]
    pub buttons: BTreeMap<String, Rect>,
    /// Experience section rect in document coordinates.
    #[serde(default)]
    pub experience: Option<Rect>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

/// One replayed host event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    Scroll {
        scroll_top: f64,
    },
    Resize {
        #[serde(default)]
        client_height: Option<f64>,
        #[serde(default)]
        scroll_height: Option<f64>,
        #[serde(default)]
        container: Option<Rect>,
    },
    Observe {
        entries: Vec<SectionObservation>,
    },
    Layout {
        #[serde(default)]
        buttons: BTreeMap<String, Rect>,
        #[serde(default)]
        removed: Vec<String>,
    },
    Navigate {
        id: String,
    },
}

/// One published change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayRecord {
    Active { step: usize, state: ActiveState },
    Indicator { step: usize, geometry: IndicatorGeometry },
    ScrollIntoView { step: usize, section_id: String },
    Timeline { step: usize, progress: f64 },
}

/// Replays `scenario` and returns every change in publication order.
pub fn replay(config: &NavConfig, scenario: &Scenario) -> Vec<ReplayRecord> {
    let host = ScriptedHost::new(scenario);
    let mut coordinator = NavCoordinator::new(config, host.ports());

    let records = Rc::clone(&host.records);
    let step = Rc::clone(&host.step);
    coordinator.active_state().subscribe(move |state| {
        records.borrow_mut().push(ReplayRecord::Active {
            step: step.get(),
            state: state.clone(),
        });
    });
    let records = Rc::clone(&host.records);
    let step = Rc::clone(&host.step);
    coordinator.indicator_geometry().subscribe(move |geometry| {
        records.borrow_mut().push(ReplayRecord::Indicator {
            step: step.get(),
            geometry: *geometry,
        });
    });

    let mut timeline = TimelineFill::new(scenario.experience, &config.timeline);
    coordinator.mount();
    timeline.record(&host);
    for (index, scripted) in scenario.steps.iter().enumerate() {
        host.step.set(index + 1);
        host.apply(scripted);
        let applied = coordinator.pump();
        timeline.record(&host);
        debug!(
            "event=replay_step module=cli status=ok step={} applied={applied}",
            index + 1
        );
    }
    coordinator.teardown();

    let records = host.records.borrow().clone();
    records
}

/// Experience timeline fill, recorded only when it moves.
struct TimelineFill<'a> {
    section: Option<Rect>,
    config: &'a TimelineConfig,
    last: Option<f64>,
}

impl<'a> TimelineFill<'a> {
    fn new(section: Option<Rect>, config: &'a TimelineConfig) -> Self {
        Self {
            section,
            config,
            last: None,
        }
    }

    fn record(&mut self, host: &ScriptedHost) {
        let Some(section) = self.section else {
            return;
        };
        let (scroll_top, client_height) = {
            let scene = host.scene.borrow();
            (scene.scroll_top, scene.client_height)
        };
        let on_screen = Rect {
            top: section.top - scroll_top,
            ..section
        };
        let progress = timeline_progress(&on_screen, client_height, self.config);
        if self.last == Some(progress) {
            return;
        }
        self.last = Some(progress);
        host.records.borrow_mut().push(ReplayRecord::Timeline {
            step: host.step.get(),
            progress,
        });
    }
}

struct Scene {
    scroll_top: f64,
    scroll_height: f64,
    client_height: f64,
    rects: BTreeMap<ElementHandle, Rect>,
    observations: Option<ObservationSink>,
    window: Option<EventSink>,
}

#[derive(Clone)]
struct ScriptedHost {
    scene: Rc<RefCell<Scene>>,
    records: Rc<RefCell<Vec<ReplayRecord>>>,
    step: Rc<Cell<usize>>,
}

impl ScriptedHost {
    fn new(scenario: &Scenario) -> Self {
        let mut rects: BTreeMap<ElementHandle, Rect> = scenario
            .buttons
            .iter()
            .map(|(id, rect)| (ElementHandle::NavItem(id.clone()), *rect))
            .collect();
        if let Some(container) = scenario.container {
            rects.insert(ElementHandle::Container, container);
        }
        Self {
            scene: Rc::new(RefCell::new(Scene {
                scroll_top: scenario.viewport.scroll_top,
                scroll_height: scenario.viewport.scroll_height,
                client_height: scenario.viewport.client_height,
                rects,
                observations: None,
                window: None,
            })),
            records: Rc::new(RefCell::new(Vec::new())),
            step: Rc::new(Cell::new(0)),
        }
    }

    fn ports(&self) -> NavPorts {
        NavPorts::new(
            Box::new(self.clone()),
            Box::new(self.clone()),
            Box::new(self.clone()),
        )
        .with_trigger(Box::new(self.clone()))
        .with_scroll_target(Box::new(self.clone()))
    }

    fn apply(&self, step: &Step) {
        let event = {
            let mut scene = self.scene.borrow_mut();
            match step {
                Step::Scroll { scroll_top } => {
                    scene.scroll_top = *scroll_top;
                    Some(NavEvent::Scroll)
                }
                Step::Resize {
                    client_height,
                    scroll_height,
                    container,
                } => {
                    if let Some(value) = client_height {
                        scene.client_height = *value;
                    }
                    if let Some(value) = scroll_height {
                        scene.scroll_height = *value;
                    }
                    if let Some(rect) = container {
                        scene.rects.insert(ElementHandle::Container, *rect);
                    }
                    Some(NavEvent::Resize)
                }
                Step::Observe { .. } => None,
                Step::Layout { buttons, removed } => {
                    for id in removed {
                        scene.rects.remove(&ElementHandle::NavItem(id.clone()));
                    }
                    for (id, rect) in buttons {
                        scene.rects.insert(ElementHandle::NavItem(id.clone()), *rect);
                    }
                    Some(NavEvent::ElementsChanged)
                }
                Step::Navigate { id } => Some(NavEvent::NavigateTo(id.clone())),
            }
        };

        if let Step::Observe { entries } = step {
            let sink = self.scene.borrow().observations.clone();
            if let Some(sink) = sink {
                sink.emit(entries.clone());
            }
            return;
        }
        let window = self.scene.borrow().window.clone();
        if let (Some(window), Some(event)) = (window, event) {
            window.send(event);
        }
    }
}

impl IntersectionSource for ScriptedHost {
    fn register(&mut self, region_id: &str, band: &FocusBand, sink: ObservationSink) {
        debug!(
            "event=replay_register module=cli region={region_id} root_margin={}",
            band.root_margin()
        );
        self.scene.borrow_mut().observations = Some(sink);
    }

    fn unregister(&mut self, region_id: &str) {
        debug!("event=replay_unregister module=cli region={region_id}");
    }
}

impl LayoutSource for ScriptedHost {
    fn bounding_rect(&self, handle: &ElementHandle) -> Option<Rect> {
        self.scene.borrow().rects.get(handle).copied()
    }
}

impl ScrollMetrics for ScriptedHost {
    fn scroll_top(&self) -> f64 {
        self.scene.borrow().scroll_top
    }

    fn scroll_height(&self) -> f64 {
        self.scene.borrow().scroll_height
    }

    fn client_height(&self) -> f64 {
        self.scene.borrow().client_height
    }
}

impl TriggerSource for ScriptedHost {
    fn attach(&mut self, sink: EventSink) {
        self.scene.borrow_mut().window = Some(sink);
    }

    fn detach(&mut self) {
        let mut scene = self.scene.borrow_mut();
        scene.window = None;
        scene.observations = None;
    }
}

impl ScrollTarget for ScriptedHost {
    fn scroll_into_view(&mut self, section_id: &str) {
        self.records.borrow_mut().push(ReplayRecord::ScrollIntoView {
            step: self.step.get(),
            section_id: section_id.to_string(),
        });
    }
}
