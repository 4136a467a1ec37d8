//! Coordinator input events and the single-threaded event queue.

use crate::model::nav::SectionObservation;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// One input to the coordinator transition function.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// One frame's worth of intersection changes.
    Observed(Vec<SectionObservation>),
    /// Document scrolled.
    Scroll,
    /// Viewport or tracked container resized.
    Resize,
    /// Nav buttons were added/removed (responsive re-render).
    ElementsChanged,
    /// Explicit navigation request (nav button click).
    NavigateTo(String),
}

impl NavEvent {
    /// Short stable name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Observed(_) => "observed",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::ElementsChanged => "elements_changed",
            Self::NavigateTo(_) => "navigate_to",
        }
    }
}

/// FIFO shared by all event sources of one coordinator.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    events: Rc<RefCell<VecDeque<NavEvent>>>,
    closed: Rc<Cell<bool>>,
}

impl EventQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sink(&self) -> EventSink {
        EventSink {
            events: Rc::clone(&self.events),
            closed: Rc::clone(&self.closed),
        }
    }

    pub(crate) fn pop(&self) -> Option<NavEvent> {
        self.events.borrow_mut().pop_front()
    }

    /// Closes every sink at once and drops undelivered events.
    pub(crate) fn close(&self) {
        self.closed.set(true);
        self.events.borrow_mut().clear();
    }
}

/// Sending half handed to host event sources.
///
/// Cloning is cheap; all clones feed the same queue and all go inert once
/// the coordinator is torn down.
#[derive(Debug, Clone)]
pub struct EventSink {
    events: Rc<RefCell<VecDeque<NavEvent>>>,
    closed: Rc<Cell<bool>>,
}

impl EventSink {
    /// Enqueues `event`; returns `false` when the coordinator is gone.
    pub fn send(&self, event: NavEvent) -> bool {
        if self.closed.get() {
            return false;
        }
        self.events.borrow_mut().push_back(event);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Number of events waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.events.borrow().len()
    }
}
