//! Section focus tracking.
//!
//! # Responsibility
//! - Register page sections with the host intersection source.
//! - Filter host reports down to registered regions.
//! - Decide which intersecting section is "in focus".
//!
//! # Invariants
//! - Observations for unregistered ids are never forwarded.
//! - After teardown no sink forwards anything, for any region.

pub mod section_observer;

pub use section_observer::{select_active, SectionObserver};

use crate::model::nav::SectionObservation;
use crate::nav::event::{EventSink, NavEvent};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Sink handed to [`IntersectionSource`](crate::port::IntersectionSource)
/// registrations.
///
/// All regions of one observer share the same gate, so closing it silences
/// every region in one step.
#[derive(Debug, Clone)]
pub struct ObservationSink {
    registered: Rc<BTreeSet<String>>,
    open: Rc<Cell<bool>>,
    events: EventSink,
}

impl ObservationSink {
    pub(crate) fn new(
        registered: Rc<BTreeSet<String>>,
        open: Rc<Cell<bool>>,
        events: EventSink,
    ) -> Self {
        Self {
            registered,
            open,
            events,
        }
    }

    /// Forwards one frame's batch.
    ///
    /// Entries for unknown regions are dropped. Returns the number of
    /// entries forwarded (0 when closed or nothing survived filtering).
    pub fn emit(&self, batch: Vec<SectionObservation>) -> usize {
        if !self.is_open() {
            return 0;
        }
        let batch: Vec<SectionObservation> = batch
            .into_iter()
            .filter(|entry| self.registered.contains(entry.id.as_str()))
            .collect();
        if batch.is_empty() {
            return 0;
        }
        let forwarded = batch.len();
        if self.events.send(NavEvent::Observed(batch)) {
            forwarded
        } else {
            0
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.get() && !self.events.is_closed()
    }
}
