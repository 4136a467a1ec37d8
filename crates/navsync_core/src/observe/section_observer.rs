//! Focus-band section observer and activation policy.

use crate::config::FocusBand;
use crate::model::nav::{NavItems, SectionObservation};
use crate::nav::event::EventSink;
use crate::observe::ObservationSink;
use crate::port::IntersectionSource;
use log::debug;
use std::cell::Cell;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::rc::Rc;

/// Picks the section that should become active from one batch.
///
/// Only intersecting entries for configured ids compete. An entry whose top
/// edge sits at or above the focus band's top boundary beats any entry below
/// it; among entries on the same side, the one nearest the boundary wins.
/// Exact ties go to the earlier item in `items`. Returns `None` when nothing
/// in the batch qualifies, which leaves the active id unchanged.
pub fn select_active<'a>(items: &NavItems, batch: &'a [SectionObservation]) -> Option<&'a str> {
    batch
        .iter()
        .filter(|entry| entry.intersecting && entry.top_offset.is_finite())
        .filter_map(|entry| items.position(&entry.id).map(|rank| (entry, rank)))
        .min_by(|(a, a_rank), (b, b_rank)| activation_order(a, *a_rank, b, *b_rank))
        .map(|(entry, _)| entry.id.as_str())
}

fn activation_order(
    a: &SectionObservation,
    a_rank: usize,
    b: &SectionObservation,
    b_rank: usize,
) -> Ordering {
    let a_below = a.top_offset > 0.0;
    let b_below = b.top_offset > 0.0;
    a_below
        .cmp(&b_below)
        .then_with(|| a.top_offset.abs().total_cmp(&b.top_offset.abs()))
        .then_with(|| a_rank.cmp(&b_rank))
}

/// Registers every configured section with the host intersection source.
#[derive(Debug)]
pub struct SectionObserver {
    regions: Rc<BTreeSet<String>>,
    order: Vec<String>,
    band: FocusBand,
    open: Rc<Cell<bool>>,
    registered: bool,
}

impl SectionObserver {
    pub fn new(items: &NavItems, band: FocusBand) -> Self {
        let order: Vec<String> = items.ids().map(str::to_string).collect();
        Self {
            regions: Rc::new(order.iter().cloned().collect()),
            order,
            band,
            open: Rc::new(Cell::new(false)),
            registered: false,
        }
    }

    pub fn band(&self) -> &FocusBand {
        &self.band
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Registers all regions; a second call is a no-op.
    pub fn register(&mut self, source: &mut dyn IntersectionSource, events: &EventSink) {
        if self.registered {
            return;
        }
        self.open.set(true);
        let sink = ObservationSink::new(
            Rc::clone(&self.regions),
            Rc::clone(&self.open),
            events.clone(),
        );
        for region in &self.order {
            source.register(region, &self.band, sink.clone());
        }
        self.registered = true;
        debug!(
            "event=sections_registered module=observe status=ok regions={} root_margin={}",
            self.order.len(),
            self.band.root_margin()
        );
    }

    /// Silences every region, then unregisters them; idempotent.
    pub fn unregister_all(&mut self, source: &mut dyn IntersectionSource) {
        self.open.set(false);
        if !self.registered {
            return;
        }
        for region in &self.order {
            source.unregister(region);
        }
        self.registered = false;
        debug!(
            "event=sections_unregistered module=observe status=ok regions={}",
            self.order.len()
        );
    }
}
