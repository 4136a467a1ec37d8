//! Navigation coordinator.
//!
//! # Responsibility
//! - Own the active id, scroll progress and indicator geometry.
//! - Turn host events into state transitions, one event at a time.
//! - Pair every host registration with a single idempotent teardown.
//!
//! # Invariants
//! - The coordinator is the only writer of its output cells.
//! - Events are applied in arrival order; none is applied after teardown.
//! - Output cells only notify when a value actually changed.

pub mod coordinator;
pub mod event;

pub use coordinator::{Lifecycle, NavCoordinator, NavPorts, NavSnapshot};
pub use event::{EventSink, NavEvent};
