//! Change-notifying value cells.
//!
//! # Responsibility
//! - Expose coordinator output as readable, subscribable values.
//!
//! # Invariants
//! - Last value wins; intermediate values are never buffered.
//! - Subscribers run synchronously and only when the value changed.
//! - Only the crate can write a cell; consumers get read/subscribe access.

pub mod cell;
