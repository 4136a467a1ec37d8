//! Content-list cleanup and presentation state.
//!
//! # Responsibility
//! - Normalize free-text bullet lists once, at load time.
//! - Track expand/collapse state for the experience timeline.
//!
//! # Invariants
//! - Normalization is pure, order-preserving and idempotent.
//! - Loaded content records are immutable afterwards.

pub mod bullets;
pub mod experience;
