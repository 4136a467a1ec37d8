//! Pure layout math for the navigation surface.
//!
//! # Responsibility
//! - Derive indicator geometry from element rectangles.
//! - Derive page and section scroll progress percentages.
//!
//! # Invariants
//! - Functions here are pure and never fail; degenerate input maps to a
//!   defined default.

pub mod indicator;
pub mod progress;
