//! Navigation domain model.
//!
//! # Responsibility
//! - Define the records exchanged between host event sources, the
//!   coordinator and the presentation layer.
//! - Keep layout geometry in one plain coordinate-space shape.
//!
//! # Invariants
//! - Every navigation target is identified by a stable, unique id.
//! - Derived records (`IndicatorGeometry`) are never authoritative.

pub mod geometry;
pub mod nav;
