//! Layout and placement algorithms.
//!
//! # Responsibility
//! - Compute section partitions for a canvas.
//! - Find non-overlapping item origins inside a section.
//! - Map item origins between old and new section geometry.
//!
//! # Invariants
//! - Everything here is a pure function of its arguments.

pub mod placement;
pub mod reposition;
pub mod sections;
