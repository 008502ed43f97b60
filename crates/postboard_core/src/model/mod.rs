//! Board domain model.
//!
//! # Responsibility
//! - Define geometry primitives and the section/item/board shapes.
//! - Keep the persisted shape free of derived or cached fields.
//!
//! # Invariants
//! - Items belong to exactly one section at a time.
//! - Section ids are dense after every structural change.

pub mod board;
pub mod geometry;
pub mod item;
pub mod section;
