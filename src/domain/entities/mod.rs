//! Core domain entities.
//!
//! The registry is a flat keyed collection of [`Link`] records; [`NewLink`]
//! carries the fields supplied at creation time.

pub mod link;

pub use link::{Link, NewLink};
