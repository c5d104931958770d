//! Application state management for Cosmic Voyage
//!
//! This crate holds the reference data a booking flow works against: the
//! fetched locations and transport modes, their load status, and keyed
//! lookups over them.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod reference;

pub use reference::{CacheError, Collection, Keyed, LoadStatus, ReferenceDataCache};
