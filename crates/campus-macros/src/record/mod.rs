//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates `campus_query::Record` implementations and field-name constants
//! from `#[record(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
