//! Sportz Core — shared domain abstractions.
//!
//! This crate defines the record types, error taxonomy, clock, and store
//! adapter traits that the match context and its adapters depend on. It
//! contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod records;
pub mod repository;
