//! Pure domain logic for the match context.

pub mod status;
pub mod timestamp;
pub mod validation;
