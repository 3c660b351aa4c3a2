//! Application services for the match context.

pub mod command_handlers;
pub mod query_handlers;
pub mod status_sync;
