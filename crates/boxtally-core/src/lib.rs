// Library root: re-exports all modules so integration tests and the CLI
// binary can access the crate's public API.

pub mod api;
pub mod config;
pub mod pipeline;
pub mod report;
pub mod stats;
