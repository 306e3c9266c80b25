//! AWS Lambda adapter for the granule retry step.
//!
//! This crate owns runtime integration details (handler wrapper, environment
//! configuration, and structured logging) around the pure filter in
//! `granule_retry_core`.
//! See `crates/granule_retry_lambda/README.md` for ownership boundaries.

pub mod config;
pub mod handlers;
pub mod logging;
