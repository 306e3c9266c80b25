//! Granule retry domain primitives.
//!
//! This crate owns the retry event contract and the filter that narrows a
//! payload down to granules referencing a failed package. It intentionally
//! excludes Lambda runtime and logging concerns.
//! See `crates/granule_retry_core/README.md` for ownership boundaries.

pub mod contract;
pub mod filter;
