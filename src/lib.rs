//! commit-tally crate
//!
//! This crate is an implementation detail of the `commit-tally` tool. This crate's API is fluid and may change without warning
//! and in a semver-incompatible way.

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod collector;

#[doc(hidden)]
pub mod config;

#[doc(hidden)]
pub mod github;

#[doc(hidden)]
pub mod progress;

#[doc(hidden)]
pub mod reports;

#[doc(hidden)]
pub mod tally;
