//! Shared building blocks for the emBlue sync trigger.
//!
//! This crate has zero internal deps so it can be used by the repository
//! layer, the dispatcher and the Lambda worker alike.

pub mod config;
pub mod crypto;
pub mod dates;
pub mod error;
pub mod types;
