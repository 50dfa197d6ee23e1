//! Scheduled Lambda entry point for the emBlue sync trigger.

pub mod handler;
pub mod response;

pub use handler::{handle, WorkerContext};
pub use response::TriggerResponse;
