//! Shared task model and wire format for `TaskPilot`.

pub mod api;
pub mod codec;
pub mod priority;
pub mod strategy;
pub mod task;
