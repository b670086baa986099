//! `TaskPilot` — terminal client for scoring and prioritising tasks.

pub mod app;
pub mod config;
pub mod editor;
pub mod form;
pub mod net;
pub mod render;
pub mod scoring;
pub mod sort;
pub mod store;
pub mod ui;
