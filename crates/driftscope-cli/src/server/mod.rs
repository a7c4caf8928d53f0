//! HTTP service exposing drift checks and alerts.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
