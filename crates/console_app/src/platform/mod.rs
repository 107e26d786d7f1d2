//! Terminal platform layer around the pure console core.
mod app;
pub mod config;
mod effects;
mod logging;
mod terminal;
mod ui;

pub use app::run_app;
