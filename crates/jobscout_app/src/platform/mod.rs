//! Terminal front-end: flags, config file, stdin intents and terminal surfaces.
mod app;
mod cli;
mod config;
mod input;
mod ui;

pub use app::run_app;
