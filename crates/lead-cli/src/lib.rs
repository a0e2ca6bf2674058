//! lead-insight command-line components.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod shell;
