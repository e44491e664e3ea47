//! CLI library components for lendflow.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
