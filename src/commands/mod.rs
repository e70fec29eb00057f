//! Subcommand implementations

pub mod browse;
pub mod select;
pub mod status;
