//! Subcommands.

pub mod submission;
