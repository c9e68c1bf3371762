//! CLI module graph.

pub mod command;
pub mod diagnostic;
pub mod output;
pub mod paths;
pub mod run;
