// Application layer: turns parsed CLI commands into engine calls and renders the results.

pub mod commands;
pub mod report;
