//! Command-line interface: argument parsing, report rendering, progress display

pub mod args;
pub mod output;
pub mod spinner;
