// Command-line interface

pub mod args;

pub use args::{COMPLETION_SHELLS, Cli};
