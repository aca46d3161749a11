//! CLI subcommand implementations.

pub mod generate;
pub mod parse;
pub mod prompt;
pub mod test_model;
pub mod util;
