//! Hyrox CLI library.
//!
//! This crate provides the `hx` command-line interface: result parsing,
//! prompt building and plan generation.

mod cli;
pub mod commands;
mod config;
pub mod fetch;

pub use cli::{Cli, Commands};
pub use config::Config;
