//! bithumbctl
//!
//! Command-line front end for the Bithumb public and private REST API.

#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Command};
pub use commands::run;
pub use logging::{log_filter, DEFAULT_LOG_FILTER};
