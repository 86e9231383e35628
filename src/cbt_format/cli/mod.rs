//! # CLI Layer
//!
//! The binary is a thin client over the library. This layer is the only
//! place that:
//! - parses arguments (`setup.rs`)
//! - reads row dumps and raw values from files or flags (`input.rs`)
//! - installs the tracing subscriber and writes to stdout (`commands.rs`)
//!
//! Errors bubble up to `main`, which prints them and exits with status 1.

mod commands;
mod input;
mod setup;

pub use commands::run;
