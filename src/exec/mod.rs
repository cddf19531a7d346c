// src/exec/mod.rs

//! Command dispatch layer.
//!
//! This module turns a matched line into a finished external process:
//!
//! - [`template`] parses the `%s` command template and renders it, either as
//!   one shell string or as an argument vector.
//! - [`command`] builds the `tokio::process::Command` for a dispatch mode and
//!   runs it to completion.
//! - [`backend`] provides the `Dispatcher` trait the watch loop talks to and
//!   the production `ShellDispatcher`; tests substitute a recording fake.

pub mod backend;
pub mod command;
pub mod template;

pub use backend::{DispatchOutcome, Dispatcher, ShellDispatcher};
pub use template::CommandTemplate;
