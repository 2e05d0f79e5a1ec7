//! Timeclock terminal
//!
//! Loads the terminal key and configuration, runs check-ins through
//! `timeclock-core` and writes the resulting argument line.

pub mod commands;
pub mod config;
pub mod error;
pub mod key;
pub mod sink;

pub use config::{TerminalConfig, CONFIG_ENV};
pub use error::{Result, TerminalError};
pub use key::{generate_key_file, KeySource, KEY_ENV};
pub use sink::{write_atomic, OutputSink};
