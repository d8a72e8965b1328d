//! provctl library components.
//!
//! This library exposes internal CLI modules for testing purposes.

pub mod commands;
pub mod config;
pub mod keyfile;
