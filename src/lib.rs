//! jmw - Maven build and WildFly deployment helper
//!
//! This library provides the functionality behind the `jmw` command: project
//! detection, local WildFly deployment, restart classification, and remote
//! deployment guides.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Business logic (no side effects beyond reading config and poms)
//! - [`infra`] - Infrastructure layer (filesystem, processes)
//! - [`config`] - Constants and the embedded default configuration
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;
