//! Core business logic module
//!
//! Planning and classification for jmw. Side effects (copying files,
//! running `mvn` and `jboss-cli.sh`) belong in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`config`] - YAML configuration loading and validation
//! - [`session`] - Configuration plus working directory for one invocation
//! - [`detector`] - Project and Maven module detection
//! - [`plan`] - Local deployment planning
//! - [`restart`] - Restart requirement classification
//! - [`changes`] - Changed file parsing for restart classification
//! - [`remote`] - Remote deployment guide
//! - [`build`] - Maven build planning

pub mod build;
pub mod changes;
pub mod config;
pub mod detector;
pub mod plan;
pub mod remote;
pub mod restart;
pub mod session;
