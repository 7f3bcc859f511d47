//! Infrastructure layer
//!
//! Handles all I/O operations: filesystem, directories, and external processes
//! (`git`, `mvn`, `jboss-cli.sh`). This module is the only place where side
//! effects occur.

pub mod deploy;
pub mod dirs;
pub mod filesystem;
pub mod git;
pub mod maven;
pub mod process;
