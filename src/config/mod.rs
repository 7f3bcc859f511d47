//! Constants and the embedded default configuration

pub mod defaults;
