//! Schema module - Configuration types for the recorder.

mod config;

pub use config::*;
