//! Rig module - bone hierarchy and live-pose access.

mod pose;
mod tree;

pub use pose::*;
pub use tree::*;
