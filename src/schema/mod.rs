//! Schema module - Configuration and snapshot types for cube animations.

mod config;
mod snapshot;

pub use config::*;
pub use snapshot::*;
