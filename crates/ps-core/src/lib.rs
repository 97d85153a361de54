//! ps-core: shared types for the playshell crates.
//!
//! This crate is the foundational dependency for the other ps-* crates,
//! providing the unified error type, application configuration, the per-file
//! playback settings record, and the grouped key/value store contract the
//! record is serialized against.

pub mod config;
pub mod error;
pub mod mediasettings;
pub mod store;

// Re-export the most commonly used items at the crate root.
pub use config::{Config, SettingsMethod};
pub use error::{Error, Result};
pub use mediasettings::{AspectRatio, MediaSettings, TRACK_DEFAULT};
pub use store::{ReadGroup, WriteGroup};
