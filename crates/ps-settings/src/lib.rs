//! Per-media-file settings persistence.
//!
//! A media file's identity maps to a settings record through one of two
//! key-derivation strategies: [`PathKeyStore`] keys entries by sanitized
//! path plus byte size inside one shared file, [`ContentHashStore`] keys
//! them by a content hash with one file per entry, sharded by the first
//! hash character. Both degrade silently to record defaults on any store
//! failure: losing saved playback preferences must never block playback.

mod hash;
mod hash_store;
mod path_store;
mod store;

pub use hash::content_hash;
pub use hash_store::ContentHashStore;
pub use path_store::PathKeyStore;
pub use store::{GroupMut, GroupView, StoreFile};

use std::path::Path;

use ps_core::{MediaSettings, SettingsMethod};

/// Existence, load and save of one media file's settings record.
pub trait SettingsStorage {
    /// True iff a prior save exists for the identity this path derives to.
    fn exist_settings_for(&self, path: &Path) -> bool;

    /// Reset `record` to defaults, then overlay persisted values if a
    /// matching entry exists. A corrupt or partial entry is never applied
    /// partially: missing keys keep the record's own defaults.
    fn load_settings_for(&self, path: &Path, record: &mut MediaSettings);

    /// Persist every field the record serializes. Failures are logged and
    /// swallowed; callers must not assume a save occurred when the source
    /// file was unreadable.
    fn save_settings_for(&mut self, path: &Path, record: &MediaSettings);
}

/// Build the store selected by `method`, rooted at `directory`.
pub fn open_store(method: SettingsMethod, directory: &Path) -> Box<dyn SettingsStorage> {
    match method {
        SettingsMethod::Path => Box::new(PathKeyStore::new(directory)),
        SettingsMethod::Hash => Box::new(ContentHashStore::new(directory)),
    }
}
