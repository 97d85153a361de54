//! Path-keyed settings store: every entry is a group in one shared file.

use std::path::Path;

use ps_core::store::{ReadGroup, WriteGroup};
use ps_core::MediaSettings;

use crate::store::StoreFile;
use crate::SettingsStorage;

/// Name of the shared store file inside the settings directory.
const STORE_FILE: &str = "playshell_files.ini";

/// Strategy A: key derived from the sanitized file path plus byte size.
///
/// Two distinct files can normalize to the same group name (equal size, or
/// a deleted file losing its size suffix and matching another sanitized
/// path). That collision window is a known weak invariant of this scheme
/// and is kept rather than silently fixed; the content-hash strategy exists
/// for callers that need rename-stable identity.
pub struct PathKeyStore {
    store: StoreFile,
}

impl PathKeyStore {
    /// Open (or create on first save) the shared store under `directory`.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            store: StoreFile::open(directory.as_ref().join(STORE_FILE)),
        }
    }

    /// Derive the group name for a media path: path separators, colons,
    /// dots and spaces become `_`, and the current byte size is appended
    /// when the file exists on disk.
    fn group_name(path: &Path) -> String {
        let mut name: String = path
            .to_string_lossy()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '.' | ' ' => '_',
                other => other,
            })
            .collect();

        if let Ok(meta) = std::fs::metadata(path) {
            name.push('_');
            name.push_str(&meta.len().to_string());
        }

        name
    }
}

impl SettingsStorage for PathKeyStore {
    fn exist_settings_for(&self, path: &Path) -> bool {
        let group = Self::group_name(path);
        self.store.group(&group).get_bool("saved", false)
    }

    fn load_settings_for(&self, path: &Path, record: &mut MediaSettings) {
        let group = Self::group_name(path);
        record.reset();
        record.load(&self.store.group(&group));
    }

    fn save_settings_for(&mut self, path: &Path, record: &MediaSettings) {
        let name = Self::group_name(path);
        {
            let mut group = self.store.group_mut(&name);
            group.set_bool("saved", true);
            record.save(&mut group);
        }
        if let Err(e) = self.store.sync() {
            tracing::warn!(
                "Failed to write settings store {}: {e}",
                self.store.path().display()
            );
        }
    }
}
