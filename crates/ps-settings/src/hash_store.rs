//! Content-hash settings store: one file per entry, sharded by hash prefix.

use std::path::{Path, PathBuf};

use ps_core::store::WriteGroup;
use ps_core::MediaSettings;

use crate::hash::content_hash;
use crate::store::StoreFile;
use crate::SettingsStorage;

/// Group holding the record inside each entry file.
const GROUP: &str = "file_settings";

/// Subdirectory of the settings directory holding all entries.
const SUBDIR: &str = "file_settings";

/// Strategy B: key derived from the file's content hash.
///
/// The key survives renames and moves and changes when the content does.
/// Each entry lives in its own file at
/// `<dir>/file_settings/<first-hash-char>/<hash>.ini`, so one directory
/// never collects more entries than the files sharing that first hex
/// character, and a single write can never corrupt another entry.
pub struct ContentHashStore {
    base_dir: PathBuf,
}

impl ContentHashStore {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            base_dir: directory.as_ref().join(SUBDIR),
        }
    }

    /// Entry file and shard directory name for a media path, or `None`
    /// when the file's content cannot be hashed.
    fn entry_file(&self, path: &Path) -> Option<(PathBuf, String)> {
        let hash = content_hash(path)?;
        let shard = hash[..1].to_string();
        let file = self.base_dir.join(&shard).join(format!("{hash}.ini"));
        Some((file, shard))
    }
}

impl SettingsStorage for ContentHashStore {
    fn exist_settings_for(&self, path: &Path) -> bool {
        self.entry_file(path).is_some_and(|(file, _)| file.exists())
    }

    fn load_settings_for(&self, path: &Path, record: &mut MediaSettings) {
        record.reset();

        let Some((file, _)) = self.entry_file(path) else {
            return;
        };
        if !file.exists() {
            return;
        }

        let store = StoreFile::open(file);
        record.load(&store.group(GROUP));
    }

    fn save_settings_for(&mut self, path: &Path, record: &MediaSettings) {
        let Some((file, shard)) = self.entry_file(path) else {
            return;
        };

        let shard_dir = self.base_dir.join(&shard);
        if let Err(e) = std::fs::create_dir_all(&shard_dir) {
            tracing::warn!(
                "Cannot create shard directory {}: {e}; settings not saved",
                shard_dir.display()
            );
            return;
        }

        let mut store = StoreFile::open(file);
        {
            let mut group = store.group_mut(GROUP);
            group.set_bool("saved", true);
            record.save(&mut group);
        }
        if let Err(e) = store.sync() {
            tracing::warn!("Failed to write {}: {e}", store.path().display());
        }
    }
}
