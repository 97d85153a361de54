//! INI-style grouped key/value file backing the settings stores.
//!
//! A [`StoreFile`] is a flat text file of `[group]` sections holding
//! primitive values, kept in memory as a `toml_edit` document so existing
//! structure survives a read-modify-write cycle. Opening is lenient: a
//! missing or unparsable file starts empty rather than failing, since the
//! stores must degrade to defaults instead of blocking playback.

use std::path::{Path, PathBuf};

use toml_edit::{value, DocumentMut, Item, Table};

use ps_core::store::{ReadGroup, WriteGroup};

/// A grouped key/value file: `[group]` sections with bool/int/float/string
/// values.
#[derive(Debug)]
pub struct StoreFile {
    path: PathBuf,
    doc: DocumentMut,
}

impl StoreFile {
    /// Open the store at `path`, tolerating a missing or corrupt file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match std::fs::read_to_string(&path) {
            Ok(text) => text.parse::<DocumentMut>().unwrap_or_else(|e| {
                tracing::warn!(
                    "Corrupt settings store {}: {e}; starting empty",
                    path.display()
                );
                DocumentMut::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DocumentMut::new(),
            Err(e) => {
                tracing::warn!(
                    "Cannot read settings store {}: {e}; starting empty",
                    path.display()
                );
                DocumentMut::new()
            }
        };
        Self { path, doc }
    }

    /// The file this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if a `[name]` group exists in the document.
    pub fn has_group(&self, name: &str) -> bool {
        self.doc.get(name).is_some_and(Item::is_table)
    }

    /// Read-only view of a group; an absent group reads as empty.
    pub fn group(&self, name: &str) -> GroupView<'_> {
        GroupView {
            table: self.doc.get(name).and_then(Item::as_table),
        }
    }

    /// Writable view of a group, created on first use.
    pub fn group_mut(&mut self, name: &str) -> GroupMut<'_> {
        let item = self
            .doc
            .entry(name)
            .or_insert_with(|| Item::Table(Table::new()));
        // A scalar squatting on the group name is replaced outright.
        if item.as_table().is_none() {
            *item = Item::Table(Table::new());
        }
        GroupMut { item }
    }

    /// Write the document back to disk.
    pub fn sync(&self) -> std::io::Result<()> {
        std::fs::write(&self.path, self.doc.to_string())
    }
}

// ---------------------------------------------------------------------------
// Group views
// ---------------------------------------------------------------------------

/// Read-only view of one `[group]`.
#[derive(Debug, Clone, Copy)]
pub struct GroupView<'a> {
    table: Option<&'a Table>,
}

impl GroupView<'_> {
    fn get(&self, key: &str) -> Option<&Item> {
        self.table.and_then(|t| t.get(key))
    }
}

impl ReadGroup for GroupView<'_> {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Item::as_bool).unwrap_or(default)
    }

    fn get_i64(&self, key: &str, default: i64) -> i64 {
        self.get(key).and_then(Item::as_integer).unwrap_or(default)
    }

    fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            Some(item) => item
                .as_float()
                .or_else(|| item.as_integer().map(|i| i as f64))
                .unwrap_or(default),
            None => default,
        }
    }

    fn get_str(&self, key: &str, default: &str) -> String {
        self.get(key)
            .and_then(Item::as_str)
            .unwrap_or(default)
            .to_string()
    }
}

/// Writable view of one `[group]`.
#[derive(Debug)]
pub struct GroupMut<'a> {
    // Normalized to a table by `StoreFile::group_mut`.
    item: &'a mut Item,
}

impl GroupMut<'_> {
    fn set(&mut self, key: &str, val: Item) {
        if let Some(table) = self.item.as_table_mut() {
            table.insert(key, val);
        }
    }
}

impl WriteGroup for GroupMut<'_> {
    fn set_bool(&mut self, key: &str, v: bool) {
        self.set(key, value(v));
    }

    fn set_i64(&mut self, key: &str, v: i64) {
        self.set(key, value(v));
    }

    fn set_f64(&mut self, key: &str, v: f64) {
        self.set(key, value(v));
    }

    fn set_str(&mut self, key: &str, v: &str) {
        self.set(key, value(v));
    }
}
