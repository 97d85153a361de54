//! Minimal grouped key/value contract for settings persistence.
//!
//! A backing store is a set of named groups holding primitive values. The
//! settings record is written against these two narrow traits so it never
//! learns where or how the values are stored; the concrete file format lives
//! in ps-settings.

/// Read access to one named group of a backing store.
///
/// Getters return the supplied default when the key is absent or holds a
/// value of the wrong type, so a partially written group degrades to the
/// record's own defaults instead of failing.
pub trait ReadGroup {
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_i64(&self, key: &str, default: i64) -> i64;
    fn get_f64(&self, key: &str, default: f64) -> f64;
    fn get_str(&self, key: &str, default: &str) -> String;
}

/// Write access to one named group of a backing store.
pub trait WriteGroup {
    fn set_bool(&mut self, key: &str, value: bool);
    fn set_i64(&mut self, key: &str, value: i64);
    fn set_f64(&mut self, key: &str, value: f64);
    fn set_str(&mut self, key: &str, value: &str);
}
