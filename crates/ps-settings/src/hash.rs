//! Content hashing for location-independent media identity.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of the file's bytes, or `None` when the
/// file cannot be opened or read. A `None` means the file has no derivable
/// settings key and store operations on it become no-ops.
pub fn content_hash(path: &Path) -> Option<String> {
    let mut file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!("Cannot open {} for hashing: {e}", path.display());
            return None;
        }
    };

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        match file.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => hasher.update(&buf[..n]),
            Err(e) => {
                tracing::debug!("Hashing {} failed: {e}", path.display());
                return None;
            }
        }
    }

    Some(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.bin");
        std::fs::write(&path, b"same bytes every time").unwrap();

        let first = content_hash(&path).unwrap();
        let second = content_hash(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn independent_of_name() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.mkv");
        let b = dir.path().join("b.mkv");
        std::fs::write(&a, b"identical content").unwrap();
        std::fs::write(&b, b"identical content").unwrap();

        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn content_change_changes_hash() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.bin");
        std::fs::write(&path, b"take one").unwrap();
        let before = content_hash(&path).unwrap();
        std::fs::write(&path, b"take two").unwrap();
        let after = content_hash(&path).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn missing_file_yields_none() {
        assert_eq!(content_hash(Path::new("/no/such/file.mkv")), None);
    }
}
