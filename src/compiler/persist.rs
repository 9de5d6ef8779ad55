//! Content-addressed file helpers.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// Number of hash characters embedded in file names.
pub(crate) const HASH_PREFIX_LEN: usize = 12;

/// SHA-1 of `bytes` as lowercase hex, standing in for an MD5 digest.
pub(crate) fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = sha1_smol::Sha1::new();
    hasher.update(bytes);
    hasher.digest().to_string()
}

/// Whether `path` must be (re)written to hold content hashing to `hash`.
pub(crate) fn needs_write(path: &Path, hash: &str) -> bool {
    match fs::read(path) {
        Ok(existing) => content_hash(&existing) != hash,
        Err(_) => true,
    }
}

/// Write `contents` to `path` through a temp file in the same directory.
///
/// Readers see either the old file or the complete new one.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Whether `name` is `{prefix}{12 hex}.css`.
///
/// Matching the full shape keeps `post-1-` from claiming `post-12-...` files.
pub(crate) fn is_scope_file(name: &str, prefix: &str) -> bool {
    let Some(rest) = name.strip_prefix(prefix) else {
        return false;
    };
    let Some(hash) = rest.strip_suffix(".css") else {
        return false;
    };
    hash.len() == HASH_PREFIX_LEN && hash.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Delete every file of the same scope except `keep`. Returns the number
/// of files removed.
pub(crate) fn remove_stale(dir: &Path, prefix: &str, keep: &str) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name == keep || !is_scope_file(name, prefix) {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => {
                tracing::debug!("Removed stale stylesheet {name}");
                removed += 1;
            }
            Err(e) => tracing::debug!("Could not remove {name}: {e}"),
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_hash_is_sha1_hex() {
        assert_eq!(
            content_hash(b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
    }

    #[test]
    fn test_is_scope_file() {
        assert!(is_scope_file("post-1-0123456789ab.css", "post-1-"));
        assert!(!is_scope_file("post-12-0123456789ab.css", "post-1-"));
        assert!(!is_scope_file("post-1-2-0123456789ab.css", "post-1-"));
        assert!(!is_scope_file("post-1-0123456789ab.txt", "post-1-"));
        assert!(!is_scope_file("global-0123456789ab.css", "post-1-"));
    }

    #[test]
    fn test_write_atomic_and_needs_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.css");
        let hash = content_hash(b"a{}");

        assert!(needs_write(&path, &hash));
        write_atomic(&path, b"a{}").unwrap();
        assert!(!needs_write(&path, &hash));
        assert!(needs_write(&path, &content_hash(b"b{}")));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a{}");
    }

    #[test]
    fn test_remove_stale_keeps_current_and_other_scopes() {
        let dir = TempDir::new().unwrap();
        for name in [
            "post-1-aaaaaaaaaaaa.css",
            "post-1-bbbbbbbbbbbb.css",
            "post-12-cccccccccccc.css",
            "global-dddddddddddd.css",
        ] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        let removed = remove_stale(dir.path(), "post-1-", "post-1-bbbbbbbbbbbb.css");
        assert_eq!(removed, 1);
        assert!(!dir.path().join("post-1-aaaaaaaaaaaa.css").exists());
        assert!(dir.path().join("post-1-bbbbbbbbbbbb.css").exists());
        assert!(dir.path().join("post-12-cccccccccccc.css").exists());
        assert!(dir.path().join("global-dddddddddddd.css").exists());
    }
}
