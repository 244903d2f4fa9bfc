use crate::{consts::CACHE_DIR_NAME, error::Result, identity::CacheKey};
use std::{
	env, fs,
	path::{Path, PathBuf},
};

/// On-disk thumbnail cache.
///
/// Entries live at `<root>/<cache key>`; the key already encodes the source
/// file's modification time, so existence of the entry file is the whole
/// validity check. Stale entries for old modification times are never evicted
/// here.
#[derive(Debug, Clone)]
pub struct ThumbnailCache {
	root: PathBuf,
}

impl Default for ThumbnailCache {
	fn default() -> Self {
		Self::new()
	}
}

impl ThumbnailCache {
	/// Cache rooted under the system temp directory.
	#[must_use]
	pub fn new() -> Self {
		Self {
			root: env::temp_dir().join(CACHE_DIR_NAME),
		}
	}

	/// Cache rooted at an explicit directory. Mainly for tests.
	#[must_use]
	pub fn with_root(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Returns the entry path when a cached thumbnail exists for `key`.
	///
	/// Any filesystem trouble is reported as a miss: a broken cache only
	/// costs a regeneration, never a failure.
	#[must_use]
	pub fn lookup(&self, key: &CacheKey) -> Option<PathBuf> {
		let entry = self.root.join(key.as_str());
		entry.is_file().then_some(entry)
	}

	/// The destination a new entry for `key` must be written to.
	///
	/// Ensures the cache directory exists; creation is idempotent.
	pub fn slot(&self, key: &CacheKey) -> Result<PathBuf> {
		fs::create_dir_all(&self.root)?;
		Ok(self.root.join(key.as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::identity::derive_key;

	#[test]
	fn lookup_misses_on_empty_cache() {
		let dir = tempfile::tempdir().unwrap();
		let cache = ThumbnailCache::with_root(dir.path());
		let key = derive_key("a.wiretuner", 1, 64);

		assert!(cache.lookup(&key).is_none());
	}

	#[test]
	fn lookup_misses_when_root_is_absent() {
		let dir = tempfile::tempdir().unwrap();
		let cache = ThumbnailCache::with_root(dir.path().join("never/created"));
		let key = derive_key("a.wiretuner", 1, 64);

		assert!(cache.lookup(&key).is_none());
	}

	#[test]
	fn slot_creates_the_cache_directory() {
		let dir = tempfile::tempdir().unwrap();
		let root = dir.path().join("nested").join("thumbs");
		let cache = ThumbnailCache::with_root(&root);
		let key = derive_key("a.wiretuner", 1, 64);

		let slot = cache.slot(&key).unwrap();
		assert!(root.is_dir());
		assert_eq!(slot, root.join(key.as_str()));

		// Idempotent on an existing directory.
		assert!(cache.slot(&key).is_ok());
	}

	#[test]
	fn lookup_hits_after_an_entry_is_written() {
		let dir = tempfile::tempdir().unwrap();
		let cache = ThumbnailCache::with_root(dir.path());
		let key = derive_key("a.wiretuner", 1, 64);

		let slot = cache.slot(&key).unwrap();
		std::fs::write(&slot, b"png bytes").unwrap();

		assert_eq!(cache.lookup(&key), Some(slot));
	}

	#[test]
	fn entries_for_different_keys_do_not_collide() {
		let dir = tempfile::tempdir().unwrap();
		let cache = ThumbnailCache::with_root(dir.path());
		let one = derive_key("a.wiretuner", 1, 64);
		let two = derive_key("a.wiretuner", 2, 64);

		std::fs::write(cache.slot(&one).unwrap(), b"png bytes").unwrap();

		assert!(cache.lookup(&one).is_some());
		assert!(cache.lookup(&two).is_none());
	}
}
