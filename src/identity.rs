use crate::error::{Error, Result};
use std::{
	fmt, fs,
	path::{Path, PathBuf},
	time::UNIX_EPOCH,
};

/// Identity of one thumbnail request: the source file plus the requested
/// pixel size.
///
/// Derived fresh on every request and never persisted. Two identities are
/// equivalent iff path, modification time and size all match exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIdentity {
	path: PathBuf,
	modified_secs: u64,
	size: u32,
}

impl FileIdentity {
	/// Reads the source file's metadata.
	///
	/// This is the only fallible step of key derivation; a missing or
	/// unreadable file maps to [`Error::Identity`].
	pub fn of(path: impl AsRef<Path>, size: u32) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let modified = fs::metadata(&path)
			.and_then(|m| m.modified())
			.map_err(Error::Identity)?;

		// Pre-epoch modification times clamp to zero.
		let modified_secs = modified
			.duration_since(UNIX_EPOCH)
			.map_or(0, |d| d.as_secs());

		Ok(Self {
			path,
			modified_secs,
			size,
		})
	}

	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	#[must_use]
	pub const fn size(&self) -> u32 {
		self.size
	}

	/// The cache identity this request resolves to.
	#[must_use]
	pub fn cache_key(&self) -> CacheKey {
		let base = self
			.path
			.file_name()
			.map_or_else(|| "unnamed".to_string(), |n| n.to_string_lossy().into_owned());

		derive_key(&base, self.modified_secs, self.size)
	}
}

/// Deterministic cache identity for one (file, size) pair.
///
/// Doubles as the file name of the cache entry, so it must stay
/// filesystem-safe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Pure key recipe: `<base name>-<mtime seconds>-<size>.png`.
///
/// Modification time granularity is whole seconds; two edits landing within
/// the same tick alias to the same key.
#[must_use]
pub fn derive_key(file_name: &str, modified_secs: u64, size: u32) -> CacheKey {
	CacheKey(format!("{file_name}-{modified_secs}-{size}.png"))
}
