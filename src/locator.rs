use crate::consts::{INSTALL_CANDIDATES, RENDERER_EXE};
use std::{
	env,
	ffi::OsString,
	path::{Path, PathBuf},
};
use tracing::trace;

/// The process environment as seen by renderer discovery.
///
/// Injected so discovery stays deterministic under test; production code uses
/// [`SystemEnv`].
pub trait SearchEnv {
	/// Value of the search-path variable, if set.
	fn search_path(&self) -> Option<OsString>;

	/// Whether a candidate executable exists at `path`.
	fn exists(&self, path: &Path) -> bool;
}

/// The live process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl SearchEnv for SystemEnv {
	fn search_path(&self) -> Option<OsString> {
		env::var_os("PATH")
	}

	fn exists(&self, path: &Path) -> bool {
		path.is_file()
	}
}

/// Finds the renderer executable.
///
/// Well-known install locations are probed first, then every directory of the
/// search path in order, each joined with the platform executable name. First
/// hit wins; `None` means no renderer is installed. The environment may change
/// between requests, so nothing is cached across calls.
#[must_use]
pub fn locate_renderer(env: &dyn SearchEnv) -> Option<PathBuf> {
	for candidate in INSTALL_CANDIDATES {
		let candidate = PathBuf::from(candidate);
		if env.exists(&candidate) {
			trace!(path = %candidate.display(), "renderer found at install location");
			return Some(candidate);
		}
	}

	env.search_path().and_then(|path| {
		env::split_paths(&path)
			.map(|dir| dir.join(RENDERER_EXE))
			.find(|exe| env.exists(exe))
	})
}
