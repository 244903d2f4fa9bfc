use std::time::Duration;

/// How long a renderer child process may run before it is killed.
pub(crate) const RENDER_TIMEOUT: Duration = Duration::from_millis(5000);

/// Poll interval while waiting for the renderer to exit.
pub(crate) const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Name of the thumbnail cache directory, under the system temp dir.
pub(crate) const CACHE_DIR_NAME: &str = "wiretuner-thumbnails";

/// File name of the renderer executable.
#[cfg(windows)]
pub(crate) const RENDERER_EXE: &str = "wiretuner.exe";

/// File name of the renderer executable.
#[cfg(not(windows))]
pub(crate) const RENDERER_EXE: &str = "wiretuner";

/// Well-known install locations, probed before the search-path scan.
#[cfg(windows)]
pub(crate) const INSTALL_CANDIDATES: [&str; 2] = [
	"C:\\Program Files\\WireTuner\\wiretuner.exe",
	"C:\\Program Files (x86)\\WireTuner\\wiretuner.exe",
];

/// Well-known install locations, probed before the search-path scan.
#[cfg(not(windows))]
pub(crate) const INSTALL_CANDIDATES: [&str; 2] =
	["/usr/local/bin/wiretuner", "/opt/wiretuner/bin/wiretuner"];

/// Placeholder background, opaque white.
pub(crate) const PLACEHOLDER_BACKGROUND: [u8; 4] = [255, 255, 255, 255];

/// Brand blue of the placeholder circle.
pub(crate) const PLACEHOLDER_CIRCLE: [u8; 4] = [33, 150, 243, 255];
