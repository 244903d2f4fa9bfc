use crate::{
	consts::{RENDER_POLL_INTERVAL, RENDER_TIMEOUT},
	locator::{locate_renderer, SearchEnv, SystemEnv},
};
use std::{
	path::{Path, PathBuf},
	process::{Child, Command, Stdio},
	thread,
	time::{Duration, Instant},
};
use tracing::{debug, warn};

/// One renderer invocation: where to read the document, where the raster must
/// land, and the requested square pixel size.
///
/// Constructed per request and owned by the orchestrator for the duration of
/// one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
	pub source: PathBuf,
	pub destination: PathBuf,
	pub size: u32,
}

/// Result of asking a renderer for an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
	/// The renderer reported success; the output file is expected at this
	/// path. Whether it was actually written, and decodes, is the caller's
	/// concern.
	Success(PathBuf),
	RendererNotFound,
	LaunchFailed,
	TimedOut,
	/// Nonzero exit status; termination by signal reports -1.
	NonZeroExit(i32),
}

/// Anything that can turn a document into a raster image on disk.
///
/// The pipeline is tested against in-memory fakes of this trait instead of
/// spawning real processes.
pub trait Renderer {
	fn render(&self, request: &RenderRequest) -> RenderOutcome;
}

/// The real renderer: the WireTuner CLI, located and spawned once per
/// request.
///
/// Invoked as `wiretuner --generate-thumbnail <source> <dest> --size <N>`;
/// exit status 0 is the success signal. The child is killed and reaped if it
/// outlives the configured wait.
pub struct CliRenderer {
	env: Box<dyn SearchEnv + Send + Sync>,
	timeout: Duration,
}

impl Default for CliRenderer {
	fn default() -> Self {
		Self::new()
	}
}

impl CliRenderer {
	#[must_use]
	pub fn new() -> Self {
		Self {
			env: Box::new(SystemEnv),
			timeout: RENDER_TIMEOUT,
		}
	}

	/// Swap the discovery environment. Mainly for tests.
	#[must_use]
	pub fn with_env(mut self, env: impl SearchEnv + Send + Sync + 'static) -> Self {
		self.env = Box::new(env);
		self
	}

	#[must_use]
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	fn wait_bounded(&self, mut child: Child, destination: &Path) -> RenderOutcome {
		let deadline = Instant::now() + self.timeout;

		loop {
			match child.try_wait() {
				Ok(Some(status)) => {
					return match status.code() {
						Some(0) => RenderOutcome::Success(destination.to_path_buf()),
						Some(code) => {
							warn!(code, "renderer exited with nonzero status");
							RenderOutcome::NonZeroExit(code)
						}
						// Killed by a signal.
						None => RenderOutcome::NonZeroExit(-1),
					};
				}
				Ok(None) => {
					let now = Instant::now();
					if now >= deadline {
						warn!(timeout = ?self.timeout, "renderer timed out, killing it");
						reap(&mut child);
						return RenderOutcome::TimedOut;
					}
					thread::sleep(RENDER_POLL_INTERVAL.min(deadline - now));
				}
				Err(e) => {
					warn!("failed to poll the renderer: {e}");
					reap(&mut child);
					return RenderOutcome::LaunchFailed;
				}
			}
		}
	}
}

impl Renderer for CliRenderer {
	fn render(&self, request: &RenderRequest) -> RenderOutcome {
		let Some(exe) = locate_renderer(self.env.as_ref()) else {
			debug!("no renderer executable installed");
			return RenderOutcome::RendererNotFound;
		};

		let mut command = Command::new(&exe);
		command
			.arg("--generate-thumbnail")
			.arg(&request.source)
			.arg(&request.destination)
			.arg("--size")
			.arg(request.size.to_string())
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null());

		// The host is a desktop shell; a console window must never flash up.
		#[cfg(windows)]
		{
			use std::os::windows::process::CommandExt;
			const CREATE_NO_WINDOW: u32 = 0x0800_0000;
			command.creation_flags(CREATE_NO_WINDOW);
		}

		debug!(
			renderer = %exe.display(),
			source = %request.source.display(),
			size = request.size,
			"invoking renderer"
		);

		let child = match command.spawn() {
			Ok(child) => child,
			Err(e) => {
				warn!(renderer = %exe.display(), "failed to launch the renderer: {e}");
				return RenderOutcome::LaunchFailed;
			}
		};

		self.wait_bounded(child, &request.destination)
	}
}

fn reap(child: &mut Child) {
	if let Err(e) = child.kill() {
		warn!("failed to kill the renderer child: {e}");
	}
	if let Err(e) = child.wait() {
		warn!("failed to reap the renderer child: {e}");
	}
}
