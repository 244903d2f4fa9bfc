pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside the pipeline.
///
/// All of these except [`Error::InvalidSize`] are recovered locally by the
/// orchestrator's placeholder fallback and never reach the host.
#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error("failed to read the source file's identity: {0}")]
	Identity(std::io::Error),
	#[error("no renderer executable could be located")]
	RendererNotFound,
	#[error("the renderer process could not be launched")]
	Launch,
	#[error("the renderer did not exit within the allotted time")]
	TimedOut,
	#[error("the renderer exited with status {0}")]
	RendererExit(i32),
	#[error("error while loading the image (via the `image` crate): {0}")]
	Image(#[from] image::ImageError),
	#[error("there was an i/o error: {0}")]
	Io(#[from] std::io::Error),
	#[error("a thumbnail size of zero pixels was requested")]
	InvalidSize,
}
