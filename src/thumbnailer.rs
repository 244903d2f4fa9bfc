use crate::{
	cache::ThumbnailCache,
	error::{Error, Result},
	identity::FileIdentity,
	placeholder,
	renderer::{CliRenderer, RenderOutcome, RenderRequest, Renderer},
};
use image::RgbaImage;
use std::path::Path;
use tracing::{debug, warn};

/// Host-facing thumbnail value: a square RGBA raster.
pub struct Thumbnail {
	image: RgbaImage,
}

impl Thumbnail {
	#[must_use]
	pub fn width(&self) -> u32 {
		self.image.width()
	}

	#[must_use]
	pub fn height(&self) -> u32 {
		self.image.height()
	}

	#[must_use]
	pub fn image(&self) -> &RgbaImage {
		&self.image
	}

	#[must_use]
	pub fn into_image(self) -> RgbaImage {
		self.image
	}

	/// The raw RGBA pixel buffer plus the alpha flag of the host boundary.
	///
	/// Alpha is preserved end to end, so the flag is always true.
	#[must_use]
	pub fn into_raw(self) -> (Vec<u8>, bool) {
		(self.image.into_raw(), true)
	}
}

/// The thumbnail pipeline: cache lookup, renderer invocation and placeholder
/// fallback behind one synchronous call.
///
/// `get` may block for up to the renderer timeout plus decode time. The
/// orchestrator holds no interior state, so one instance can serve concurrent
/// requests from separate threads; two simultaneous misses for the same key
/// will both invoke the renderer, which is accepted since both write identical
/// bytes to the same entry.
pub struct Thumbnailer {
	cache: ThumbnailCache,
	renderer: Box<dyn Renderer + Send + Sync>,
}

impl Default for Thumbnailer {
	fn default() -> Self {
		Self::new()
	}
}

impl Thumbnailer {
	#[must_use]
	pub fn new() -> Self {
		Self {
			cache: ThumbnailCache::new(),
			renderer: Box::new(CliRenderer::new()),
		}
	}

	/// Swap the cache location. Mainly for tests.
	#[must_use]
	pub fn with_cache(mut self, cache: ThumbnailCache) -> Self {
		self.cache = cache;
		self
	}

	/// Swap the renderer capability, e.g. for an in-memory fake.
	#[must_use]
	pub fn with_renderer(mut self, renderer: impl Renderer + Send + Sync + 'static) -> Self {
		self.renderer = Box::new(renderer);
		self
	}

	/// Produces a `size`×`size` thumbnail for the document at `path`.
	///
	/// Every internal failure — unreadable file, missing renderer, launch
	/// failure, timeout, nonzero exit, undecodable output — degrades to the
	/// placeholder. The only surfaced error is a requested size of zero.
	pub fn get(&self, path: impl AsRef<Path>, size: u32) -> Result<Thumbnail> {
		let path = path.as_ref();
		if size == 0 {
			return Err(Error::InvalidSize);
		}

		let image = match self.generate(path, size) {
			Ok(image) => image,
			Err(e) => {
				debug!(path = %path.display(), "falling back to placeholder: {e}");
				placeholder::generate(size)?
			}
		};

		Ok(Thumbnail { image })
	}

	/// The fallible stages of the pipeline. A straight-line chain: each stage
	/// runs at most once per request, with no retries.
	fn generate(&self, path: &Path, size: u32) -> Result<RgbaImage> {
		let identity = FileIdentity::of(path, size)?;
		let key = identity.cache_key();

		if let Some(entry) = self.cache.lookup(&key) {
			match load(&entry) {
				Ok(image) => {
					debug!(%key, "cache hit");
					return Ok(image);
				}
				// An undecodable entry is treated as a miss.
				Err(e) => warn!(%key, "ignoring undecodable cache entry: {e}"),
			}
		}

		let request = RenderRequest {
			source: identity.path().to_path_buf(),
			destination: self.cache.slot(&key)?,
			size,
		};

		match self.renderer.render(&request) {
			RenderOutcome::Success(output) => load(&output),
			RenderOutcome::RendererNotFound => Err(Error::RendererNotFound),
			RenderOutcome::LaunchFailed => Err(Error::Launch),
			RenderOutcome::TimedOut => Err(Error::TimedOut),
			RenderOutcome::NonZeroExit(code) => Err(Error::RendererExit(code)),
		}
	}
}

fn load(path: &Path) -> Result<RgbaImage> {
	Ok(image::open(path)?.to_rgba8())
}
