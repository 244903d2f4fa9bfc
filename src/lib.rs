#![warn(
	clippy::all,
	clippy::pedantic,
	clippy::correctness,
	clippy::perf,
	clippy::style,
	clippy::suspicious,
	clippy::complexity,
	clippy::nursery,
	clippy::unwrap_used,
	unused_qualifications,
	rust_2018_idioms,
	clippy::expect_used,
	trivial_casts,
	trivial_numeric_casts,
	unused_allocation,
	clippy::as_conversions,
	clippy::dbg_macro
)]
#![forbid(unsafe_code)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

//! Thumbnail pipeline for `.wiretuner` documents.
//!
//! The host file browser asks for a preview image for a (file, pixel size)
//! pair. This crate answers by reusing a cached render when the file is
//! unchanged, delegating to the external WireTuner CLI renderer otherwise,
//! and degrading to a synthesized placeholder whenever real generation is
//! impossible — the call never fails from the host's point of view.

mod cache;
mod consts;
mod error;
mod identity;
mod locator;
mod placeholder;
mod renderer;
mod thumbnailer;

pub use cache::ThumbnailCache;
pub use error::{Error, Result};
pub use identity::{derive_key, CacheKey, FileIdentity};
pub use image::RgbaImage;
pub use locator::{locate_renderer, SearchEnv, SystemEnv};
pub use placeholder::generate as generate_placeholder;
pub use renderer::{CliRenderer, RenderOutcome, RenderRequest, Renderer};
pub use thumbnailer::{Thumbnail, Thumbnailer};

/// One-shot convenience over [`Thumbnailer`] for hosts that keep no state.
pub fn get_thumbnail(path: impl AsRef<std::path::Path>, size: u32) -> Result<Thumbnail> {
	Thumbnailer::new().get(path, size)
}
