//! End-to-end pipeline tests driving the real CLI renderer path with scripted
//! stand-in executables.

#![cfg(unix)]

use image::{Rgba, RgbaImage};
use std::{
	ffi::OsString,
	fs,
	os::unix::fs::PermissionsExt,
	path::{Path, PathBuf},
	time::{Duration, Instant},
};
use wiretuner_thumbnailer::{
	generate_placeholder, CliRenderer, SearchEnv, ThumbnailCache, Thumbnailer,
};

const RED: [u8; 4] = [200, 30, 30, 255];

/// Discovery environment whose search path is a single scratch directory.
struct ScriptEnv {
	dir: PathBuf,
}

impl SearchEnv for ScriptEnv {
	fn search_path(&self) -> Option<OsString> {
		Some(self.dir.clone().into_os_string())
	}

	fn exists(&self, path: &Path) -> bool {
		path.starts_with(&self.dir) && path.is_file()
	}
}

fn install_script(bin_dir: &Path, body: &str) {
	let exe = bin_dir.join("wiretuner");
	fs::write(&exe, format!("#!/bin/sh\n{body}\n")).unwrap();
	fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
}

fn thumbnailer_with(bin_dir: &Path, cache_root: &Path, timeout: Duration) -> Thumbnailer {
	let renderer = CliRenderer::new()
		.with_env(ScriptEnv {
			dir: bin_dir.to_path_buf(),
		})
		.with_timeout(timeout);

	Thumbnailer::new()
		.with_cache(ThumbnailCache::with_root(cache_root))
		.with_renderer(renderer)
}

#[test]
fn placeholder_until_a_renderer_is_installed() {
	let dir = tempfile::tempdir().unwrap();
	let bin_dir = dir.path().join("bin");
	fs::create_dir(&bin_dir).unwrap();

	let source = dir.path().join("draft.wiretuner");
	fs::write(&source, b"document bytes").unwrap();

	let thumbnailer = thumbnailer_with(&bin_dir, &dir.path().join("cache"), Duration::from_secs(5));

	// No renderer on the search path: the degraded placeholder comes back.
	let first = thumbnailer.get(&source, 256).unwrap();
	assert_eq!(first.image(), &generate_placeholder(256).unwrap());

	// Install a renderer that copies a pre-rendered raster to the requested
	// destination and exits cleanly.
	let template = dir.path().join("template.png");
	RgbaImage::from_pixel(256, 256, Rgba(RED))
		.save(&template)
		.unwrap();
	install_script(&bin_dir, &format!("cp \"{}\" \"$3\"", template.display()));

	// The placeholder was never cached, so the next request goes through the
	// renderer and returns its output.
	let second = thumbnailer.get(&source, 256).unwrap();
	assert_eq!((second.width(), second.height()), (256, 256));
	assert_eq!(second.image().get_pixel(128, 128), &Rgba(RED));

	// And a third request is a cache hit even with the renderer removed.
	fs::remove_file(bin_dir.join("wiretuner")).unwrap();
	let third = thumbnailer.get(&source, 256).unwrap();
	assert_eq!(third.image().get_pixel(128, 128), &Rgba(RED));
}

#[test]
fn renderer_that_exits_nonzero_degrades() {
	let dir = tempfile::tempdir().unwrap();
	let bin_dir = dir.path().join("bin");
	fs::create_dir(&bin_dir).unwrap();
	install_script(&bin_dir, "exit 9");

	let source = dir.path().join("draft.wiretuner");
	fs::write(&source, b"document bytes").unwrap();

	let thumbnailer = thumbnailer_with(&bin_dir, &dir.path().join("cache"), Duration::from_secs(5));
	let thumb = thumbnailer.get(&source, 128).unwrap();

	assert_eq!(thumb.image(), &generate_placeholder(128).unwrap());
}

#[test]
fn hung_renderer_is_bounded_by_the_timeout() {
	let dir = tempfile::tempdir().unwrap();
	let bin_dir = dir.path().join("bin");
	fs::create_dir(&bin_dir).unwrap();
	install_script(&bin_dir, "sleep 30");

	let source = dir.path().join("draft.wiretuner");
	fs::write(&source, b"document bytes").unwrap();

	let thumbnailer =
		thumbnailer_with(&bin_dir, &dir.path().join("cache"), Duration::from_millis(300));

	let started = Instant::now();
	let thumb = thumbnailer.get(&source, 64).unwrap();

	assert!(started.elapsed() < Duration::from_secs(5));
	assert_eq!(thumb.image(), &generate_placeholder(64).unwrap());
}
