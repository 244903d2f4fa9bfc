use crate::{
	consts::{PLACEHOLDER_BACKGROUND, PLACEHOLDER_CIRCLE},
	error::{Error, Result},
};
use image::{Rgba, RgbaImage};

/// Synthesizes the fallback thumbnail: an opaque white square with a centered
/// brand-blue circle of half the image's width.
///
/// Deterministic and free of I/O. This is the terminal stage of the fallback
/// chain, so the only rejected input is a size of zero pixels.
pub fn generate(size: u32) -> Result<RgbaImage> {
	if size == 0 {
		return Err(Error::InvalidSize);
	}

	let mut image = RgbaImage::from_pixel(size, size, Rgba(PLACEHOLDER_BACKGROUND));

	// Circle diameter is size / 2, leaving a quarter margin on every side.
	let center = f64::from(size - 1) / 2.0;
	let radius = f64::from(size) / 4.0;

	for (x, y, pixel) in image.enumerate_pixels_mut() {
		let dx = f64::from(x) - center;
		let dy = f64::from(y) - center;
		if dx.mul_add(dx, dy * dy) <= radius * radius {
			*pixel = Rgba(PLACEHOLDER_CIRCLE);
		}
	}

	Ok(image)
}
