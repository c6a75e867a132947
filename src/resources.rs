use std::path::{Path, PathBuf};

use anyhow::Context;

pub const RES_FOLDER: &str = "res";

pub fn get_resource<P: AsRef<Path>>(path: P) -> PathBuf {
	Path::new(env!("OUT_DIR")).join(RES_FOLDER).join(path)
}

pub fn get_bytes<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<u8>> {
	let path = get_resource(path);
	std::fs::read(&path).with_context(|| format!("Failed to open file {}!", path.display()))
}

pub fn load_string<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
	let path = get_resource(path);
	std::fs::read_to_string(&path).with_context(|| format!("Failed to open file {}!", path.display()))
}

/// Decodes an image resource to RGBA8, flipped so the first row is the bottom of the picture.
pub fn load_image<P: AsRef<Path>>(path: P) -> anyhow::Result<image::RgbaImage> {
	let name = path.as_ref().display().to_string();
	let bytes = get_bytes(path)?;
	let image = image::load_from_memory(&bytes)
		.with_context(|| format!("Failed to decode image {}", name))?;

	Ok(image.flipv().to_rgba8())
}
