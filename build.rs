use std::env;

use anyhow::Result;
use fs_extra::copy_items;
use fs_extra::dir::CopyOptions;

fn main() -> Result<()> {
	// Rerun whenever a shader or texture changes
	for entry in glob::glob("res/**/*")? {
		println!("cargo:rerun-if-changed={}", entry?.display());
	}

	let out_dir = env::var("OUT_DIR")?;
	let mut copy_options = CopyOptions::new();
	copy_options.overwrite = true;

	let mut paths_to_copy = Vec::new();
	paths_to_copy.push("res/");
	copy_items(&paths_to_copy, out_dir, &copy_options)?;

	Ok(())
}
