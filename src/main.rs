use std::env;

use voxel_blocks::config::AppConfig;

fn main() {
	if cfg!(debug_assertions) {
		env::set_var("RUST_BACKTRACE", "1");
	}

	if let Err(error) = voxel_blocks::run(AppConfig::default()) {
		log::error!("{:?}", error);
		std::process::exit(1);
	}
}
