use crate::config::AppConfig;
use crate::engine::engine::Engine;
use crate::game::BlockGame;

pub mod camera;
pub mod config;
pub mod draw;
pub mod engine;
pub mod game;
pub mod mesh;
pub mod pipeline;
pub mod raycast;
pub mod resources;
pub mod texture;
pub mod transforms;
pub mod uniform;
pub mod world;

/// Opens the window and runs the block game until it is closed.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,voxel_blocks=info")).init();

	let game = BlockGame::new(&config)?;
	let runner = crate::engine::window::runner(config.run_loop);

	let mut engine = Engine::new(config, Box::new(game));
	engine.set_runner(runner);
	engine.run()
}
