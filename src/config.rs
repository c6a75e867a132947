use cgmath::Vector4;

/// Everything the engine needs to know before the first frame, handed down from `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
	pub window: WindowSettings,
	pub game: GameSettings,
	pub run_loop: RunLoop,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			window: WindowSettings::default(),
			game: GameSettings::default(),
			run_loop: RunLoop::default(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct WindowSettings {
	pub width: u32,
	pub height: u32,
	pub title: String,
}

impl Default for WindowSettings {
	fn default() -> Self {
		Self {
			width: 512,
			height: 512,
			title: String::from("Block Game"),
		}
	}
}

#[derive(Debug, Clone)]
pub struct GameSettings {
	/// Every cell below this height is solid when the world is created
	pub floor_height: i32,
	/// Units per second
	pub move_speed: f32,
	/// Degrees per pixel of mouse motion
	pub mouse_sensitivity: f32,
	pub tint: Vector4<f32>,
}

impl Default for GameSettings {
	fn default() -> Self {
		Self {
			floor_height: 3,
			move_speed: 8.0,
			mouse_sensitivity: 0.1,
			tint: Vector4::new(1.0, 1.0, 1.0, 1.0),
		}
	}
}

/// How the platform adapter drives frames.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RunLoop {
	/// The windowing system owns the loop and calls back into the engine.
	Callback,
	/// The engine pumps pending events itself and renders between pumps.
	Polling,
}

impl Default for RunLoop {
	fn default() -> Self {
		RunLoop::Callback
	}
}
