use anyhow::Context;
use winit::dpi::PhysicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::config::WindowSettings;

pub struct WindowContainer(pub Window);

impl WindowContainer {
	/// Opens the window and captures the cursor for mouse look.
	pub fn create_window(event_loop: &EventLoop<()>, settings: &WindowSettings) -> anyhow::Result<Self> {
		let window = WindowBuilder::new()
			.with_title(&settings.title)
			.with_inner_size(PhysicalSize::new(settings.width, settings.height))
			.build(event_loop)
			.with_context(|| format!("Failed to create window {:?}", settings.title))?;

		// Not every platform can grab; the game is still playable without it
		if let Err(error) = window.set_cursor_grab(true) {
			log::warn!("Could not grab the cursor: {}", error);
		}
		window.set_cursor_visible(false);

		Ok(Self(window))
	}
}
