use cgmath::Vector2;
use winit::event::ElementState;

use crate::engine::input::input::Input;
use crate::engine::input::keyboard::{KeyboardInput, KeyCode};
use crate::engine::input::mouse::{Cursor, MouseButton};

pub mod input;
pub mod keyboard;
pub mod mouse;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ButtonState {
	Pressed,
	Released,
}

impl ButtonState {
	pub fn is_pressed(&self) -> bool {
		matches!(self, ButtonState::Pressed)
	}
}

impl From<ElementState> for ButtonState {
	fn from(state: ElementState) -> Self {
		match state {
			ElementState::Pressed => ButtonState::Pressed,
			ElementState::Released => ButtonState::Released,
		}
	}
}

/// Everything the platform reported since the previous frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
	pub keys: Input<KeyCode>,
	pub buttons: Input<MouseButton>,
	pub cursor: Cursor,
}

impl FrameInput {
	pub fn keyboard(&mut self, event: KeyboardInput) {
		if let Some(key) = event.key_code {
			match event.state {
				ButtonState::Pressed => self.keys.press(key),
				ButtonState::Released => self.keys.release(key),
			}
		}
	}

	pub fn mouse_button(&mut self, button: MouseButton, state: ButtonState) {
		match state {
			ButtonState::Pressed => self.buttons.press(button),
			ButtonState::Released => self.buttons.release(button),
		}
	}

	pub fn cursor_moved(&mut self, position: Vector2<f32>) {
		self.cursor.moved_to(position);
	}

	pub fn mouse_motion(&mut self, delta: Vector2<f32>) {
		self.cursor.motion(delta);
	}

	/// Window lost focus: nothing can still be held.
	pub fn release_all(&mut self) {
		self.keys.release_all();
		self.buttons.release_all();
	}

	/// Called once per frame after the application has seen the input.
	pub fn clear(&mut self) {
		self.keys.clear();
		self.buttons.clear();
		self.cursor.clear();
	}
}
