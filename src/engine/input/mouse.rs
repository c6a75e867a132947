use cgmath::{Vector2, Zero};

#[derive(Debug, Hash, Eq, PartialEq, Copy, Clone)]
pub enum MouseButton {
	Left,
	Right,
	Middle,
	Other(u16),
}

impl From<winit::event::MouseButton> for MouseButton {
	fn from(button: winit::event::MouseButton) -> Self {
		match button {
			winit::event::MouseButton::Left => MouseButton::Left,
			winit::event::MouseButton::Right => MouseButton::Right,
			winit::event::MouseButton::Middle => MouseButton::Middle,
			winit::event::MouseButton::Other(n) => MouseButton::Other(n),
		}
	}
}

/// Cursor position in window pixels and the raw motion accumulated this frame.
#[derive(Debug, Copy, Clone)]
pub struct Cursor {
	pub position: Vector2<f32>,
	pub delta: Vector2<f32>,
}

impl Default for Cursor {
	fn default() -> Self {
		Self {
			position: Vector2::zero(),
			delta: Vector2::zero(),
		}
	}
}

impl Cursor {
	pub fn moved_to(&mut self, position: Vector2<f32>) {
		self.position = position;
	}

	pub fn motion(&mut self, delta: Vector2<f32>) {
		self.delta += delta;
	}

	pub fn clear(&mut self) {
		self.delta = Vector2::zero();
	}
}
