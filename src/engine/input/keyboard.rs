use winit::event::VirtualKeyCode;

use crate::engine::input::ButtonState;

pub type KeyCode = VirtualKeyCode;

#[derive(Debug, Clone)]
pub struct KeyboardInput {
	pub key_code: Option<KeyCode>,
	pub state: ButtonState,
}

impl From<&winit::event::KeyboardInput> for KeyboardInput {
	fn from(input: &winit::event::KeyboardInput) -> Self {
		Self {
			key_code: input.virtual_keycode,
			state: input.state.into(),
		}
	}
}
