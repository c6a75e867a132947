use std::hash::Hash;

use hashbrown::HashSet;

/// Pressed state of a set of buttons, plus the edges seen since the last [`Input::clear`].
#[derive(Debug, Clone)]
pub struct Input<T: Eq + Hash> {
	pressed: HashSet<T>,
	just_pressed: HashSet<T>,
	just_released: HashSet<T>,
}

impl<T: Eq + Hash> Default for Input<T> {
	fn default() -> Self {
		Self {
			pressed: Default::default(),
			just_pressed: Default::default(),
			just_released: Default::default(),
		}
	}
}

impl<T> Input<T>
	where
		T: Copy + Eq + Hash,
{
	pub fn press(&mut self, input: T) {
		// Key repeat sends presses while held; only the first one is an edge
		if self.pressed.insert(input) {
			self.just_pressed.insert(input);
		}
	}

	pub fn pressed(&self, input: T) -> bool {
		self.pressed.contains(&input)
	}

	pub fn release(&mut self, input: T) {
		if self.pressed.remove(&input) {
			self.just_released.insert(input);
		}
	}

	pub fn release_all(&mut self) {
		self.just_released.extend(self.pressed.drain());
	}

	pub fn just_pressed(&self, input: T) -> bool {
		self.just_pressed.contains(&input)
	}

	pub fn just_released(&self, input: T) -> bool {
		self.just_released.contains(&input)
	}

	/// Forgets this frame's edges, keeping what is still held.
	pub fn clear(&mut self) {
		self.just_pressed.clear();
		self.just_released.clear();
	}
}
