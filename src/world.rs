use cgmath::{Point3, Vector3};
use ndarray::Array3;

pub const WORLD_SIZE: usize = 32;

/// A dense, fixed-size occupancy grid. Cells outside the grid are never stored and read as empty.
#[derive(Clone, Debug)]
pub struct VoxelWorld {
	blocks: Array3<bool>,
	size: usize,
}

impl VoxelWorld {
	pub fn new(size: usize) -> Self {
		Self {
			blocks: Array3::from_elem((size, size, size), false),
			size,
		}
	}

	/// A world where every cell below `floor_height` is solid.
	pub fn flat(size: usize, floor_height: i32) -> Self {
		let blocks = Array3::from_shape_fn((size, size, size), |(_, y, _)| (y as i32) < floor_height);

		Self {
			blocks,
			size,
		}
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn in_bounds(&self, position: Vector3<i32>) -> bool {
		let size = self.size as i32;
		(0..size).contains(&position.x) && (0..size).contains(&position.y) && (0..size).contains(&position.z)
	}

	pub fn is_solid(&self, position: Vector3<i32>) -> bool {
		self.in_bounds(position) && self.blocks[Self::cell(position)]
	}

	/// Returns whether the cell changed. Writes outside the grid are dropped.
	pub fn set_solid(&mut self, position: Vector3<i32>, solid: bool) -> bool {
		if !self.in_bounds(position) {
			log::warn!("Ignoring write outside the world at {:?}", position);
			return false;
		}

		let cell = &mut self.blocks[Self::cell(position)];
		let changed = *cell != solid;
		*cell = solid;
		changed
	}

	pub fn solid_count(&self) -> usize {
		self.blocks.iter().filter(|solid| **solid).count()
	}

	/// Solid cells in x, then y, then z order.
	pub fn iter_solid(&self) -> impl Iterator<Item = Vector3<i32>> + '_ {
		self.blocks
			.indexed_iter()
			.filter(|(_, solid)| **solid)
			.map(|((x, y, z), _)| Vector3::new(x as i32, y as i32, z as i32))
	}

	/// Position of a cell in the flattened `x, y, z` ordering used by the transform buffer.
	pub fn linear_index(&self, position: Vector3<i32>) -> usize {
		let size = self.size;
		position.z as usize + size * (position.y as usize + size * position.x as usize)
	}

	/// Offset subtracted from cell coordinates to center the world on the origin.
	pub fn center_offset(&self) -> Vector3<f32> {
		let half = self.size as f32 / 2.0;
		Vector3::new(half, half, half)
	}

	/// Maps a world-space point into grid space, where cell `c` spans `[c, c + 1)` on every axis.
	///
	/// Cell `c` is drawn as a unit cube centered on `c - center_offset`, so its world extent starts half a cell lower.
	pub fn world_to_grid(&self, point: Point3<f32>) -> Point3<f32> {
		point + self.center_offset() + Vector3::new(0.5, 0.5, 0.5)
	}

	fn cell(position: Vector3<i32>) -> [usize; 3] {
		[position.x as usize, position.y as usize, position.z as usize]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn outside_the_grid_is_never_solid() {
		let world = VoxelWorld::flat(WORLD_SIZE, WORLD_SIZE as i32);
		let n = WORLD_SIZE as i32;

		for outside in [
			Vector3::new(-1, 0, 0),
			Vector3::new(0, -1, 0),
			Vector3::new(0, 0, -1),
			Vector3::new(n, 0, 0),
			Vector3::new(0, n, 0),
			Vector3::new(0, 0, n),
			Vector3::new(i32::MIN, i32::MAX, 5),
		] {
			assert!(!world.is_solid(outside), "{:?} reported solid", outside);
		}
		assert!(world.is_solid(Vector3::new(n - 1, n - 1, n - 1)));
	}

	#[test]
	fn flat_world_fills_the_floor() {
		let world = VoxelWorld::flat(WORLD_SIZE, 3);

		assert_eq!(world.solid_count(), WORLD_SIZE * WORLD_SIZE * 3);
		assert!(world.is_solid(Vector3::new(16, 2, 16)));
		assert!(!world.is_solid(Vector3::new(16, 3, 16)));
	}

	#[test]
	fn set_solid_reports_changes() {
		let mut world = VoxelWorld::new(4);
		let position = Vector3::new(1, 2, 3);

		assert!(world.set_solid(position, true));
		assert!(!world.set_solid(position, true));
		assert!(world.is_solid(position));

		assert!(world.set_solid(position, false));
		assert!(!world.is_solid(position));
	}

	#[test]
	fn set_solid_outside_is_ignored() {
		let mut world = VoxelWorld::new(4);

		assert!(!world.set_solid(Vector3::new(4, 0, 0), true));
		assert_eq!(world.solid_count(), 0);
	}

	#[test]
	fn linear_index_is_x_major() {
		let world = VoxelWorld::new(WORLD_SIZE);

		assert_eq!(world.linear_index(Vector3::new(0, 0, 0)), 0);
		assert_eq!(world.linear_index(Vector3::new(0, 0, 1)), 1);
		assert_eq!(world.linear_index(Vector3::new(0, 1, 0)), WORLD_SIZE);
		assert_eq!(world.linear_index(Vector3::new(1, 0, 0)), WORLD_SIZE * WORLD_SIZE);
		assert_eq!(world.linear_index(Vector3::new(31, 31, 31)), WORLD_SIZE.pow(3) - 1);
	}

	#[test]
	fn world_origin_is_the_middle_of_the_center_cell() {
		let world = VoxelWorld::new(WORLD_SIZE);

		assert_eq!(world.world_to_grid(Point3::new(0.0, 0.0, 0.0)), Point3::new(16.5, 16.5, 16.5));
		assert_eq!(world.world_to_grid(Point3::new(-16.5, -16.5, -16.5)), Point3::new(0.0, 0.0, 0.0));
	}

	#[test]
	fn iter_solid_follows_linear_order() {
		let world = VoxelWorld::flat(4, 1);
		let indices = world.iter_solid().map(|p| world.linear_index(p)).collect::<Vec<_>>();

		assert_eq!(indices.len(), 16);
		assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
	}
}
