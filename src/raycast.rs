//! Voxel traversal along a ray (Amanatides & Woo).
//!
//! The walk visits every cell the ray passes through, one axis crossing at a time,
//! and stops at the first solid cell, when the ray leaves the grid, or when it has
//! travelled `max_distance`.

use cgmath::{InnerSpace, Point3, Vector3, Zero};

use crate::world::VoxelWorld;

pub const MAX_RAY_DISTANCE: f32 = 100.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RayHit {
	/// The solid cell the ray stopped in.
	pub voxel: Vector3<i32>,
	/// The cell the ray entered `voxel` from; where a new block goes.
	pub adjacent: Vector3<i32>,
	/// Unit axis of the last crossing, signed by the step direction. Zero if the ray started inside `voxel`.
	pub normal: Vector3<i32>,
	/// Distance travelled along the normalized ray to the boundary of `voxel`.
	pub distance: f32,
}

pub fn cast(world: &VoxelWorld, origin: Point3<f32>, direction: Vector3<f32>, max_distance: f32) -> Option<RayHit> {
	if direction.magnitude2() == 0.0 || !direction.magnitude2().is_finite() {
		return None;
	}
	let direction = direction.normalize();

	let mut voxel = Vector3::new(
		origin.x.floor() as i32,
		origin.y.floor() as i32,
		origin.z.floor() as i32,
	);

	let step = Vector3::new(sign(direction.x), sign(direction.y), sign(direction.z));

	let mut t_max = Vector3::new(
		first_crossing(origin.x, voxel.x, direction.x, step.x),
		first_crossing(origin.y, voxel.y, direction.y, step.y),
		first_crossing(origin.z, voxel.z, direction.z, step.z),
	);
	let t_delta = Vector3::new(
		crossing_length(direction.x),
		crossing_length(direction.y),
		crossing_length(direction.z),
	);

	let mut normal = Vector3::zero();
	let mut distance = 0.0;

	while distance < max_distance {
		if !world.in_bounds(voxel) {
			return None;
		}
		if world.is_solid(voxel) {
			return Some(RayHit {
				voxel,
				adjacent: voxel - normal,
				normal,
				distance,
			});
		}

		// Order matters: ties resolve the same way every time so hits are reproducible
		if t_max.x < t_max.y && t_max.x < t_max.z {
			voxel.x += step.x;
			distance = t_max.x;
			t_max.x += t_delta.x;
			normal = Vector3::new(step.x, 0, 0);
		} else if t_max.y < t_max.z {
			voxel.y += step.y;
			distance = t_max.y;
			t_max.y += t_delta.y;
			normal = Vector3::new(0, step.y, 0);
		} else {
			voxel.z += step.z;
			distance = t_max.z;
			t_max.z += t_delta.z;
			normal = Vector3::new(0, 0, step.z);
		}
	}

	None
}

fn sign(value: f32) -> i32 {
	if value > 0.0 {
		1
	} else if value < 0.0 {
		-1
	} else {
		0
	}
}

fn crossing_length(direction: f32) -> f32 {
	if direction == 0.0 {
		f32::INFINITY
	} else {
		(1.0 / direction).abs()
	}
}

/// Distance along the ray to the first boundary crossed on one axis.
fn first_crossing(origin: f32, voxel: i32, direction: f32, step: i32) -> f32 {
	match step {
		1 => (voxel as f32 + 1.0 - origin) / direction,
		-1 => (origin - voxel as f32) / -direction,
		_ => f32::INFINITY,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::world::WORLD_SIZE;

	fn floor_world() -> VoxelWorld {
		VoxelWorld::flat(WORLD_SIZE, 3)
	}

	#[test]
	fn straight_down_hits_the_floor_top() {
		let world = floor_world();
		let hit = cast(&world, Point3::new(16.0, 10.0, 16.0), -Vector3::unit_y(), MAX_RAY_DISTANCE).unwrap();

		assert_eq!(hit.voxel, Vector3::new(16, 2, 16));
		assert_eq!(hit.adjacent, Vector3::new(16, 3, 16));
		assert_eq!(hit.normal, Vector3::new(0, -1, 0));
		assert_eq!(hit.distance, 7.0);
	}

	#[test]
	fn straight_up_leaves_the_world() {
		let world = floor_world();

		assert_eq!(cast(&world, Point3::new(16.5, 3.5, 16.5), Vector3::unit_y(), MAX_RAY_DISTANCE), None);
	}

	#[test]
	fn casting_twice_gives_the_same_answer() {
		let world = floor_world();
		let origin = Point3::new(3.3, 9.1, 27.8);
		let direction = Vector3::new(0.4, -0.7, -0.25);

		let first = cast(&world, origin, direction, MAX_RAY_DISTANCE);
		let second = cast(&world, origin, direction, MAX_RAY_DISTANCE);

		assert!(first.is_some());
		assert_eq!(first, second);
	}

	#[test]
	fn diagonal_ray_hits_an_adjacent_empty_cell() {
		let world = floor_world();
		let hit = cast(&world, Point3::new(10.5, 8.5, 10.5), Vector3::new(1.0, -1.0, 0.3), MAX_RAY_DISTANCE).unwrap();

		assert!(world.is_solid(hit.voxel));
		assert!(!world.is_solid(hit.adjacent));
		assert_eq!(hit.voxel - hit.adjacent, hit.normal);
		assert_eq!(hit.voxel.y, 2);
	}

	#[test]
	fn side_hit_reports_the_face_it_entered() {
		let mut world = VoxelWorld::new(WORLD_SIZE);
		world.set_solid(Vector3::new(20, 5, 5), true);

		let hit = cast(&world, Point3::new(2.5, 5.5, 5.5), Vector3::unit_x(), MAX_RAY_DISTANCE).unwrap();

		assert_eq!(hit.voxel, Vector3::new(20, 5, 5));
		assert_eq!(hit.adjacent, Vector3::new(19, 5, 5));
		assert_eq!(hit.distance, 17.5);
	}

	#[test]
	fn ties_prefer_z_over_x_and_y() {
		// From a cell center along (1, 1, 1) every axis crosses at the same distance.
		let world = VoxelWorld::new(WORLD_SIZE);
		let direction = Vector3::new(1.0, 1.0, 1.0);
		let mut solid = world.clone();
		solid.set_solid(Vector3::new(5, 5, 6), true);

		let hit = cast(&solid, Point3::new(5.5, 5.5, 5.5), direction, MAX_RAY_DISTANCE).unwrap();

		assert_eq!(hit.voxel, Vector3::new(5, 5, 6));
		assert_eq!(hit.normal, Vector3::new(0, 0, 1));
	}

	#[test]
	fn x_and_y_tie_steps_y() {
		let mut world = VoxelWorld::new(WORLD_SIZE);
		world.set_solid(Vector3::new(5, 6, 5), true);

		let hit = cast(&world, Point3::new(5.5, 5.5, 5.5), Vector3::new(1.0, 1.0, 0.0), MAX_RAY_DISTANCE).unwrap();

		assert_eq!(hit.voxel, Vector3::new(5, 6, 5));
		assert_eq!(hit.adjacent, Vector3::new(5, 5, 5));
	}

	#[test]
	fn origin_outside_the_grid_misses() {
		let world = floor_world();

		assert_eq!(cast(&world, Point3::new(-4.0, 10.0, 16.0), -Vector3::unit_y(), MAX_RAY_DISTANCE), None);
	}

	#[test]
	fn zero_direction_misses() {
		let world = floor_world();

		assert_eq!(cast(&world, Point3::new(16.0, 10.0, 16.0), Vector3::zero(), MAX_RAY_DISTANCE), None);
	}

	#[test]
	fn stops_at_the_distance_limit() {
		let world = floor_world();
		let origin = Point3::new(16.5, 10.5, 16.5);

		assert_eq!(cast(&world, origin, -Vector3::unit_y(), 5.0), None);
		assert!(cast(&world, origin, -Vector3::unit_y(), 8.0).is_some());
	}

	#[test]
	fn starting_inside_a_block_hits_it() {
		let world = floor_world();
		let hit = cast(&world, Point3::new(4.5, 1.5, 4.5), Vector3::unit_y(), MAX_RAY_DISTANCE).unwrap();

		assert_eq!(hit.voxel, Vector3::new(4, 1, 4));
		assert_eq!(hit.adjacent, hit.voxel);
		assert_eq!(hit.distance, 0.0);
	}

	#[test]
	fn boundary_origin_floors_into_the_cell_above() {
		let mut world = VoxelWorld::new(WORLD_SIZE);
		world.set_solid(Vector3::new(8, 4, 8), true);

		let hit = cast(&world, Point3::new(8.5, 4.0, 8.5), Vector3::unit_y(), MAX_RAY_DISTANCE).unwrap();

		assert_eq!(hit.voxel, Vector3::new(8, 4, 8));
		assert_eq!(hit.distance, 0.0);
	}
}
