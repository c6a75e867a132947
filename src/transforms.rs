use std::num::NonZeroU64;

use cgmath::{Matrix4, Vector3};
use encase::ShaderType;
use wgpu::util::DeviceExt;
use wgpu::DynamicOffset;

use crate::world::VoxelWorld;

/// One model matrix per grid cell, read from binding 1 at a dynamic offset.
#[derive(ShaderType, Debug, Copy, Clone)]
pub struct VoxelTransform {
	pub model: Matrix4<f32>,
}

/// Addressing for the static transform buffer: one aligned record per cell, in `linear_index` order.
#[derive(Debug, Copy, Clone)]
pub struct VoxelTransforms {
	stride: u64,
	cells: u64,
}

impl VoxelTransforms {
	pub fn new(world: &VoxelWorld, min_storage_alignment: u32) -> Self {
		Self {
			stride: align_to(Self::record_size(), min_storage_alignment.max(1) as u64),
			cells: world.size().pow(3) as u64,
		}
	}

	pub fn record_size() -> u64 {
		VoxelTransform::min_size().get()
	}

	pub fn binding_size() -> Option<NonZeroU64> {
		Some(VoxelTransform::min_size())
	}

	pub fn stride(&self) -> u64 {
		self.stride
	}

	pub fn buffer_size(&self) -> u64 {
		self.stride * self.cells
	}

	pub fn offset(&self, linear_index: usize) -> DynamicOffset {
		(linear_index as u64 * self.stride) as DynamicOffset
	}

	/// Translation of every cell, centered on the origin; the gaps between records are zeroed.
	pub fn contents(&self, world: &VoxelWorld) -> Vec<u8> {
		let mut bytes = vec![0u8; self.buffer_size() as usize];
		let center = world.center_offset();
		let size = world.size() as i32;

		for x in 0..size {
			for y in 0..size {
				for z in 0..size {
					let cell = Vector3::new(x, y, z);
					let translation = Vector3::new(x as f32, y as f32, z as f32) - center;
					let model: [[f32; 4]; 4] = Matrix4::from_translation(translation).into();

					let start = self.offset(world.linear_index(cell)) as usize;
					let record = bytemuck::bytes_of(&model);
					bytes[start..start + record.len()].copy_from_slice(record);
				}
			}
		}

		bytes
	}

	pub fn create_buffer(&self, device: &wgpu::Device, world: &VoxelWorld) -> wgpu::Buffer {
		device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Voxel Transform Buffer"),
			contents: &self.contents(world),
			usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
		})
	}
}

/// Rounds `value` up to the next multiple of `alignment`.
pub fn align_to(value: u64, alignment: u64) -> u64 {
	(value + alignment - 1) / alignment * alignment
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::world::WORLD_SIZE;

	#[test]
	fn records_are_one_matrix() {
		assert_eq!(VoxelTransforms::record_size(), 64);
	}

	#[test]
	fn stride_rounds_up_to_the_alignment() {
		let world = VoxelWorld::new(WORLD_SIZE);

		assert_eq!(VoxelTransforms::new(&world, 256).stride(), 256);
		assert_eq!(VoxelTransforms::new(&world, 64).stride(), 64);
		assert_eq!(VoxelTransforms::new(&world, 32).stride(), 64);
		assert_eq!(VoxelTransforms::new(&world, 48).stride(), 96);
	}

	#[test]
	fn offsets_step_by_the_stride() {
		let world = VoxelWorld::new(WORLD_SIZE);
		let transforms = VoxelTransforms::new(&world, 256);

		assert_eq!(transforms.buffer_size(), 256 * 32 * 32 * 32);
		for index in [0, 1, 2, 1000, WORLD_SIZE.pow(3) - 1] {
			assert_eq!(transforms.offset(index) as usize, index * 256);
		}
	}

	#[test]
	fn contents_hold_the_centered_translation() {
		let world = VoxelWorld::new(4);
		let transforms = VoxelTransforms::new(&world, 128);
		let bytes = transforms.contents(&world);
		assert_eq!(bytes.len(), 128 * 64);

		let read = |index: usize| -> Vec<f32> {
			let start = transforms.offset(index) as usize;
			bytes[start..start + 64]
				.chunks(4)
				.map(|word| f32::from_le_bytes([word[0], word[1], word[2], word[3]]))
				.collect()
		};

		// Column-major: the translation is the last column
		let cell = Vector3::new(3, 0, 1);
		let matrix = read(world.linear_index(cell));
		assert_eq!(&matrix[12..16], &[1.0, -2.0, -1.0, 1.0]);
		assert_eq!(&matrix[0..4], &[1.0, 0.0, 0.0, 0.0]);

		// Padding between records stays zeroed
		let start = transforms.offset(0) as usize;
		assert!(bytes[start + 64..start + 128].iter().all(|byte| *byte == 0));
	}
}
