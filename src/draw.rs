use wgpu::DynamicOffset;

use crate::transforms::VoxelTransforms;
use crate::world::VoxelWorld;

pub const CUBE_VERTEX_COUNT: u32 = 36;

/// The two commands a voxel draw is made of. Implemented for render passes and for anything
/// else that wants to see the command stream.
pub trait DrawVoxels<'a> {
	type BindGroup: ?Sized;

	fn bind_voxel(&mut self, bind_group: &'a Self::BindGroup, offset: DynamicOffset);
	fn draw_voxel(&mut self);
}

impl<'a, 'b> DrawVoxels<'b> for wgpu::RenderPass<'a> where 'b: 'a {
	type BindGroup = wgpu::BindGroup;

	fn bind_voxel(&mut self, bind_group: &'b wgpu::BindGroup, offset: DynamicOffset) {
		self.set_bind_group(0, bind_group, &[offset]);
	}

	fn draw_voxel(&mut self) {
		self.draw(0..CUBE_VERTEX_COUNT, 0..1);
	}
}

/// One bind and one draw per solid cell. Returns the number of draws recorded.
pub fn draw_world<'a, P: DrawVoxels<'a>>(
	pass: &mut P,
	world: &VoxelWorld,
	transforms: &VoxelTransforms,
	bind_group: &'a P::BindGroup,
) -> u32 {
	let mut draws = 0;
	for cell in world.iter_solid() {
		pass.bind_voxel(bind_group, transforms.offset(world.linear_index(cell)));
		pass.draw_voxel();
		draws += 1;
	}
	draws
}
