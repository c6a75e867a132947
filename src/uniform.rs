use cgmath::{Matrix4, SquareMatrix, Vector4};
use encase::{ShaderType, UniformBuffer};

use crate::camera::{Camera, Projection};

/// Per-frame shader constants, bound at binding 0.
#[derive(ShaderType, Debug, Copy, Clone, PartialEq)]
pub struct UniformData {
	pub model: Matrix4<f32>,
	pub view: Matrix4<f32>,
	pub proj: Matrix4<f32>,
	pub tint: Vector4<f32>,
}

impl UniformData {
	pub fn new(tint: Vector4<f32>) -> Self {
		Self {
			model: Matrix4::identity(),
			view: Matrix4::identity(),
			proj: Matrix4::identity(),
			tint,
		}
	}

	pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
		self.view = camera.calc_matrix();
		self.proj = projection.calc_matrix();
	}

	/// Size of the uniform block as the shader sees it.
	pub fn size() -> wgpu::BufferAddress {
		Self::min_size().get()
	}

	/// Serializes with WGSL uniform layout rules.
	pub fn to_bytes(&self) -> anyhow::Result<Vec<u8>> {
		let mut buffer = UniformBuffer::new(Vec::<u8>::new());
		buffer.write(self)?;
		Ok(buffer.into_inner())
	}
}
