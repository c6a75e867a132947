use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

pub trait Vertex {
	fn desc<'a>() -> wgpu::VertexBufferLayout<'a>;
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
	/// Homogeneous object-space position, `w` is always 1
	pub position: [f32; 4],
	pub tex_coord: [f32; 2],
}

impl Vertex for CubeVertex {
	fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
		static ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x2];
		wgpu::VertexBufferLayout {
			array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
			step_mode: wgpu::VertexStepMode::Vertex,
			attributes: &ATTRIBS,
		}
	}
}

const fn vertex(x: f32, y: f32, z: f32, u: f32, v: f32) -> CubeVertex {
	CubeVertex {
		position: [x, y, z, 1.0],
		tex_coord: [u, v],
	}
}

/*
	    (-1, 1, -1) /-------------------| (1, 1, -1)
			      / |                  /|
			    /   |                /  |
  (-1, 1, 1)  /     |    (1, 1, 1) /    |
			 |------|------------|      |
			 |      |            |      |
			 |      |            |      |
			 |      |------------|------| (1, -1,- 1)
			 |     /(-1, -1, -1) |     /
			 |   /               |   /
			 | /                 | /
 (-1, -1, 1) |-------------------| (1, -1, 1)

	Unit cube centered on the origin, two triangles per face, no index buffer.
*/
#[rustfmt::skip]
pub const CUBE_VERTICES: [CubeVertex; 36] = [
	// Front Face (+z)
	vertex(-0.5, -0.5,  0.5, 0.0, 0.0),
	vertex( 0.5, -0.5,  0.5, 1.0, 0.0),
	vertex( 0.5,  0.5,  0.5, 1.0, 1.0),
	vertex( 0.5,  0.5,  0.5, 1.0, 1.0),
	vertex(-0.5,  0.5,  0.5, 0.0, 1.0),
	vertex(-0.5, -0.5,  0.5, 0.0, 0.0),

	// Back Face (-z)
	vertex( 0.5, -0.5, -0.5, 0.0, 0.0),
	vertex(-0.5, -0.5, -0.5, 1.0, 0.0),
	vertex(-0.5,  0.5, -0.5, 1.0, 1.0),
	vertex(-0.5,  0.5, -0.5, 1.0, 1.0),
	vertex( 0.5,  0.5, -0.5, 0.0, 1.0),
	vertex( 0.5, -0.5, -0.5, 0.0, 0.0),

	// Right Face (+x)
	vertex( 0.5, -0.5,  0.5, 0.0, 0.0),
	vertex( 0.5, -0.5, -0.5, 1.0, 0.0),
	vertex( 0.5,  0.5, -0.5, 1.0, 1.0),
	vertex( 0.5,  0.5, -0.5, 1.0, 1.0),
	vertex( 0.5,  0.5,  0.5, 0.0, 1.0),
	vertex( 0.5, -0.5,  0.5, 0.0, 0.0),

	// Left Face (-x)
	vertex(-0.5, -0.5, -0.5, 0.0, 0.0),
	vertex(-0.5, -0.5,  0.5, 1.0, 0.0),
	vertex(-0.5,  0.5,  0.5, 1.0, 1.0),
	vertex(-0.5,  0.5,  0.5, 1.0, 1.0),
	vertex(-0.5,  0.5, -0.5, 0.0, 1.0),
	vertex(-0.5, -0.5, -0.5, 0.0, 0.0),

	// Top Face (+y)
	vertex(-0.5,  0.5,  0.5, 0.0, 0.0),
	vertex( 0.5,  0.5,  0.5, 1.0, 0.0),
	vertex( 0.5,  0.5, -0.5, 1.0, 1.0),
	vertex( 0.5,  0.5, -0.5, 1.0, 1.0),
	vertex(-0.5,  0.5, -0.5, 0.0, 1.0),
	vertex(-0.5,  0.5,  0.5, 0.0, 0.0),

	// Bottom Face (-y)
	vertex(-0.5, -0.5, -0.5, 0.0, 0.0),
	vertex( 0.5, -0.5, -0.5, 1.0, 0.0),
	vertex( 0.5, -0.5,  0.5, 1.0, 1.0),
	vertex( 0.5, -0.5,  0.5, 1.0, 1.0),
	vertex(-0.5, -0.5,  0.5, 0.0, 1.0),
	vertex(-0.5, -0.5, -0.5, 0.0, 0.0),
];

pub fn create_cube_buffer(device: &wgpu::Device) -> wgpu::Buffer {
	device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
		label: Some("Cube Vertex Buffer"),
		contents: bytemuck::cast_slice(&CUBE_VERTICES),
		usage: wgpu::BufferUsages::VERTEX,
	})
}
