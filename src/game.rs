use std::iter;

use anyhow::Context;
use cgmath::{Deg, InnerSpace, Point3, Vector3};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use crate::camera::{unproject, Camera, CameraController, Projection};
use crate::config::{AppConfig, GameSettings};
use crate::draw::draw_world;
use crate::engine::engine::Application;
use crate::engine::input::mouse::MouseButton;
use crate::engine::input::FrameInput;
use crate::engine::render::renderer::Renderer;
use crate::pipeline::{required_limits, VoxelPipeline};
use crate::raycast::{cast, MAX_RAY_DISTANCE};
use crate::resources;
use crate::texture::Texture;
use crate::transforms::VoxelTransforms;
use crate::uniform::UniformData;
use crate::world::{VoxelWorld, WORLD_SIZE};

/// Blocks further than this from the camera can't be touched.
pub const INTERACTION_RADIUS: f32 = 5.0;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
	r: 0.1,
	g: 0.2,
	b: 0.3,
	a: 1.0,
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Edit {
	Remove,
	Place,
}

/// Casts from `origin` and applies `edit` to whatever it hits. Every position is in grid space.
///
/// Returns the cell that changed.
pub fn interact(
	world: &mut VoxelWorld,
	eye: Point3<f32>,
	origin: Point3<f32>,
	direction: Vector3<f32>,
	edit: Edit,
) -> Option<Vector3<i32>> {
	let hit = cast(world, origin, direction, MAX_RAY_DISTANCE)?;

	let center = Point3::new(hit.voxel.x as f32, hit.voxel.y as f32, hit.voxel.z as f32) + Vector3::new(0.5, 0.5, 0.5);
	if (center - eye).magnitude() > INTERACTION_RADIUS {
		log::trace!("{:?} is out of reach", hit.voxel);
		return None;
	}

	let (cell, solid) = match edit {
		Edit::Remove => (hit.voxel, false),
		Edit::Place => (hit.adjacent, true),
	};
	if !world.in_bounds(cell) {
		log::trace!("Nowhere to place a block next to {:?}", hit.voxel);
		return None;
	}

	if world.set_solid(cell, solid) {
		log::debug!("{:?} {:?}", edit, cell);
		Some(cell)
	} else {
		None
	}
}

/// GPU objects owned by the game. Fields drop top to bottom.
struct GpuResources {
	bind_group: wgpu::BindGroup,
	_block_texture: Texture,
	depth_texture: Texture,
	vertex_buffer: wgpu::Buffer,
	uniform_buffer: wgpu::Buffer,
	_transform_buffer: wgpu::Buffer,
	transforms: VoxelTransforms,
	pipeline: VoxelPipeline,
}

pub struct BlockGame {
	settings: GameSettings,
	shader_source: String,
	block_image: image::RgbaImage,

	world: VoxelWorld,
	camera: Camera,
	projection: Projection,
	controller: CameraController,
	uniform: UniformData,

	gpu: Option<GpuResources>,
}

impl BlockGame {
	/// Loads the game's assets and builds the starting world. Nothing touches the GPU until `init`.
	pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
		let settings = config.game.clone();
		let shader_source = resources::load_string("shader.wgsl")?;
		let block_image = resources::load_image("block.png")?;

		let world = VoxelWorld::flat(WORLD_SIZE, settings.floor_height);
		let camera = Camera::new((0.0, settings.floor_height as f32 - 13.0, 10.0), Deg(0.0), Deg(-20.0));
		let projection = Projection::new(config.window.width, config.window.height, Deg(70.0), 0.1, 100.0);
		let controller = CameraController::new(settings.move_speed, settings.mouse_sensitivity);
		let uniform = UniformData::new(settings.tint);

		Ok(Self {
			settings,
			shader_source,
			block_image,
			world,
			camera,
			projection,
			controller,
			uniform,
			gpu: None,
		})
	}

	pub fn world(&self) -> &VoxelWorld {
		&self.world
	}

	/// Camera ray in grid space: from the center of the screen on the near plane, along the view.
	fn view_ray(&self) -> (Point3<f32>, Point3<f32>, Vector3<f32>) {
		let view_proj = self.projection.calc_matrix() * self.camera.calc_matrix();
		let near = unproject(view_proj, Point3::new(0.0, 0.0, 0.0)).unwrap_or(self.camera.position);

		(
			self.world.world_to_grid(self.camera.position),
			self.world.world_to_grid(near),
			self.camera.forward(),
		)
	}
}

impl Application for BlockGame {
	fn required_limits(&self, supported: &wgpu::Limits, size: PhysicalSize<u32>) -> wgpu::Limits {
		required_limits(supported, size, self.block_image.dimensions(), VoxelTransforms::record_size())
	}

	fn init(&mut self, renderer: &Renderer) -> anyhow::Result<()> {
		let device = &renderer.device;

		let pipeline = VoxelPipeline::new(device, &self.shader_source, renderer.format())?;

		let transforms = VoxelTransforms::new(&self.world, device.limits().min_storage_buffer_offset_alignment);
		let transform_buffer = transforms.create_buffer(device, &self.world);

		self.uniform.update_view_proj(&self.camera, &self.projection);
		let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Uniform Buffer"),
			contents: &self.uniform.to_bytes()?,
			usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
		});

		let vertex_buffer = crate::mesh::create_cube_buffer(device);
		let block_texture = Texture::from_image(device, &renderer.queue, &self.block_image, "block texture")?;
		let depth_texture = Texture::create_depth_texture(device, &renderer.config, "depth texture");
		let block_sampler = block_texture.sampler.as_ref().context("The block texture has no sampler")?;

		let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
			label: Some("voxel bind group"),
			layout: &pipeline.bind_group_layout,
			entries: &[
				wgpu::BindGroupEntry {
					binding: 0,
					resource: uniform_buffer.as_entire_binding(),
				},
				wgpu::BindGroupEntry {
					binding: 1,
					resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
						buffer: &transform_buffer,
						offset: 0,
						size: VoxelTransforms::binding_size(),
					}),
				},
				wgpu::BindGroupEntry {
					binding: 2,
					resource: wgpu::BindingResource::TextureView(&block_texture.view),
				},
				wgpu::BindGroupEntry {
					binding: 3,
					resource: wgpu::BindingResource::Sampler(block_sampler),
				},
			],
		});

		self.projection.resize(renderer.config.width, renderer.config.height);

		log::info!(
			"World ready: {} solid blocks, transform stride {} bytes",
			self.world.solid_count(),
			transforms.stride(),
		);

		self.gpu = Some(GpuResources {
			bind_group,
			_block_texture: block_texture,
			depth_texture,
			vertex_buffer,
			uniform_buffer,
			_transform_buffer: transform_buffer,
			transforms,
			pipeline,
		});

		Ok(())
	}

	fn update(&mut self, input: &FrameInput, dt: f32) {
		self.controller.update_camera(&mut self.camera, input, dt);
		self.uniform.tint = self.settings.tint;
		self.uniform.update_view_proj(&self.camera, &self.projection);

		let edit = if input.buttons.just_pressed(MouseButton::Left) {
			Some(Edit::Remove)
		} else if input.buttons.just_pressed(MouseButton::Right) {
			Some(Edit::Place)
		} else {
			None
		};

		if let Some(edit) = edit {
			let (eye, origin, direction) = self.view_ray();
			interact(&mut self.world, eye, origin, direction, edit);
		}
	}

	fn render(&mut self, renderer: &Renderer, target: &wgpu::TextureView) -> anyhow::Result<()> {
		let gpu = self.gpu.as_ref().context("Rendering before the game was initialized")?;

		// The whole uniform block goes out before any draw is recorded
		renderer.queue.write_buffer(&gpu.uniform_buffer, 0, &self.uniform.to_bytes()?);

		let mut encoder = renderer.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
			label: Some("Render Encoder"),
		});

		let draws = {
			let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
				label: Some("Render Pass"),
				color_attachments: &[Some(wgpu::RenderPassColorAttachment {
					view: target,
					resolve_target: None,
					ops: wgpu::Operations {
						load: wgpu::LoadOp::Clear(CLEAR_COLOR),
						store: true,
					},
				})],
				depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
					view: &gpu.depth_texture.view,
					depth_ops: Some(wgpu::Operations {
						load: wgpu::LoadOp::Clear(1.0),
						store: true,
					}),
					stencil_ops: None,
				}),
			});

			render_pass.set_pipeline(&gpu.pipeline.pipeline);
			render_pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));

			draw_world(&mut render_pass, &self.world, &gpu.transforms, &gpu.bind_group)
		};

		renderer.queue.submit(iter::once(encoder.finish()));
		log::trace!("Submitted {} voxel draws", draws);

		Ok(())
	}

	fn resize(&mut self, renderer: &Renderer) {
		self.projection.resize(renderer.config.width, renderer.config.height);
		if let Some(gpu) = self.gpu.as_mut() {
			gpu.depth_texture = Texture::create_depth_texture(&renderer.device, &renderer.config, "depth texture");
		}
	}

	fn destroy(&mut self) {
		if self.gpu.take().is_some() {
			log::debug!("Released GPU resources");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn floor() -> VoxelWorld {
		VoxelWorld::flat(WORLD_SIZE, 3)
	}

	#[test]
	fn remove_then_place_restores_the_block() {
		let mut world = floor();
		let eye = Point3::new(16.5, 5.5, 16.5);
		let down = -Vector3::unit_y();

		assert_eq!(interact(&mut world, eye, eye, down, Edit::Remove), Some(Vector3::new(16, 2, 16)));
		assert!(!world.is_solid(Vector3::new(16, 2, 16)));
		assert_eq!(world.solid_count(), WORLD_SIZE * WORLD_SIZE * 3 - 1);

		// The ray now reaches the layer below and places into the hole above it
		assert_eq!(interact(&mut world, eye, eye, down, Edit::Place), Some(Vector3::new(16, 2, 16)));
		assert!(world.is_solid(Vector3::new(16, 2, 16)));
		assert_eq!(world.solid_count(), WORLD_SIZE * WORLD_SIZE * 3);
	}

	#[test]
	fn placing_goes_on_the_face_that_was_hit() {
		let mut world = floor();
		let eye = Point3::new(16.5, 5.5, 16.5);

		assert_eq!(interact(&mut world, eye, eye, -Vector3::unit_y(), Edit::Place), Some(Vector3::new(16, 3, 16)));
		assert!(world.is_solid(Vector3::new(16, 3, 16)));
	}

	#[test]
	fn blocks_out_of_reach_are_left_alone() {
		let mut world = floor();
		let eye = Point3::new(16.5, 12.5, 16.5);

		assert_eq!(interact(&mut world, eye, eye, -Vector3::unit_y(), Edit::Remove), None);
		assert_eq!(interact(&mut world, eye, eye, -Vector3::unit_y(), Edit::Place), None);
		assert_eq!(world.solid_count(), WORLD_SIZE * WORLD_SIZE * 3);
	}

	#[test]
	fn missing_everything_changes_nothing() {
		let mut world = floor();
		let eye = Point3::new(16.5, 5.5, 16.5);

		assert_eq!(interact(&mut world, eye, eye, Vector3::unit_y(), Edit::Remove), None);
		assert_eq!(world.solid_count(), WORLD_SIZE * WORLD_SIZE * 3);
	}

	/// Where the cube for `cell` is drawn: the translation column of its transform record.
	fn drawn_center(world: &VoxelWorld, cell: Vector3<i32>) -> Point3<f32> {
		let transforms = VoxelTransforms::new(world, 64);
		let bytes = transforms.contents(world);
		let start = transforms.offset(world.linear_index(cell)) as usize + 48;
		let column = bytes[start..start + 12]
			.chunks(4)
			.map(|word| f32::from_le_bytes([word[0], word[1], word[2], word[3]]))
			.collect::<Vec<_>>();
		Point3::new(column[0], column[1], column[2])
	}

	#[test]
	fn points_inside_a_drawn_cube_map_to_its_cell() {
		let world = floor();
		let cell = Vector3::new(16, 2, 16);
		let center = drawn_center(&world, cell);
		assert_eq!(center, Point3::new(0.0, -14.0, 0.0));

		for dx in [-0.4, 0.0, 0.4] {
			for dy in [-0.4, 0.0, 0.4] {
				for dz in [-0.4, 0.0, 0.4] {
					let grid = world.world_to_grid(center + Vector3::new(dx, dy, dz));
					let picked = Vector3::new(grid.x.floor() as i32, grid.y.floor() as i32, grid.z.floor() as i32);
					assert_eq!(picked, cell, "offset ({}, {}, {})", dx, dy, dz);
				}
			}
		}
	}

	#[test]
	fn clicking_above_a_drawn_column_removes_its_top_block() {
		let mut world = floor();
		let top = Vector3::new(16, 2, 16);
		let above = drawn_center(&world, top) + Vector3::new(-0.4, 3.0, -0.4);

		let eye = world.world_to_grid(above);
		assert_eq!(interact(&mut world, eye, eye, -Vector3::unit_y(), Edit::Remove), Some(top));
		assert!(!world.is_solid(top));
	}

	#[test]
	fn game_starts_on_a_flat_floor() {
		let game = BlockGame::new(&AppConfig::default()).unwrap();

		assert_eq!(game.world().solid_count(), WORLD_SIZE * WORLD_SIZE * 3);

		// The camera starts above the floor, inside the grid
		let (eye, origin, direction) = game.view_ray();
		assert!(game.world().in_bounds(Vector3::new(eye.x as i32, eye.y as i32, eye.z as i32)));
		assert!((origin - eye).magnitude() < 0.2);
		assert!(direction.y < 0.0);
	}
}
