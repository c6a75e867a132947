use anyhow::bail;
use winit::dpi::PhysicalSize;

use crate::mesh::{CubeVertex, Vertex};
use crate::texture::Texture;
use crate::transforms::VoxelTransforms;
use crate::uniform::UniformData;

/// Everything fixed at startup that a voxel draw needs: the bind group layout, the pipeline layout and the pipeline.
pub struct VoxelPipeline {
	pub pipeline: wgpu::RenderPipeline,
	pub layout: wgpu::PipelineLayout,
	pub bind_group_layout: wgpu::BindGroupLayout,
}

impl VoxelPipeline {
	/// Compiles `source` and builds the pipeline. Any validation error raised on the way is fatal.
	pub fn new(device: &wgpu::Device, source: &str, color_format: wgpu::TextureFormat) -> anyhow::Result<Self> {
		device.push_error_scope(wgpu::ErrorFilter::Validation);

		let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
			label: Some("voxel bind group layout"),
			entries: &[
				wgpu::BindGroupLayoutEntry {
					binding: 0,
					visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
					ty: wgpu::BindingType::Buffer {
						ty: wgpu::BufferBindingType::Uniform,
						has_dynamic_offset: false,
						min_binding_size: wgpu::BufferSize::new(UniformData::size()),
					},
					count: None,
				},
				wgpu::BindGroupLayoutEntry {
					binding: 1,
					visibility: wgpu::ShaderStages::VERTEX,
					ty: wgpu::BindingType::Buffer {
						ty: wgpu::BufferBindingType::Storage { read_only: true },
						has_dynamic_offset: true,
						min_binding_size: VoxelTransforms::binding_size(),
					},
					count: None,
				},
				wgpu::BindGroupLayoutEntry {
					binding: 2,
					visibility: wgpu::ShaderStages::FRAGMENT,
					ty: wgpu::BindingType::Texture {
						multisampled: false,
						view_dimension: wgpu::TextureViewDimension::D2,
						sample_type: wgpu::TextureSampleType::Float { filterable: true },
					},
					count: None,
				},
				wgpu::BindGroupLayoutEntry {
					binding: 3,
					visibility: wgpu::ShaderStages::FRAGMENT,
					ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
					count: None,
				},
			],
		});

		let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
			label: Some("voxel pipeline layout"),
			bind_group_layouts: &[&bind_group_layout],
			push_constant_ranges: &[],
		});

		let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
			label: Some("voxel shader"),
			source: wgpu::ShaderSource::Wgsl(source.into()),
		});

		let pipeline = create_render_pipeline(
			device,
			&layout,
			color_format,
			Some(Texture::DEPTH_FORMAT),
			&[CubeVertex::desc()],
			&shader,
		);

		if let Some(error) = pollster::block_on(device.pop_error_scope()) {
			bail!("Failed to build the voxel pipeline: {}", error);
		}

		Ok(Self {
			pipeline,
			layout,
			bind_group_layout,
		})
	}
}

fn create_render_pipeline(
	device: &wgpu::Device,
	layout: &wgpu::PipelineLayout,
	color_format: wgpu::TextureFormat,
	depth_format: Option<wgpu::TextureFormat>,
	vertex_layouts: &[wgpu::VertexBufferLayout],
	shader: &wgpu::ShaderModule,
) -> wgpu::RenderPipeline {
	device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
		label: Some("voxel pipeline"),
		layout: Some(layout),
		vertex: wgpu::VertexState {
			module: shader,
			entry_point: "vs_main",
			buffers: vertex_layouts,
		},
		fragment: Some(wgpu::FragmentState {
			module: shader,
			entry_point: "fs_main",
			targets: &[Some(wgpu::ColorTargetState {
				format: color_format,
				blend: Some(wgpu::BlendState {
					color: wgpu::BlendComponent {
						src_factor: wgpu::BlendFactor::SrcAlpha,
						dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
						operation: wgpu::BlendOperation::Add,
					},
					// Keep whatever alpha the target already has
					alpha: wgpu::BlendComponent {
						src_factor: wgpu::BlendFactor::Zero,
						dst_factor: wgpu::BlendFactor::One,
						operation: wgpu::BlendOperation::Add,
					},
				}),
				write_mask: wgpu::ColorWrites::ALL,
			})],
		}),
		primitive: wgpu::PrimitiveState {
			topology: wgpu::PrimitiveTopology::TriangleList,
			strip_index_format: None,
			front_face: wgpu::FrontFace::Ccw,
			cull_mode: None,
			polygon_mode: wgpu::PolygonMode::Fill,
			unclipped_depth: false,
			conservative: false,
		},
		depth_stencil: depth_format.map(|format| wgpu::DepthStencilState {
			format,
			depth_write_enabled: true,
			depth_compare: wgpu::CompareFunction::Less,
			stencil: wgpu::StencilState::default(),
			bias: wgpu::DepthBiasState::default(),
		}),
		multisample: wgpu::MultisampleState::default(),
		multiview: None,
	})
}

/// The smallest set of limits this pipeline runs under, never above what the adapter supports.
///
/// Counts come from the bind group layout and vertex layout above. Texture extents cover both the
/// surface and the block texture. Offset alignments are taken as the adapter reports them, since the
/// transform buffer stride is derived from them.
pub fn required_limits(
	supported: &wgpu::Limits,
	surface_size: PhysicalSize<u32>,
	texture_extent: (u32, u32),
	storage_binding_size: u64,
) -> wgpu::Limits {
	let base = wgpu::Limits::downlevel_webgl2_defaults();

	let extent = surface_size
		.width
		.max(surface_size.height)
		.max(texture_extent.0)
		.max(texture_extent.1)
		.max(base.max_texture_dimension_2d)
		.min(supported.max_texture_dimension_2d);

	wgpu::Limits {
		max_texture_dimension_1d: base.max_texture_dimension_1d.min(supported.max_texture_dimension_1d),
		max_texture_dimension_2d: extent,
		max_texture_dimension_3d: base.max_texture_dimension_3d.min(supported.max_texture_dimension_3d),
		max_texture_array_layers: 1,
		max_bind_groups: 1,
		max_dynamic_uniform_buffers_per_pipeline_layout: 0,
		max_dynamic_storage_buffers_per_pipeline_layout: 1,
		max_sampled_textures_per_shader_stage: 1,
		max_samplers_per_shader_stage: 1,
		max_storage_buffers_per_shader_stage: 1,
		max_storage_textures_per_shader_stage: 0,
		max_uniform_buffers_per_shader_stage: 1,
		max_uniform_buffer_binding_size: (UniformData::size() as u32).min(supported.max_uniform_buffer_binding_size),
		max_storage_buffer_binding_size: (storage_binding_size.min(u32::MAX as u64) as u32)
			.min(supported.max_storage_buffer_binding_size),
		max_vertex_buffers: 1,
		max_vertex_attributes: 2,
		max_vertex_buffer_array_stride: std::mem::size_of::<CubeVertex>() as u32,
		min_uniform_buffer_offset_alignment: supported.min_uniform_buffer_offset_alignment,
		min_storage_buffer_offset_alignment: supported.min_storage_buffer_offset_alignment,
		..base
	}
}
