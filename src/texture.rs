use std::num::NonZeroU32;

use anyhow::ensure;

pub struct Texture {
	pub texture: wgpu::Texture,
	pub view: wgpu::TextureView,
	/// Only textures read by a shader get one
	pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
	pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

	/// Uploads an RGBA8 image as an sRGB texture sampled with nearest filtering.
	pub fn from_image(
		device: &wgpu::Device,
		queue: &wgpu::Queue,
		image: &image::RgbaImage,
		label: &str,
	) -> anyhow::Result<Self> {
		let (width, height) = image.dimensions();
		ensure!(width > 0 && height > 0, "Texture {} is empty", label);

		let size = wgpu::Extent3d {
			width,
			height,
			depth_or_array_layers: 1,
		};

		let texture = device.create_texture(&wgpu::TextureDescriptor {
			label: Some(label),
			size,
			mip_level_count: 1,
			sample_count: 1,
			dimension: wgpu::TextureDimension::D2,
			format: wgpu::TextureFormat::Rgba8UnormSrgb,
			usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
		});

		queue.write_texture(
			wgpu::ImageCopyTexture {
				texture: &texture,
				mip_level: 0,
				origin: wgpu::Origin3d::ZERO,
				aspect: wgpu::TextureAspect::All,
			},
			image.as_raw(),
			wgpu::ImageDataLayout {
				offset: 0,
				bytes_per_row: NonZeroU32::new(4 * width),
				rows_per_image: NonZeroU32::new(height),
			},
			size,
		);

		let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
		let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
			label: Some(label),
			address_mode_u: wgpu::AddressMode::ClampToEdge,
			address_mode_v: wgpu::AddressMode::ClampToEdge,
			address_mode_w: wgpu::AddressMode::ClampToEdge,
			mag_filter: wgpu::FilterMode::Nearest,
			min_filter: wgpu::FilterMode::Nearest,
			mipmap_filter: wgpu::FilterMode::Nearest,
			..Default::default()
		});

		Ok(Self {
			texture,
			view,
			sampler: Some(sampler),
		})
	}

	/// A depth attachment matching the configured surface extent.
	pub fn create_depth_texture(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration, label: &str) -> Self {
		let texture = device.create_texture(&depth_descriptor(config, label));
		let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

		Self {
			texture,
			view,
			sampler: None,
		}
	}
}

fn depth_descriptor<'a>(config: &wgpu::SurfaceConfiguration, label: &'a str) -> wgpu::TextureDescriptor<'a> {
	wgpu::TextureDescriptor {
		label: Some(label),
		size: wgpu::Extent3d {
			width: config.width.max(1),
			height: config.height.max(1),
			depth_or_array_layers: 1,
		},
		mip_level_count: 1,
		sample_count: 1,
		dimension: wgpu::TextureDimension::D2,
		format: Texture::DEPTH_FORMAT,
		usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
	}
}
