use anyhow::Context;
use wgpu::{Backends, Device, DeviceDescriptor, Features, Instance, Limits, PowerPreference, PresentMode, Queue, RequestAdapterOptions, Surface, SurfaceConfiguration, TextureUsages};
use winit::dpi::PhysicalSize;
use winit::window::Window;

/// The device and presentable surface shared by everything that draws.
///
/// Fields drop in declaration order, which releases the surface first and the instance last.
pub struct Renderer {
	pub surface: Surface,
	pub device: Device,
	pub queue: Queue,
	pub config: SurfaceConfiguration,
	pub size: PhysicalSize<u32>,

	_adapter: wgpu::Adapter,
	_instance: Instance,
}

impl Renderer {
	/// Acquires adapter and device, blocking on each request, and configures the surface for `window`.
	///
	/// `required_limits` receives what the adapter supports and the window size, and returns the limits to request.
	pub fn new(
		window: &Window,
		required_limits: impl FnOnce(&Limits, PhysicalSize<u32>) -> Limits,
	) -> anyhow::Result<Self> {
		let size = window.inner_size();

		// The instance is a handle to our GPU
		// Backends::all() => Vulkan + Metal + DX12 + Browser WebGPU
		let instance = Instance::new(Backends::all());
		let surface = unsafe { instance.create_surface(window) };
		let adapter = pollster::block_on(instance.request_adapter(
			&RequestAdapterOptions {
				power_preference: PowerPreference::default(),
				compatible_surface: Some(&surface),
				force_fallback_adapter: false,
			}
		)).context("RequestAdapter: no adapter can present to this window")?;

		let info = adapter.get_info();
		log::info!("Adapter: {} ({:?})", info.name, info.backend);

		let limits = required_limits(&adapter.limits(), size);
		log::debug!("Requesting {:?}", limits);

		let (device, queue) = pollster::block_on(adapter.request_device(
			&DeviceDescriptor {
				label: Some("device"),
				features: Features::empty(),
				limits,
			},
			None,
		)).context("RequestDevice")?;

		// Validation and internal errors surface here; the frame they come from may be wrong but the loop keeps going
		device.on_uncaptured_error(|error: wgpu::Error| {
			log::error!("Uncaptured device error: {}", error);
		});

		let format = *surface
			.get_supported_formats(&adapter)
			.first()
			.context("The surface supports no formats on this adapter")?;

		let config = SurfaceConfiguration {
			usage: TextureUsages::RENDER_ATTACHMENT,
			format,
			width: size.width.max(1),
			height: size.height.max(1),
			present_mode: PresentMode::Fifo,
		};

		let mut renderer = Self {
			surface,
			device,
			queue,
			config,
			size,
			_adapter: adapter,
			_instance: instance,
		};
		renderer.resize(size);

		Ok(renderer)
	}

	pub fn format(&self) -> wgpu::TextureFormat {
		self.config.format
	}

	/// Reconfigures the surface. Extents past the device's texture limit are clamped; zero sizes are ignored.
	pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
		if new_size.width == 0 || new_size.height == 0 {
			return;
		}

		let (width, height) = clamp_extent(new_size, self.device.limits().max_texture_dimension_2d);
		if (width, height) != (new_size.width, new_size.height) {
			log::warn!(
				"Clamping surface from {}x{} to {}x{}",
				new_size.width,
				new_size.height,
				width,
				height,
			);
		}

		self.size = new_size;
		self.config.width = width;
		self.config.height = height;
		self.surface.configure(&self.device, &self.config);
	}
}

fn clamp_extent(size: PhysicalSize<u32>, max_dimension: u32) -> (u32, u32) {
	(size.width.min(max_dimension), size.height.min(max_dimension))
}
