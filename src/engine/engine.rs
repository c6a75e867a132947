use anyhow::bail;
use winit::dpi::PhysicalSize;
use winit::window::WindowId;

use crate::config::AppConfig;
use crate::engine::input::FrameInput;
use crate::engine::render::renderer::Renderer;
use crate::engine::time::fps::FpsCounter;
use crate::engine::time::time::Time;
use crate::engine::window::window::WindowContainer;

/// The four hooks the frame loop drives. The engine only ever talks to this trait.
pub trait Application {
	/// Limits to request from the device, given what the adapter supports and the window size.
	fn required_limits(&self, _supported: &wgpu::Limits, _size: PhysicalSize<u32>) -> wgpu::Limits {
		wgpu::Limits::downlevel_defaults()
	}

	fn init(&mut self, renderer: &Renderer) -> anyhow::Result<()>;

	fn update(&mut self, input: &FrameInput, dt: f32);

	/// Records and submits this frame's commands into `target`. Errors are logged and the loop continues.
	fn render(&mut self, renderer: &Renderer, target: &wgpu::TextureView) -> anyhow::Result<()>;

	/// The surface was reconfigured.
	fn resize(&mut self, _renderer: &Renderer) {}

	/// Releases every GPU resource the application owns.
	fn destroy(&mut self);
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EngineState {
	Uninitialized,
	Running,
	ShuttingDown,
}

impl Default for EngineState {
	fn default() -> Self {
		EngineState::Uninitialized
	}
}

/// Uninitialized -> Running happens once; shutdown is entered once, from any state.
#[derive(Debug, Default)]
pub struct Lifecycle {
	state: EngineState,
}

impl Lifecycle {
	pub fn state(&self) -> EngineState {
		self.state
	}

	pub fn start(&mut self) -> anyhow::Result<()> {
		match self.state {
			EngineState::Uninitialized => {
				self.state = EngineState::Running;
				Ok(())
			}
			state => bail!("Application is already {:?}!", state),
		}
	}

	/// Returns true the first time only.
	pub fn begin_shutdown(&mut self) -> bool {
		if self.state == EngineState::ShuttingDown {
			return false;
		}
		self.state = EngineState::ShuttingDown;
		true
	}
}

pub type Runner = Box<dyn FnOnce(Engine) -> anyhow::Result<()>>;

pub struct Engine {
	pub config: AppConfig,
	app: Box<dyn Application>,
	renderer: Option<Renderer>,
	window: Option<WindowContainer>,
	input: FrameInput,
	time: Time,
	fps: FpsCounter,
	lifecycle: Lifecycle,
	exit_requested: bool,
	/// The runner is responsible for the engine's event loop, deciding whether frames are
	/// driven from a loop or from platform callbacks
	runner: Runner,
}

impl Engine {
	pub fn new(config: AppConfig, app: Box<dyn Application>) -> Self {
		Self {
			config,
			app,
			renderer: None,
			window: None,
			input: FrameInput::default(),
			time: Time::default(),
			fps: FpsCounter::default(),
			lifecycle: Lifecycle::default(),
			exit_requested: false,
			runner: Box::new(missing_runner),
		}
	}

	pub fn set_runner(&mut self, run_fn: impl FnOnce(Engine) -> anyhow::Result<()> + 'static) -> &mut Self {
		self.runner = Box::new(run_fn);
		self
	}

	pub fn run(mut self) -> anyhow::Result<()> {
		let runner = std::mem::replace(&mut self.runner, Box::new(missing_runner));
		(runner)(self)
	}

	pub fn state(&self) -> EngineState {
		self.lifecycle.state()
	}

	/// Bootstraps the GPU against `window` and initializes the application.
	pub fn start(&mut self, window: WindowContainer) -> anyhow::Result<()> {
		self.lifecycle.start()?;

		let window = self.window.insert(window);
		let app = &self.app;
		let renderer = Renderer::new(&window.0, |supported, size| app.required_limits(supported, size))?;

		self.app.init(&renderer)?;
		self.renderer = Some(renderer);

		log::info!("Running");
		Ok(())
	}

	/// Drives one frame: update, record and submit, present, then let the device run its callbacks.
	pub fn frame(&mut self) {
		if self.lifecycle.state() != EngineState::Running {
			return;
		}
		let renderer = match self.renderer.as_mut() {
			Some(renderer) => renderer,
			None => return,
		};

		self.time.update();
		self.app.update(&self.input, self.time.delta_seconds());

		match renderer.surface.get_current_texture() {
			Ok(output) => {
				let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());
				if let Err(error) = self.app.render(renderer, &view) {
					log::error!("Frame failed: {:#}", error);
				}
				output.present();
			}
			// Reconfigure the surface if lost
			Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
				let size = renderer.size;
				renderer.resize(size);
				self.app.resize(renderer);
			}
			// The system is out of memory, we should probably quit
			Err(wgpu::SurfaceError::OutOfMemory) => {
				log::error!("Out of memory acquiring the next frame");
				self.exit_requested = true;
			}
			Err(wgpu::SurfaceError::Timeout) => log::warn!("Timed out acquiring the next frame"),
		}

		renderer.device.poll(wgpu::Maintain::Poll);

		self.input.clear();
		self.fps.tick();
	}

	pub fn resize(&mut self, size: PhysicalSize<u32>) {
		if let Some(renderer) = self.renderer.as_mut() {
			renderer.resize(size);
			self.app.resize(renderer);
		}
	}

	pub fn input_mut(&mut self) -> &mut FrameInput {
		&mut self.input
	}

	pub fn owns_window(&self, id: WindowId) -> bool {
		self.window.as_ref().map_or(false, |window| window.0.id() == id)
	}

	pub fn request_exit(&mut self) {
		self.exit_requested = true;
	}

	pub fn exit_requested(&self) -> bool {
		self.exit_requested
	}

	/// Releases the application's resources, then the GPU, then the window. Safe to call more than once.
	pub fn shutdown(&mut self) {
		if !self.lifecycle.begin_shutdown() {
			return;
		}

		log::info!("Shutting down");
		self.app.destroy();
		self.renderer = None;
		self.window = None;
	}
}

impl Drop for Engine {
	fn drop(&mut self) {
		self.shutdown();
	}
}

fn missing_runner(_engine: Engine) -> anyhow::Result<()> {
	bail!("No runner was set for the engine")
}
