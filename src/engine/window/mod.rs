use cgmath::Vector2;
use winit::event::{DeviceEvent, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;

use crate::config::RunLoop;
use crate::engine::engine::Engine;
use crate::engine::input::keyboard::{KeyCode, KeyboardInput};
use crate::engine::window::window::WindowContainer;

pub mod window;

pub type RunFn = fn(Engine) -> anyhow::Result<()>;

pub fn runner(run_loop: RunLoop) -> RunFn {
	match run_loop {
		RunLoop::Callback => callback_runner,
		RunLoop::Polling => polling_runner,
	}
}

/// Hands the loop to winit. Frames are drawn whenever the pending events have been handled, and the
/// engine shuts down when winit destroys the loop.
pub fn callback_runner(mut engine: Engine) -> anyhow::Result<()> {
	let event_loop = EventLoop::new();
	let window = WindowContainer::create_window(&event_loop, &engine.config.window)?;
	engine.start(window)?;

	event_loop.run(move |event, _, control_flow| {
		*control_flow = ControlFlow::Poll;

		match event {
			Event::MainEventsCleared => engine.frame(),
			Event::LoopDestroyed => engine.shutdown(),
			event => handle_event(&mut engine, event),
		}

		if engine.exit_requested() {
			*control_flow = ControlFlow::Exit;
		}
	})
}

/// Pumps whatever the platform has queued, then draws a frame, until exit is requested.
pub fn polling_runner(mut engine: Engine) -> anyhow::Result<()> {
	let mut event_loop = EventLoop::new();
	let window = WindowContainer::create_window(&event_loop, &engine.config.window)?;
	engine.start(window)?;

	pump_frames(
		&mut engine,
		|engine| {
			event_loop.run_return(|event, _, control_flow| {
				*control_flow = ControlFlow::Poll;

				match event {
					Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
					// Sent every time run_return hands control back
					Event::LoopDestroyed => {}
					event => handle_event(engine, event),
				}
			});
		},
		Engine::frame,
	);

	engine.shutdown();
	Ok(())
}

/// Alternates `pump` and `frame` until exit is requested. An exit raised while pumping skips the frame.
fn pump_frames(engine: &mut Engine, mut pump: impl FnMut(&mut Engine), mut frame: impl FnMut(&mut Engine)) {
	while !engine.exit_requested() {
		pump(engine);
		if engine.exit_requested() {
			break;
		}
		frame(engine);
	}
}

fn handle_event(engine: &mut Engine, event: Event<'_, ()>) {
	match event {
		Event::WindowEvent {
			event,
			window_id,
		} if engine.owns_window(window_id) => match event {
			WindowEvent::CloseRequested => engine.request_exit(),
			WindowEvent::Resized(size) => engine.resize(size),
			WindowEvent::ScaleFactorChanged {
				new_inner_size,
				..
			} => engine.resize(*new_inner_size),
			WindowEvent::KeyboardInput {
				input,
				..
			} => {
				let input = KeyboardInput::from(&input);
				if input.key_code == Some(KeyCode::Escape) && input.state.is_pressed() {
					engine.request_exit();
				}
				engine.input_mut().keyboard(input);
			}
			WindowEvent::MouseInput {
				state,
				button,
				..
			} => engine.input_mut().mouse_button(button.into(), state.into()),
			WindowEvent::CursorMoved {
				position,
				..
			} => {
				let position = Vector2::new(position.x as f32, position.y as f32);
				engine.input_mut().cursor_moved(position);
			}
			WindowEvent::Focused(false) => engine.input_mut().release_all(),
			_ => (),
		},
		Event::DeviceEvent {
			event: DeviceEvent::MouseMotion { delta },
			..
		} => {
			engine.input_mut().mouse_motion(Vector2::new(delta.0 as f32, delta.1 as f32));
		}
		_ => (),
	}
}
