use cgmath::{Deg, EuclideanSpace, InnerSpace, Matrix, Matrix3, Matrix4, Point3, Rad, SquareMatrix, Vector3, Vector4, Zero};
use winit::event::VirtualKeyCode;

use crate::engine::input::FrameInput;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
	1.0, 0.0, 0.0, 0.0,
	0.0, 1.0, 0.0, 0.0,
	0.0, 0.0, 0.5, 0.0,
	0.0, 0.0, 0.5, 1.0,
);

pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone)]
pub struct Camera {
	pub position: Point3<f32>,
	yaw: Deg<f32>,
	pitch: Deg<f32>,
}

impl Camera {
	pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(position: V, yaw: Y, pitch: P) -> Self {
		let mut camera = Self {
			position: position.into(),
			yaw: yaw.into(),
			pitch: Deg(0.0),
		};
		camera.rotate(Deg(0.0), pitch.into());
		camera
	}

	pub fn yaw(&self) -> Deg<f32> {
		self.yaw
	}

	pub fn pitch(&self) -> Deg<f32> {
		self.pitch
	}

	/// Turns the camera; pitch never leaves [-89°, 89°].
	pub fn rotate(&mut self, yaw: Deg<f32>, pitch: Deg<f32>) {
		self.yaw += yaw;
		self.pitch = Deg((self.pitch.0 + pitch.0).clamp(-PITCH_LIMIT, PITCH_LIMIT));
	}

	fn orientation(&self) -> Matrix3<f32> {
		Matrix3::from_angle_y(self.yaw) * Matrix3::from_angle_x(self.pitch)
	}

	pub fn forward(&self) -> Vector3<f32> {
		self.orientation() * -Vector3::unit_z()
	}

	/// Camera transform in the world: translation * rotation.
	pub fn transform(&self) -> Matrix4<f32> {
		Matrix4::from_translation(self.position.to_vec()) * Matrix4::from(self.orientation())
	}

	/// The view matrix, inverse of [`Camera::transform`].
	pub fn calc_matrix(&self) -> Matrix4<f32> {
		// The rotation is orthonormal, so its inverse is its transpose
		Matrix4::from(self.orientation().transpose()) * Matrix4::from_translation(-self.position.to_vec())
	}
}

#[derive(Debug, Clone)]
pub struct Projection {
	aspect: f32,
	fovy: Rad<f32>,
	znear: f32,
	zfar: f32,
}

impl Projection {
	pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
		Self {
			aspect: width as f32 / height.max(1) as f32,
			fovy: fovy.into(),
			znear,
			zfar,
		}
	}

	pub fn resize(&mut self, width: u32, height: u32) {
		self.aspect = width as f32 / height.max(1) as f32;
	}

	pub fn znear(&self) -> f32 {
		self.znear
	}

	pub fn calc_matrix(&self) -> Matrix4<f32> {
		OPENGL_TO_WGPU_MATRIX * cgmath::perspective(self.fovy, self.aspect, self.znear, self.zfar)
	}
}

/// Maps a point in normalized device coordinates back into world space.
pub fn unproject(view_proj: Matrix4<f32>, ndc: Point3<f32>) -> Option<Point3<f32>> {
	let inverse = view_proj.invert()?;
	let world = inverse * Vector4::new(ndc.x, ndc.y, ndc.z, 1.0);
	if world.w == 0.0 {
		return None;
	}
	Some(Point3::from_homogeneous(world))
}

#[derive(Debug)]
pub struct CameraController {
	speed: f32,
	sensitivity: f32,
}

impl CameraController {
	pub fn new(speed: f32, sensitivity: f32) -> Self {
		Self {
			speed,
			sensitivity,
		}
	}

	pub fn update_camera(&self, camera: &mut Camera, input: &FrameInput, dt: f32) {
		let delta = input.cursor.delta;
		camera.rotate(Deg(-delta.x * self.sensitivity), Deg(-delta.y * self.sensitivity));

		// Walk on the horizontal plane regardless of where the camera looks
		let (yaw_sin, yaw_cos) = Rad::from(camera.yaw()).0.sin_cos();
		let forward = Vector3::new(-yaw_sin, 0.0, -yaw_cos);
		let right = Vector3::new(yaw_cos, 0.0, -yaw_sin);

		let axis = |positive: VirtualKeyCode, negative: VirtualKeyCode| {
			input.keys.pressed(positive) as i32 as f32 - input.keys.pressed(negative) as i32 as f32
		};

		let mut movement = forward * axis(VirtualKeyCode::W, VirtualKeyCode::S)
			+ right * axis(VirtualKeyCode::D, VirtualKeyCode::A)
			+ Vector3::unit_y() * axis(VirtualKeyCode::Space, VirtualKeyCode::LShift);

		if !movement.is_zero() {
			movement = movement.normalize();
		}
		camera.position += movement * self.speed * dt;
	}
}

#[cfg(test)]
mod tests {
	use cgmath::Vector2;

	use super::*;

	fn assert_close(actual: Vector3<f32>, expected: Vector3<f32>, epsilon: f32) {
		assert!((actual - expected).magnitude() < epsilon, "{:?} != {:?}", actual, expected);
	}

	#[test]
	fn pitch_is_clamped() {
		let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));

		camera.rotate(Deg(0.0), Deg(1.0e9));
		assert_eq!(camera.pitch(), Deg(PITCH_LIMIT));

		camera.rotate(Deg(0.0), Deg(-3.0e7));
		assert_eq!(camera.pitch(), Deg(-PITCH_LIMIT));

		let camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(400.0));
		assert_eq!(camera.pitch(), Deg(PITCH_LIMIT));
	}

	#[test]
	fn mouse_motion_never_escapes_the_pitch_limit() {
		let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
		let controller = CameraController::new(1.0, 0.5);
		let mut input = FrameInput::default();

		for _ in 0..100 {
			input.cursor.delta = Vector2::new(13.0, -5000.0);
			controller.update_camera(&mut camera, &input, 0.016);
			assert!(camera.pitch().0 <= PITCH_LIMIT && camera.pitch().0 >= -PITCH_LIMIT);
		}
		assert_eq!(camera.pitch(), Deg(PITCH_LIMIT));
	}

	#[test]
	fn forward_follows_yaw_and_pitch() {
		let camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
		assert_close(camera.forward(), -Vector3::unit_z(), 1e-6);

		let camera = Camera::new((0.0, 0.0, 0.0), Deg(90.0), Deg(0.0));
		assert_close(camera.forward(), -Vector3::unit_x(), 1e-6);

		let camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(-89.0));
		assert!(camera.forward().y < -0.99);
	}

	#[test]
	fn view_matrix_inverts_the_camera_transform() {
		let camera = Camera::new((3.0, -7.0, 12.5), Deg(37.0), Deg(-21.0));

		let product = camera.calc_matrix() * camera.transform();
		let identity = Matrix4::<f32>::identity();
		for column in 0..4 {
			assert_close(product[column].truncate(), identity[column].truncate(), 1e-5);
			assert!((product[column].w - identity[column].w).abs() < 1e-5);
		}
	}

	#[test]
	fn screen_center_unprojects_onto_the_near_plane() {
		let camera = Camera::new((1.0, 2.0, 3.0), Deg(-30.0), Deg(15.0));
		let projection = Projection::new(800, 600, Deg(70.0), 0.1, 100.0);
		let view_proj = projection.calc_matrix() * camera.calc_matrix();

		let center = unproject(view_proj, Point3::new(0.0, 0.0, 0.0)).unwrap();
		let expected = camera.position + camera.forward() * projection.znear();

		assert_close(center.to_vec(), expected.to_vec(), 1e-3);
	}

	#[test]
	fn walking_forward_moves_along_the_view() {
		let mut camera = Camera::new((0.0, 0.0, 0.0), Deg(0.0), Deg(45.0));
		let controller = CameraController::new(2.0, 0.1);
		let mut input = FrameInput::default();
		input.keys.press(VirtualKeyCode::W);

		controller.update_camera(&mut camera, &input, 0.5);

		assert_close(camera.position.to_vec(), Vector3::new(0.0, 0.0, -1.0), 1e-6);
	}
}
