use std::time::Duration;

use instant::Instant;

/// Frame clock. The first update only starts the clock, so the first frame sees a zero delta.
#[derive(Debug, Clone)]
pub struct Time {
	delta: Duration,
	last_update: Option<Instant>,
	delta_seconds: f32,
	time_since_startup: Duration,
	startup: Instant,
}

impl Default for Time {
	fn default() -> Self {
		Self {
			delta: Duration::from_secs(0),
			last_update: None,
			delta_seconds: 0.0,
			time_since_startup: Duration::from_secs(0),
			startup: Instant::now(),
		}
	}
}

impl Time {
	pub fn update(&mut self) {
		self.update_with_instant(Instant::now());
	}

	pub fn update_with_instant(&mut self, instant: Instant) {
		if let Some(last_update) = self.last_update {
			self.delta = instant - last_update;
			self.delta_seconds = self.delta.as_secs_f32();
		}

		self.time_since_startup = instant - self.startup;
		self.last_update = Some(instant);
	}

	pub fn delta(&self) -> Duration {
		self.delta
	}

	pub fn delta_seconds(&self) -> f32 {
		self.delta_seconds
	}

	pub fn time_since_startup(&self) -> Duration {
		self.time_since_startup
	}
}
