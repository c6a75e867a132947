//! A Frames Per Second counter.

use std::collections::VecDeque;
use std::time::Duration;

use instant::Instant;

#[derive(Debug)]
pub struct FpsCounter {
	last_second_frames: VecDeque<Instant>,
	last_report: Option<Instant>,
}

impl Default for FpsCounter {
	fn default() -> Self {
		Self {
			last_second_frames: VecDeque::with_capacity(128),
			last_report: None,
		}
	}
}

impl FpsCounter {
	pub fn tick(&mut self) -> usize {
		self.tick_at(Instant::now())
	}

	pub fn tick_at(&mut self, now: Instant) -> usize {
		let a_second_ago = now.checked_sub(Duration::from_secs(1));

		while let (Some(front), Some(a_second_ago)) = (self.last_second_frames.front(), a_second_ago) {
			if *front >= a_second_ago {
				break;
			}
			self.last_second_frames.pop_front();
		}

		self.last_second_frames.push_back(now);

		let fps = self.last_second_frames.len();
		let due = self.last_report.map_or(true, |last| now - last >= Duration::from_secs(1));
		if due {
			log::debug!("{} fps", fps);
			self.last_report = Some(now);
		}
		fps
	}
}
