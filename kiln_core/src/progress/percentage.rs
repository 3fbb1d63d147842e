/// Turns the raw progress fraction reported by the build tool into a
/// "friendly" one that never moves backwards within a compile cycle.
///
/// Bundlers report progress per phase, so the raw fraction can dip when a
/// later phase starts counting from a lower value. The smoother holds the
/// highest value returned so far and only lets it grow. A raw `0` after any
/// other value starts a fresh cycle, and a raw `1.0` completes the current
/// one. Only a raw `1.0` ever produces `1.0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentageSmoother {
	previous: f64,
}

impl PercentageSmoother {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn smooth(&mut self, raw: f64) -> f64 {
		if raw.is_nan() {
			return self.previous;
		}

		let raw = raw.clamp(0.0, 1.0);

		if raw <= 0.0 || raw >= 1.0 {
			self.previous = 0.0;
			return raw;
		}

		if raw <= self.previous {
			return self.previous;
		}

		self.previous = raw;
		raw
	}

	/// The highest value returned in the current cycle, or `0.0` at the
	/// start of a cycle.
	pub fn previous(&self) -> f64 {
		self.previous
	}
}
