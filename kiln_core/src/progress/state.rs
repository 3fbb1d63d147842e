use std::time::Duration;

use serde::Serialize;

/// The latest known status of one compile target.
///
/// Callers always hand over a complete state. The bus replaces entries
/// wholesale and never merges fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
	/// Compile target label, e.g. `client` or `server`.
	pub id: String,
	/// Percentage in `[0, 100]`.
	pub current: f64,
	/// Description of the current build phase.
	pub message: String,
	/// `true` once `current` reaches 100.
	pub done: bool,
	/// Whether the last finished compile reported errors.
	pub has_errors: bool,
	/// Formatted duration of the last finished compile. `None` while a
	/// compile is running.
	pub compile_time: Option<String>,
}

impl ProgressState {
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			current: 0.0,
			message: String::new(),
			done: false,
			has_errors: false,
			compile_time: None,
		}
	}

	/// The percentage rounded to a whole number for display.
	pub fn percent(&self) -> u8 {
		self.current.clamp(0.0, 100.0).round() as u8
	}
}

const UNITS: [(&str, f64); 5] = [
	("h", 3_600_000_000_000.0),
	("m", 60_000_000_000.0),
	("s", 1_000_000_000.0),
	("ms", 1_000_000.0),
	("μs", 1_000.0),
];

/// Format an elapsed duration with two decimals in the largest unit that
/// keeps the value at or above one, e.g. `3.21s` or `120.50ms`.
pub fn format_duration(duration: Duration) -> String {
	let nanos = duration.as_nanos() as f64;

	for (unit, size) in UNITS {
		if nanos >= size {
			return format!("{:.2}{unit}", nanos / size);
		}
	}

	format!("{}ns", duration.as_nanos())
}
