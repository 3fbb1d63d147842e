use crate::progress::ProgressState;

/// Writes one plain line per progress tick through `tracing`.
///
/// Used when the output cannot be redrawn in place. Lines never contain
/// cursor control sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonTtyLogger;

impl NonTtyLogger {
	pub fn new() -> Self {
		Self
	}

	pub fn log(&self, state: &ProgressState) {
		let line = format_line(state);

		if state.done && state.has_errors {
			tracing::error!("{line}");
		} else {
			tracing::info!("{line}");
		}
	}
}

/// The plain-text rendering of a progress state.
///
/// ```text
/// [client] 42% building modules
/// [client] 100% done (compiled in 3.21s)
/// [client] 100% done (compiled with errors in 3.21s)
/// ```
pub fn format_line(state: &ProgressState) -> String {
	let mut line = format!("[{}] {}%", state.id, state.percent());

	if !state.message.is_empty() {
		line.push(' ');
		line.push_str(&state.message);
	}

	if state.done {
		let outcome = if state.has_errors {
			"compiled with errors"
		} else {
			"compiled"
		};

		match &state.compile_time {
			Some(time) => line.push_str(&format!(" ({outcome} in {time})")),
			None => line.push_str(&format!(" ({outcome})")),
		}
	}

	line
}
