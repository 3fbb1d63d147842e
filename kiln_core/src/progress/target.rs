use std::io::IsTerminal;

/// Decides whether progress is drawn in place or logged line by line.
///
/// Queried on every progress tick, since the answer can change over a
/// session (for example when output starts being piped).
pub trait RenderTarget {
	fn is_interactive(&self) -> bool;
}

/// Interactive whenever standard output is a terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl RenderTarget for Stdout {
	fn is_interactive(&self) -> bool {
		std::io::stdout().is_terminal()
	}
}

/// A fixed answer, used to force a mode.
impl RenderTarget for bool {
	fn is_interactive(&self) -> bool {
		*self
	}
}
