use std::cell::RefCell;
use std::fmt::Write as _;
use std::io;
use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Style;

use crate::progress::ProgressState;

/// Width of the progress bar in characters.
pub const BAR_WIDTH: usize = 25;

const CURSOR_UP: &str = "\x1b[";
const CLEAR_TO_END: &str = "\r\x1b[J";

/// How many columns a rendered line may take.
///
/// The redraw moves the cursor up one row per drawn line, so a line that
/// wraps leaves stale rows behind. Lines are cut to one column less than
/// the limit to keep the cursor off the last column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineWidth {
	/// Never cut lines.
	#[default]
	Unbounded,
	/// Use the width of the terminal attached to standard output, queried
	/// on every render. Unbounded when there is no terminal.
	Terminal,
	Fixed(usize),
}

impl LineWidth {
	/// Maximum visible characters per line, if any.
	pub fn columns(self) -> Option<usize> {
		let width = match self {
			Self::Unbounded => return None,
			Self::Terminal => {
				let (terminal_size::Width(width), _) = terminal_size::terminal_size()?;
				usize::from(width)
			}
			Self::Fixed(width) => width,
		};

		Some(width.saturating_sub(1).max(1))
	}
}

/// Holds the latest [`ProgressState`] per compile target and repaints the
/// terminal region they occupy.
///
/// One bus is created at startup and shared (usually through an `Rc`) by
/// every progress plugin writing to the same terminal. All methods take
/// `&self`; the bus is meant for a single-threaded event loop and uses a
/// `RefCell` for its bookkeeping.
pub struct ProgressBus {
	inner: RefCell<BusInner>,
}

struct BusInner {
	states: Vec<ProgressState>,
	rendered_lines: usize,
	color: bool,
	width: LineWidth,
	writer: Box<dyn Write>,
}

impl ProgressBus {
	/// A bus that paints to standard output with colors, fitting lines to
	/// the terminal width.
	pub fn new() -> Self {
		Self::with_writer(io::stdout(), true).with_line_width(LineWidth::Terminal)
	}

	pub fn with_writer(writer: impl Write + 'static, color: bool) -> Self {
		Self {
			inner: RefCell::new(BusInner {
				states: Vec::new(),
				rendered_lines: 0,
				color,
				width: LineWidth::Unbounded,
				writer: Box::new(writer),
			}),
		}
	}

	#[must_use]
	pub fn with_line_width(mut self, width: LineWidth) -> Self {
		self.inner.get_mut().width = width;
		self
	}

	/// Insert or replace the state for `state.id`. New ids are appended so
	/// targets keep a stable position on screen.
	pub fn update(&self, state: ProgressState) {
		let mut inner = self.inner.borrow_mut();

		match inner.states.iter_mut().find(|entry| entry.id == state.id) {
			Some(entry) => *entry = state,
			None => inner.states.push(state),
		}
	}

	/// Erase what the previous render drew and draw every tracked state.
	pub fn render(&self) -> io::Result<()> {
		let mut inner = self.inner.borrow_mut();
		let BusInner {
			states,
			rendered_lines,
			color,
			width,
			writer,
		} = &mut *inner;
		let columns = width.columns();

		let mut frame = String::new();
		if *rendered_lines > 0 {
			let _ = write!(frame, "{CURSOR_UP}{rendered_lines}A{CLEAR_TO_END}");
		}

		for state in states.iter() {
			frame.push_str(&fit_line(state, *color, columns));
			frame.push('\n');
		}

		writer.write_all(frame.as_bytes())?;
		writer.flush()?;
		*rendered_lines = states.len();

		Ok(())
	}

	/// Stop tracking `id` and erase its line from the terminal. Returns the
	/// removed state, if there was one.
	pub fn clear(&self, id: &str) -> io::Result<Option<ProgressState>> {
		let removed = {
			let mut inner = self.inner.borrow_mut();
			let position = inner.states.iter().position(|entry| entry.id == id);
			position.map(|index| inner.states.remove(index))
		};

		if removed.is_some() {
			self.render()?;
		}

		Ok(removed)
	}

	pub fn get(&self, id: &str) -> Option<ProgressState> {
		self.inner
			.borrow()
			.states
			.iter()
			.find(|entry| entry.id == id)
			.cloned()
	}

	pub fn states(&self) -> Vec<ProgressState> {
		self.inner.borrow().states.clone()
	}

	pub fn ids(&self) -> Vec<String> {
		self.inner
			.borrow()
			.states
			.iter()
			.map(|entry| entry.id.clone())
			.collect()
	}

	pub fn len(&self) -> usize {
		self.inner.borrow().states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.borrow().states.is_empty()
	}

	/// Number of terminal lines drawn by the last render.
	pub fn rendered_lines(&self) -> usize {
		self.inner.borrow().rendered_lines
	}
}

impl Default for ProgressBus {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ProgressBus {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("ProgressBus")
			.field("states", &inner.states)
			.field("rendered_lines", &inner.rendered_lines)
			.field("color", &inner.color)
			.field("width", &inner.width)
			.finish_non_exhaustive()
	}
}

/// Render a single state as one terminal line, without a trailing newline.
///
/// While compiling: `client ━━━━━━━━━━━━───────────── 48% building`.
/// Once done: `client compiled in 3.21s` or
/// `client compiled with errors in 3.21s`.
pub fn render_line(state: &ProgressState, color: bool) -> String {
	fit_line(state, color, None)
}

/// Like [`render_line`], but keeps at most `columns` visible characters.
/// The tail of the line (usually the message) is cut first.
pub fn fit_line(state: &ProgressState, color: bool, columns: Option<usize>) -> String {
	let mut budget = columns.unwrap_or(usize::MAX);
	let mut line = String::new();

	for (text, style) in segments(state) {
		if budget == 0 {
			break;
		}

		let count = text.chars().count();
		let text = if count > budget {
			text.chars().take(budget).collect()
		} else {
			text
		};
		budget = budget.saturating_sub(count);

		match style {
			Some(style) if color => {
				let _ = write!(line, "{}", text.style(style));
			}
			_ => line.push_str(&text),
		}
	}

	line
}

fn segments(state: &ProgressState) -> Vec<(String, Option<Style>)> {
	let id = (state.id.clone(), Some(Style::new().bold()));
	let space = || (" ".to_string(), None);

	if state.done {
		let outcome = if state.has_errors {
			"compiled with errors"
		} else {
			"compiled"
		};
		let summary = match &state.compile_time {
			Some(time) => format!("{outcome} in {time}"),
			None => outcome.to_string(),
		};
		let summary_style = if state.has_errors {
			Style::new().red()
		} else {
			Style::new().green()
		};

		return vec![id, space(), (summary, Some(summary_style))];
	}

	let filled = ((state.current.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;

	vec![
		id,
		space(),
		("━".repeat(filled), Some(Style::new().cyan())),
		("─".repeat(BAR_WIDTH - filled), Some(Style::new().dimmed())),
		space(),
		(format!("{:>3}%", state.percent()), None),
		space(),
		(state.message.clone(), Some(Style::new().dimmed())),
	]
}
