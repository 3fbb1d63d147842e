use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use serde::Deserialize;

use crate::host::CompileStats;
use crate::host::CompilerHooks;
use crate::host::Plugin;
use crate::progress::NonTtyLogger;
use crate::progress::PercentageSmoother;
use crate::progress::ProgressBus;
use crate::progress::ProgressState;
use crate::progress::RenderTarget;
use crate::progress::format_duration;

/// Default compile target label.
pub const DEFAULT_PROGRESS_ID: &str = "Modern";

/// Options for [`ProgressPlugin`], also read from the `[progress]` table of
/// `kiln.toml`.
///
/// ```toml
/// [progress]
/// id = "client"
/// clear_on_done = true
/// show_recompile_log = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProgressOptions {
	/// Label of the compile target shown next to its progress.
	pub id: String,
	/// Erase the target's line as soon as it reaches 100%.
	#[serde(alias = "clearOnDone")]
	pub clear_on_done: bool,
	/// Log `Recompiling...` at the start of every compile after the first.
	#[serde(alias = "showRecompileLog")]
	pub show_recompile_log: bool,
}

impl Default for ProgressOptions {
	fn default() -> Self {
		Self {
			id: DEFAULT_PROGRESS_ID.to_string(),
			clear_on_done: false,
			show_recompile_log: false,
		}
	}
}

impl ProgressOptions {
	pub fn with_id(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			..Self::default()
		}
	}
}

/// Reports compile progress for one compile target.
///
/// The plugin taps the `compile`, `progress` and `done` hooks. Every
/// progress tick is smoothed and then either pushed into the shared
/// [`ProgressBus`] and repainted, or logged as a plain line when the render
/// target is not interactive.
///
/// `has_errors` and `compile_time` describe the last *finished* compile, so
/// while a new compile ramps up its ticks still carry the previous outcome.
/// Only `compile_time` is reset when a compile starts.
#[derive(Clone)]
pub struct ProgressPlugin {
	core: Rc<PluginCore>,
}

struct PluginCore {
	options: ProgressOptions,
	bus: Rc<ProgressBus>,
	target: Box<dyn RenderTarget>,
	logger: NonTtyLogger,
	cycle: RefCell<Cycle>,
}

#[derive(Debug, Default)]
struct Cycle {
	smoother: PercentageSmoother,
	has_errors: bool,
	compile_time: Option<String>,
	started_at: Option<Instant>,
	is_recompile: bool,
}

impl ProgressPlugin {
	pub const NAME: &'static str = "ProgressPlugin";

	pub fn new(
		options: ProgressOptions,
		bus: Rc<ProgressBus>,
		target: impl RenderTarget + 'static,
	) -> Self {
		Self {
			core: Rc::new(PluginCore {
				options,
				bus,
				target: Box::new(target),
				logger: NonTtyLogger::new(),
				cycle: RefCell::new(Cycle::default()),
			}),
		}
	}

	pub fn options(&self) -> &ProgressOptions {
		&self.core.options
	}

	pub fn id(&self) -> &str {
		&self.core.options.id
	}

	pub fn bus(&self) -> &Rc<ProgressBus> {
		&self.core.bus
	}

	pub fn has_errors(&self) -> bool {
		self.core.cycle.borrow().has_errors
	}

	pub fn compile_time(&self) -> Option<String> {
		self.core.cycle.borrow().compile_time.clone()
	}

	/// `true` between a `compile` hook and its matching `done`.
	pub fn is_compiling(&self) -> bool {
		self.core.cycle.borrow().started_at.is_some()
	}

	pub fn on_compile(&self) {
		self.core.on_compile();
	}

	pub fn on_progress(&self, percentage: f64, message: &str) {
		self.core.on_progress(percentage, message);
	}

	pub fn on_done(&self, stats: &dyn CompileStats) {
		self.core.on_done(stats);
	}
}

impl Plugin for ProgressPlugin {
	fn name(&self) -> &str {
		Self::NAME
	}

	fn apply(&self, hooks: &mut CompilerHooks) {
		let core = Rc::clone(&self.core);
		hooks.tap_compile(Self::NAME, move || core.on_compile());

		let core = Rc::clone(&self.core);
		hooks.tap_progress(Self::NAME, move |percentage, message| {
			core.on_progress(percentage, message);
		});

		let core = Rc::clone(&self.core);
		hooks.tap_done(Self::NAME, move |stats| core.on_done(stats));
	}
}

impl std::fmt::Debug for ProgressPlugin {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProgressPlugin")
			.field("options", &self.core.options)
			.field("cycle", &self.core.cycle.borrow())
			.finish_non_exhaustive()
	}
}

impl PluginCore {
	fn on_compile(&self) {
		let mut cycle = self.cycle.borrow_mut();

		if cycle.is_recompile && self.options.show_recompile_log {
			tracing::info!("Recompiling...");
		}

		cycle.compile_time = None;
		cycle.started_at = Some(Instant::now());
		cycle.is_recompile = true;
	}

	fn on_progress(&self, percentage: f64, message: &str) {
		let state = {
			let mut cycle = self.cycle.borrow_mut();
			let percentage = cycle.smoother.smooth(percentage);

			ProgressState {
				id: self.options.id.clone(),
				current: percentage * 100.0,
				message: message.to_string(),
				done: is_complete(percentage),
				has_errors: cycle.has_errors,
				compile_time: cycle.compile_time.clone(),
			}
		};

		if !self.target.is_interactive() {
			self.logger.log(&state);
			return;
		}

		let done = state.done;
		self.bus.update(state);

		if let Err(e) = self.bus.render() {
			tracing::warn!(id = %self.options.id, "failed to render progress: {e}");
		}

		if done && self.options.clear_on_done {
			if let Err(e) = self.bus.clear(&self.options.id) {
				tracing::warn!(id = %self.options.id, "failed to clear progress: {e}");
			}
		}
	}

	fn on_done(&self, stats: &dyn CompileStats) {
		let mut cycle = self.cycle.borrow_mut();

		// A `done` without a preceding `compile` has nothing to time.
		let Some(started_at) = cycle.started_at.take() else {
			return;
		};

		cycle.has_errors = stats.has_errors();
		cycle.compile_time = Some(format_duration(started_at.elapsed()));

		tracing::debug!(
			id = %self.options.id,
			has_errors = cycle.has_errors,
			warnings = stats.warning_count(),
			compile_time = cycle.compile_time.as_deref().unwrap_or_default(),
			"compile finished"
		);
	}
}

#[allow(clippy::float_cmp)]
fn is_complete(percentage: f64) -> bool {
	percentage == 1.0
}
