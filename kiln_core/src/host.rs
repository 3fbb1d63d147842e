//! Lifecycle hooks exposed by the build tool.
//!
//! The build tool owns a [`CompilerHooks`] registry and fires its three
//! hooks in order for every compilation pass: `compile` when the pass
//! starts, `progress` repeatedly while it runs and `done` once it
//! finishes. Plugins register handlers with the `tap_*` methods.

use serde::Deserialize;

use crate::KilnError;
use crate::KilnResult;

/// Outcome of a compilation pass as reported to `done` handlers.
pub trait CompileStats {
	fn has_errors(&self) -> bool;

	fn warning_count(&self) -> usize {
		0
	}
}

/// Plain compile stats carrying the reported error and warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Stats {
	#[serde(default)]
	pub errors: Vec<String>,
	#[serde(default)]
	pub warnings: Vec<String>,
}

impl CompileStats for Stats {
	fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	fn warning_count(&self) -> usize {
		self.warnings.len()
	}
}

impl CompileStats for bool {
	fn has_errors(&self) -> bool {
		*self
	}
}

type CompileHandler = Box<dyn FnMut()>;
type ProgressHandler = Box<dyn FnMut(f64, &str)>;
type DoneHandler = Box<dyn FnMut(&dyn CompileStats)>;

/// Registry of handlers for the build tool's lifecycle hooks.
#[derive(Default)]
pub struct CompilerHooks {
	compile: Vec<(String, CompileHandler)>,
	progress: Vec<(String, ProgressHandler)>,
	done: Vec<(String, DoneHandler)>,
}

impl CompilerHooks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn tap_compile(&mut self, name: impl Into<String>, handler: impl FnMut() + 'static) {
		self.compile.push((name.into(), Box::new(handler)));
	}

	pub fn tap_progress(
		&mut self,
		name: impl Into<String>,
		handler: impl FnMut(f64, &str) + 'static,
	) {
		self.progress.push((name.into(), Box::new(handler)));
	}

	pub fn tap_done(
		&mut self,
		name: impl Into<String>,
		handler: impl FnMut(&dyn CompileStats) + 'static,
	) {
		self.done.push((name.into(), Box::new(handler)));
	}

	pub fn call_compile(&mut self) {
		for (_, handler) in &mut self.compile {
			handler();
		}
	}

	/// `percentage` is the raw fraction in `[0, 1]`.
	pub fn call_progress(&mut self, percentage: f64, message: &str) {
		for (_, handler) in &mut self.progress {
			handler(percentage, message);
		}
	}

	pub fn call_done(&mut self, stats: &dyn CompileStats) {
		for (_, handler) in &mut self.done {
			handler(stats);
		}
	}

	/// Names of every registered handler, grouped by hook.
	pub fn tapped(&self) -> Vec<(&'static str, &str)> {
		let compile = self.compile.iter().map(|(name, _)| ("compile", name.as_str()));
		let progress = self.progress.iter().map(|(name, _)| ("progress", name.as_str()));
		let done = self.done.iter().map(|(name, _)| ("done", name.as_str()));
		compile.chain(progress).chain(done).collect()
	}
}

impl std::fmt::Debug for CompilerHooks {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompilerHooks")
			.field("tapped", &self.tapped())
			.finish()
	}
}

/// Something that attaches itself to a compiler's hooks.
pub trait Plugin {
	fn name(&self) -> &str;
	fn apply(&self, hooks: &mut CompilerHooks);
}

/// One line of the build tool's newline-delimited JSON event stream.
///
/// ```json
/// {"event":"compile","target":"client"}
/// {"event":"progress","target":"client","percentage":0.5,"message":"building"}
/// {"event":"done","target":"client","errors":[]}
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
#[non_exhaustive]
pub enum HostEvent {
	Compile {
		#[serde(default)]
		target: Option<String>,
	},
	Progress {
		#[serde(default)]
		target: Option<String>,
		percentage: f64,
		#[serde(default)]
		message: String,
	},
	Done {
		#[serde(default)]
		target: Option<String>,
		#[serde(default)]
		errors: Vec<String>,
		#[serde(default)]
		warnings: Vec<String>,
	},
}

impl HostEvent {
	/// Parse a single event line.
	pub fn parse(line: &str, line_number: usize) -> KilnResult<Self> {
		serde_json::from_str(line).map_err(|e| KilnError::EventParse {
			line: line_number,
			reason: e.to_string(),
		})
	}

	pub fn target(&self) -> Option<&str> {
		match self {
			Self::Compile { target } | Self::Progress { target, .. } | Self::Done { target, .. } => {
				target.as_deref()
			}
		}
	}
}
