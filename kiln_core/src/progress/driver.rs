use std::io::BufRead;
use std::rc::Rc;

use crate::KilnResult;
use crate::host::CompilerHooks;
use crate::host::HostEvent;
use crate::host::Plugin;
use crate::host::Stats;
use crate::progress::ProgressBus;
use crate::progress::ProgressOptions;
use crate::progress::ProgressPlugin;
use crate::progress::RenderTarget;

/// Feeds a build tool's event stream into one [`ProgressPlugin`] per
/// compile target.
///
/// A compiler (hook registry plus its plugin) is created the first time a
/// target is seen. Every plugin shares the same bus, so concurrent targets
/// such as `client` and `server` are drawn together.
pub struct EventDriver<T> {
	bus: Rc<ProgressBus>,
	defaults: ProgressOptions,
	target: T,
	compilers: Vec<Compiler>,
}

struct Compiler {
	hooks: CompilerHooks,
	plugin: ProgressPlugin,
}

impl<T: RenderTarget + Clone + 'static> EventDriver<T> {
	/// `defaults` supplies the options for every plugin. Its `id` is used
	/// for events that name no target.
	pub fn new(bus: Rc<ProgressBus>, defaults: ProgressOptions, target: T) -> Self {
		Self {
			bus,
			defaults,
			target,
			compilers: Vec::new(),
		}
	}

	pub fn bus(&self) -> &Rc<ProgressBus> {
		&self.bus
	}

	pub fn plugin(&self, id: &str) -> Option<&ProgressPlugin> {
		self.compilers
			.iter()
			.map(|compiler| &compiler.plugin)
			.find(|plugin| plugin.id() == id)
	}

	pub fn dispatch(&mut self, event: HostEvent) {
		let id = event.target().unwrap_or(&self.defaults.id).to_string();
		let compiler = self.compiler(&id);

		match event {
			HostEvent::Compile { .. } => compiler.hooks.call_compile(),
			HostEvent::Progress {
				percentage,
				message,
				..
			} => compiler.hooks.call_progress(percentage, &message),
			HostEvent::Done {
				errors, warnings, ..
			} => compiler.hooks.call_done(&Stats { errors, warnings }),
		}
	}

	/// Dispatch every newline-delimited JSON event from `reader`. Blank
	/// lines are skipped. Returns the number of events dispatched.
	pub fn run(&mut self, reader: impl BufRead) -> KilnResult<usize> {
		let mut count = 0;

		for (index, line) in reader.lines().enumerate() {
			let line = line?;
			let line = line.trim();
			if line.is_empty() {
				continue;
			}

			let event = HostEvent::parse(line, index + 1)?;
			self.dispatch(event);
			count += 1;
		}

		Ok(count)
	}

	fn compiler(&mut self, id: &str) -> &mut Compiler {
		let position = self
			.compilers
			.iter()
			.position(|compiler| compiler.plugin.id() == id);

		let index = match position {
			Some(index) => index,
			None => {
				tracing::debug!(id, "tracking new compile target");
				let options = ProgressOptions {
					id: id.to_string(),
					..self.defaults.clone()
				};
				let plugin = ProgressPlugin::new(options, Rc::clone(&self.bus), self.target.clone());
				let mut hooks = CompilerHooks::new();
				plugin.apply(&mut hooks);
				self.compilers.push(Compiler { hooks, plugin });
				self.compilers.len() - 1
			}
		};

		&mut self.compilers[index]
	}
}
