use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Render bundler progress and generate API reference tables.",
	long_about = "kiln turns a bundler's progress events into a live status display and \
	              generates markdown API tables from extracted component docs.\n\nQuick \
	              start:\n  kiln init      Create a kiln.toml\n  kiln progress  Render a \
	              build's progress event stream\n  kiln docgen    Generate API tables"
)]
pub struct KilnCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a sample `kiln.toml` in the project root.
	///
	/// If a config file already exists this command is a no-op and exits
	/// successfully.
	Init,
	/// Render a build tool's progress events.
	///
	/// Reads newline-delimited JSON events (`compile`, `progress`, `done`)
	/// from `--input` or standard input. Each event may name a `target`;
	/// every target gets its own progress line. On a terminal the lines are
	/// redrawn in place, otherwise one plain log line is written per
	/// progress event.
	Progress {
		/// Read events from this file instead of standard input.
		#[arg(long, short)]
		input: Option<PathBuf>,

		/// Label for events without a `target`. Overrides `[progress] id`.
		#[arg(long)]
		id: Option<String>,

		/// Erase a target's line once it reaches 100%.
		#[arg(long, default_value_t = false)]
		clear_on_done: bool,

		/// Log `Recompiling...` at the start of every compile after the first.
		#[arg(long, default_value_t = false)]
		show_recompile_log: bool,

		/// Always redraw in place, even when standard output is not a
		/// terminal.
		#[arg(long, default_value_t = false, conflicts_with = "no_interactive")]
		interactive: bool,

		/// Always write plain log lines.
		#[arg(long, default_value_t = false)]
		no_interactive: bool,
	},
	/// Generate API reference tables for the configured entries.
	///
	/// Runs the extraction tool configured under `[docgen.tools]` for every
	/// entry in `[docgen.entries]` and writes one markdown file per entry
	/// and language. Entries that fail to extract are reported and skipped.
	Docgen {
		/// Output directory. Overrides `[docgen] out_dir`.
		#[arg(long, short)]
		out: Option<PathBuf>,

		/// Check that generated files are up to date without writing them.
		/// Exits with a non-zero status code if any are stale.
		#[arg(long, default_value_t = false)]
		check: bool,

		/// Watch for file changes and regenerate automatically.
		#[arg(long, default_value_t = false, conflicts_with = "check")]
		watch: bool,
	},
}
