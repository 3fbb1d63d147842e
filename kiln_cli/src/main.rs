use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::IsTerminal;
use std::path::Path;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use kiln_cli::Commands;
use kiln_cli::KilnCli;
use kiln_core::KilnConfig;
use kiln_core::docgen::check_api_docs;
use kiln_core::docgen::docgen;
use kiln_core::docgen::write_api_docs;
use kiln_core::progress::EventDriver;
use kiln_core::progress::LineWidth;
use kiln_core::progress::ProgressBus;
use kiln_core::progress::RenderTarget;
use kiln_core::progress::Stdout;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = KilnCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Progress {
			input,
			id,
			clear_on_done,
			show_recompile_log,
			interactive,
			no_interactive,
		}) => {
			let mode = if *interactive {
				TargetMode::Forced(true)
			} else if *no_interactive {
				TargetMode::Forced(false)
			} else {
				TargetMode::Auto
			};
			run_progress(
				&args,
				input.as_deref(),
				id.clone(),
				*clear_on_done,
				*show_recompile_log,
				mode,
			)
		}
		Some(Commands::Docgen { out, check, watch }) => {
			run_docgen(&args, out.as_deref(), *check, *watch)
		}
		None => {
			eprintln!("No subcommand specified. Run `kiln --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<kiln_core::KilnError>() {
			Ok(kiln_err) => {
				let report: miette::Report = (*kiln_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(false)
		.with_level(verbose)
		.without_time()
		.with_ansi(use_color && io::stderr().is_terminal())
		.init();
}

fn resolve_root(args: &KilnCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Whether progress is redrawn in place.
#[derive(Debug, Clone, Copy)]
enum TargetMode {
	/// Follow standard output's terminal status.
	Auto,
	Forced(bool),
}

impl RenderTarget for TargetMode {
	fn is_interactive(&self) -> bool {
		match self {
			Self::Auto => Stdout.is_interactive(),
			Self::Forced(interactive) => *interactive,
		}
	}
}

fn run_init(args: &KilnCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = KilnConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let sample_config = "# kiln configuration\n\n# Defaults for progress reporting. \
	                     Events without a `target` use `id`.\n[progress]\nid = \"Modern\"\n\
	                     clear_on_done = false\nshow_recompile_log = false\n\n# API table \
	                     generation.\n[docgen]\nlanguages = [\"en\"]\napi_parse_tool = \
	                     \"react-docgen-typescript\"\nout_dir = \"api\"\n\n[docgen.entries]\n# \
	                     Button = \"src/button/index.tsx\"\n\n# `{file}` is replaced with the \
	                     absolute entry path.\n[docgen.tools]\n# react-docgen-typescript = \
	                     \"npx react-docgen-typescript {file}\"\n# documentation = \"npx \
	                     documentation build {file} -f md\"\n";

	let config_path = root.join("kiln.toml");
	std::fs::write(&config_path, sample_config)?;
	println!("Created {}", config_path.display());

	Ok(())
}

fn run_progress(
	args: &KilnCli,
	input: Option<&Path>,
	id: Option<String>,
	clear_on_done: bool,
	show_recompile_log: bool,
	mode: TargetMode,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let mut options = KilnConfig::load_or_default(&root)?.progress;

	if let Some(id) = id {
		options.id = id;
	}
	options.clear_on_done |= clear_on_done;
	options.show_recompile_log |= show_recompile_log;

	let bus_color = color_enabled()
		&& supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic);
	let bus = Rc::new(
		ProgressBus::with_writer(io::stdout(), bus_color).with_line_width(LineWidth::Terminal),
	);
	let mut driver = EventDriver::new(Rc::clone(&bus), options, mode);

	let count = match input {
		Some(path) => driver.run(BufReader::new(File::open(path)?))?,
		None => driver.run(io::stdin().lock())?,
	};

	tracing::debug!(events = count, targets = bus.len(), "event stream finished");

	Ok(())
}

fn run_docgen(
	args: &KilnCli,
	out: Option<&Path>,
	check: bool,
	watch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let is_stale = run_docgen_once(args, out, check)?;

	if !watch {
		if is_stale {
			process::exit(1);
		}
		return Ok(());
	}

	println!("\nWatching for file changes... (press Ctrl+C to stop)");

	let root = resolve_root(args);
	let out_dir = out_dir(args, out)?;
	let (tx, rx) = mpsc::channel();

	let mut watcher =
		notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
			if let Ok(event) = res {
				// Writes into the output directory must not retrigger a run.
				let outside_out_dir = event.paths.iter().any(|path| !path.starts_with(&out_dir));
				if outside_out_dir
					&& matches!(
						event.kind,
						notify::EventKind::Modify(_) | notify::EventKind::Create(_)
					) {
					let _ = tx.send(());
				}
			}
		})?;

	use notify::Watcher;
	watcher.watch(&root, notify::RecursiveMode::Recursive)?;

	loop {
		rx.recv()?;
		// Debounce: drain additional events within 200ms.
		while rx.recv_timeout(Duration::from_millis(200)).is_ok() {}

		println!("\nFile change detected, regenerating...");
		if let Err(e) = run_docgen_once(args, out, false) {
			eprintln!("{} {e}", colored!("error:", red));
		}
	}
}

fn out_dir(args: &KilnCli, out: Option<&Path>) -> Result<PathBuf, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	Ok(match out {
		Some(out) => root.join(out),
		None => KilnConfig::load_or_default(&root)?.docgen.out_dir(&root),
	})
}

/// Run the generator once. Returns whether any generated file is stale
/// (only meaningful with `check`).
fn run_docgen_once(
	args: &KilnCli,
	out: Option<&Path>,
	check: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = KilnConfig::load_or_default(&root)?.docgen;

	if config.entries.is_empty() {
		eprintln!(
			"{} no entries configured under [docgen.entries]",
			colored!("warning:", yellow)
		);
		return Ok(false);
	}

	let out_dir = out.map_or_else(|| config.out_dir(&root), |out| root.join(out));
	let api_doc_map = docgen(&config.options(&root), &config.extractor(&root));

	if check {
		let stale = check_api_docs(&api_doc_map, &out_dir)?;
		if stale.is_empty() {
			println!("Check passed: all API docs are up to date.");
			return Ok(false);
		}

		eprintln!("Check failed: {} API doc(s) are out of date.", stale.len());
		for doc in &stale {
			eprintln!("  {}", make_relative(&doc.path, &root));
			if args.verbose {
				print_diff(doc.current.as_deref().unwrap_or_default(), &doc.expected);
			}
		}
		eprintln!("Run `kiln docgen` to regenerate.");
		return Ok(true);
	}

	let written = write_api_docs(&api_doc_map, &out_dir)?;
	if written.is_empty() {
		println!("All API docs are already up to date.");
	} else {
		println!("Wrote {} API doc(s).", written.len());
		for path in &written {
			println!("  {}", make_relative(path, &root));
		}
	}

	Ok(false)
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
