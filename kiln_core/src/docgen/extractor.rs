use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::KilnError;
use crate::KilnResult;
use crate::docgen::ComponentDoc;
use crate::docgen::ParseTool;

/// Placeholder replaced with the absolute entry path in tool commands.
pub const FILE_PLACEHOLDER: &str = "{file}";

/// What an extraction tool produced for one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
	/// Ready-made markdown (`documentation`).
	Markdown(String),
	/// Component prop descriptions (`react-docgen-typescript`).
	Components(Vec<ComponentDoc>),
}

/// Runs an external API extraction tool against a single source file.
///
/// Implementations are called from several threads at once, one per
/// entry.
pub trait ApiExtractor: Sync {
	fn extract(&self, tool: ParseTool, path: &Path) -> KilnResult<Extraction>;
}

/// Extracts documentation by running a shell command per tool.
///
/// `{file}` in the command is replaced with the entry path. For
/// `react-docgen-typescript` the command must print a JSON array of
/// component docs; for `documentation` its output is used as markdown.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
	root: PathBuf,
	commands: BTreeMap<ParseTool, String>,
}

impl CommandExtractor {
	/// Commands run with `root` as the working directory.
	pub fn new(root: impl Into<PathBuf>, commands: BTreeMap<ParseTool, String>) -> Self {
		Self {
			root: root.into(),
			commands,
		}
	}

	pub fn command(&self, tool: ParseTool) -> Option<&str> {
		self.commands.get(&tool).map(String::as_str)
	}
}

impl ApiExtractor for CommandExtractor {
	fn extract(&self, tool: ParseTool, path: &Path) -> KilnResult<Extraction> {
		let template = self
			.command(tool)
			.ok_or_else(|| KilnError::MissingExtractorCommand(tool.to_string()))?;
		let path_display = path.display().to_string();
		let command = template.replace(FILE_PLACEHOLDER, &path_display);

		tracing::debug!(%tool, %command, "running extraction tool");
		let stdout = execute(&self.root, &command, &path_display)?;

		match tool {
			ParseTool::Documentation => Ok(Extraction::Markdown(stdout)),
			ParseTool::ReactDocgenTypescript => parse_component_docs(&stdout, &path_display)
				.map(Extraction::Components),
		}
	}
}

/// Parse the JSON printed by `react-docgen-typescript`. Whitespace-only
/// output means the file exports no components.
pub fn parse_component_docs(output: &str, path_display: &str) -> KilnResult<Vec<ComponentDoc>> {
	if output.trim().is_empty() {
		return Ok(Vec::new());
	}

	serde_json::from_str(output).map_err(|e| KilnError::ExtractorOutput {
		path: path_display.to_string(),
		reason: e.to_string(),
	})
}

fn execute(root: &Path, command: &str, path_display: &str) -> KilnResult<String> {
	let output = if cfg!(windows) {
		Command::new("cmd")
			.arg("/C")
			.arg(command)
			.current_dir(root)
			.output()?
	} else {
		Command::new("sh")
			.arg("-c")
			.arg(command)
			.current_dir(root)
			.output()?
	};

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
		let reason = if stderr.is_empty() {
			format!(
				"command exited with status {}",
				output
					.status
					.code()
					.map_or_else(|| "unknown".to_string(), |code| code.to_string())
			)
		} else {
			stderr
		};

		return Err(KilnError::Extractor {
			path: path_display.to_string(),
			reason,
		});
	}

	Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
