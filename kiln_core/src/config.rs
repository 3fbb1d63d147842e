use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::KilnError;
use crate::KilnResult;
use crate::docgen::CommandExtractor;
use crate::docgen::DocGenOptions;
use crate::docgen::Entries;
use crate::docgen::Language;
use crate::docgen::ParseTool;
use crate::progress::ProgressOptions;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["kiln.toml", ".kiln.toml", ".config/kiln.toml"];

/// Default directory generated API docs are written to.
pub const DEFAULT_OUT_DIR: &str = "api";

/// Configuration loaded from a `kiln.toml` file.
///
/// ```toml
/// [progress]
/// id = "client"
/// clear_on_done = false
/// show_recompile_log = true
///
/// [docgen]
/// languages = ["en", "zh"]
/// api_parse_tool = "react-docgen-typescript"
/// out_dir = "api"
///
/// [docgen.entries]
/// Button = "src/button/index.tsx"
///
/// [docgen.tools]
/// react-docgen-typescript = "npx react-docgen-typescript {file}"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct KilnConfig {
	/// Defaults for every progress plugin.
	#[serde(default)]
	pub progress: ProgressOptions,
	/// Documentation generator settings.
	#[serde(default)]
	pub docgen: DocgenConfig,
}

/// The `[docgen]` table.
#[derive(Debug, Deserialize)]
pub struct DocgenConfig {
	/// Source files to document.
	#[serde(default)]
	pub entries: Entries,
	/// Languages to generate tables in. Defaults to English only.
	#[serde(default = "default_languages")]
	pub languages: Vec<Language>,
	/// Tool applied to a flat `entries` map.
	#[serde(default, alias = "apiParseTool")]
	pub api_parse_tool: ParseTool,
	/// Directory entry paths are relative to. Defaults to the project root.
	#[serde(default, alias = "appDir")]
	pub app_dir: Option<PathBuf>,
	/// Where generated markdown is written, relative to the project root.
	#[serde(default = "default_out_dir", alias = "outDir")]
	pub out_dir: PathBuf,
	/// Shell command per extraction tool. `{file}` is replaced with the
	/// absolute entry path.
	#[serde(default)]
	pub tools: BTreeMap<ParseTool, String>,
}

impl Default for DocgenConfig {
	fn default() -> Self {
		Self {
			entries: Entries::default(),
			languages: default_languages(),
			api_parse_tool: ParseTool::default(),
			app_dir: None,
			out_dir: default_out_dir(),
			tools: BTreeMap::new(),
		}
	}
}

fn default_languages() -> Vec<Language> {
	vec![Language::En]
}

fn default_out_dir() -> PathBuf {
	PathBuf::from(DEFAULT_OUT_DIR)
}

impl DocgenConfig {
	/// Resolve the app directory against the project `root`.
	pub fn app_dir(&self, root: &Path) -> PathBuf {
		match &self.app_dir {
			Some(dir) => root.join(dir),
			None => root.to_path_buf(),
		}
	}

	pub fn out_dir(&self, root: &Path) -> PathBuf {
		root.join(&self.out_dir)
	}

	pub fn options(&self, root: &Path) -> DocGenOptions {
		DocGenOptions {
			entries: self.entries.clone(),
			languages: self.languages.clone(),
			api_parse_tool: self.api_parse_tool,
			app_dir: self.app_dir(root),
		}
	}

	pub fn extractor(&self, root: &Path) -> CommandExtractor {
		CommandExtractor::new(self.app_dir(root), self.tools.clone())
	}
}

impl KilnConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> KilnResult<Option<KilnConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults when there is
	/// none.
	pub fn load_or_default(root: &Path) -> KilnResult<KilnConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn parse(content: &str) -> KilnResult<KilnConfig> {
		toml::from_str(content).map_err(|e| KilnError::ConfigParse(e.to_string()))
	}
}
