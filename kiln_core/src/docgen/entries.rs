use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// External tool used to extract API documentation from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Default)]
pub enum ParseTool {
	/// `documentation`: turns JSDoc comments into markdown.
	#[serde(rename = "documentation")]
	Documentation,
	/// `react-docgen-typescript`: extracts component props as JSON.
	#[default]
	#[serde(rename = "react-docgen-typescript")]
	ReactDocgenTypescript,
}

impl ParseTool {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Documentation => "documentation",
			Self::ReactDocgenTypescript => "react-docgen-typescript",
		}
	}
}

impl fmt::Display for ParseTool {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Source files to document, keyed by the name their output is stored
/// under.
///
/// Either a flat map processed with the default tool:
///
/// ```toml
/// [docgen.entries]
/// Button = "src/button/index.tsx"
/// ```
///
/// or one map per tool:
///
/// ```toml
/// [docgen.entries.react-docgen-typescript]
/// Button = "src/button/index.tsx"
///
/// [docgen.entries.documentation]
/// utils = "src/utils.ts"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Entries {
	Tool(ToolEntries),
	Flat(BTreeMap<String, PathBuf>),
}

impl Default for Entries {
	fn default() -> Self {
		Self::Flat(BTreeMap::new())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolEntries {
	#[serde(default)]
	pub documentation: BTreeMap<String, PathBuf>,
	#[serde(default, rename = "react-docgen-typescript")]
	pub react_docgen_typescript: BTreeMap<String, PathBuf>,
}

/// A single source file to run through an extraction tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub key: String,
	pub path: PathBuf,
	pub tool: ParseTool,
}

impl Entries {
	/// Flatten into a list of entries. Flat maps use `default_tool`.
	pub fn resolve(&self, default_tool: ParseTool) -> Vec<Entry> {
		match self {
			Self::Flat(map) => collect(map, default_tool),
			Self::Tool(tools) => {
				let mut entries = collect(&tools.react_docgen_typescript, ParseTool::ReactDocgenTypescript);
				entries.extend(collect(&tools.documentation, ParseTool::Documentation));
				entries
			}
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Self::Flat(map) => map.is_empty(),
			Self::Tool(tools) => {
				tools.documentation.is_empty() && tools.react_docgen_typescript.is_empty()
			}
		}
	}
}

fn collect(map: &BTreeMap<String, PathBuf>, tool: ParseTool) -> Vec<Entry> {
	map.iter()
		.map(|(key, path)| Entry {
			key: key.clone(),
			path: path.clone(),
			tool,
		})
		.collect()
}
