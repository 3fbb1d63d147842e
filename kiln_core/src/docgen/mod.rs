//! API reference table generation.
//!
//! Every configured entry is handed to an [`ApiExtractor`]. Component docs
//! from `react-docgen-typescript` become one markdown table per language,
//! stored as `<entry>-<language>`; markdown from `documentation` is stored
//! as-is under the entry name.

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

pub use entries::*;
pub use extractor::*;
pub use locales::*;
pub use table::*;

use crate::KilnResult;

mod entries;
mod extractor;
mod locales;
mod table;

/// Generated markdown keyed by entry (and language).
pub type ApiDocMap = BTreeMap<String, String>;

const LOG_PREFIX: &str = "[module-doc-plugin]";

/// Inputs for a documentation run.
#[derive(Debug, Clone)]
pub struct DocGenOptions {
	pub entries: Entries,
	pub languages: Vec<Language>,
	/// Tool applied to flat entry maps.
	pub api_parse_tool: ParseTool,
	/// Directory entry paths are relative to.
	pub app_dir: PathBuf,
}

/// Run the extractor for every entry in parallel and collect the generated
/// markdown.
///
/// A failing entry is logged and skipped. It never aborts the run.
pub fn docgen(options: &DocGenOptions, extractor: &dyn ApiExtractor) -> ApiDocMap {
	tracing::info!("{LOG_PREFIX} Start to generate API table...");

	let entries = options.entries.resolve(options.api_parse_tool);
	let mut api_doc_map = ApiDocMap::new();

	std::thread::scope(|scope| {
		let handles: Vec<_> = entries
			.iter()
			.map(|entry| scope.spawn(move || generate_entry(entry, options, extractor)))
			.collect();

		for (entry, handle) in entries.iter().zip(handles) {
			match handle.join() {
				Ok(docs) => api_doc_map.extend(docs),
				Err(_) => {
					tracing::error!(
						"{LOG_PREFIX} Generate API table error: extraction for `{}` panicked",
						entry.key
					);
				}
			}
		}
	});

	tracing::info!("{LOG_PREFIX} Generate API table successfully!");
	api_doc_map
}

/// Generate the docs for a single entry. Errors are logged and produce no
/// output.
pub fn generate_entry(
	entry: &Entry,
	options: &DocGenOptions,
	extractor: &dyn ApiExtractor,
) -> Vec<(String, String)> {
	let path = options.app_dir.join(&entry.path);

	match extract_entry(entry, &path, &options.languages, extractor) {
		Ok(docs) => docs,
		Err(e) => {
			tracing::error!(key = %entry.key, "{LOG_PREFIX} Generate API table error: {e}");
			Vec::new()
		}
	}
}

fn extract_entry(
	entry: &Entry,
	path: &Path,
	languages: &[Language],
	extractor: &dyn ApiExtractor,
) -> KilnResult<Vec<(String, String)>> {
	match extractor.extract(entry.tool, path)? {
		Extraction::Markdown(markdown) => Ok(vec![(entry.key.clone(), markdown)]),
		Extraction::Components(mut docs) => {
			if docs.is_empty() {
				tracing::warn!(
					"{LOG_PREFIX} Unable to parse API document in {}",
					path.display()
				);
			}

			for doc in &mut docs {
				doc.retain_local_props();
			}

			Ok(languages
				.iter()
				.map(|language| {
					(
						format!("{}-{language}", entry.key),
						generate_table(&docs, *language),
					)
				})
				.collect())
		}
	}
}

/// A generated document whose file on disk is missing or differs from the
/// generated content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleDoc {
	pub key: String,
	pub path: PathBuf,
	/// What is currently on disk; `None` when the file does not exist.
	pub current: Option<String>,
	pub expected: String,
}

/// Path a generated document is written to.
pub fn doc_path(out_dir: &Path, key: &str) -> PathBuf {
	out_dir.join(format!("{key}.md"))
}

/// Compare the generated docs with the files in `out_dir`. A missing file
/// is always stale, even for an empty document.
pub fn check_api_docs(api_doc_map: &ApiDocMap, out_dir: &Path) -> KilnResult<Vec<StaleDoc>> {
	let mut stale = Vec::new();

	for (key, expected) in api_doc_map {
		let path = doc_path(out_dir, key);
		let current = match std::fs::read_to_string(&path) {
			Ok(content) => Some(content),
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
			Err(e) => return Err(e.into()),
		};

		if current.as_deref() != Some(expected.as_str()) {
			stale.push(StaleDoc {
				key: key.clone(),
				path,
				current,
				expected: expected.clone(),
			});
		}
	}

	Ok(stale)
}

/// Write every generated doc to `out_dir`, creating it if needed. Files
/// whose content is unchanged are left alone. Returns the written paths.
pub fn write_api_docs(api_doc_map: &ApiDocMap, out_dir: &Path) -> KilnResult<Vec<PathBuf>> {
	std::fs::create_dir_all(out_dir)?;

	let mut written = Vec::new();
	for stale in check_api_docs(api_doc_map, out_dir)? {
		std::fs::write(&stale.path, &stale.expected)?;
		written.push(stale.path);
	}

	Ok(written)
}
