use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum KilnError {
	#[error(transparent)]
	#[diagnostic(code(kiln::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(kiln::config_parse),
		help("check that kiln.toml is valid TOML with [progress] and/or [docgen] sections")
	)]
	ConfigParse(String),

	#[error("invalid build event on line {line}: {reason}")]
	#[diagnostic(
		code(kiln::event_parse),
		help(
			"each line must be a JSON object with an `event` field of `compile`, `progress` or \
			 `done`"
		)
	)]
	EventParse { line: usize, reason: String },

	#[error("failed to extract API document from `{path}`: {reason}")]
	#[diagnostic(code(kiln::extractor))]
	Extractor { path: String, reason: String },

	#[error("extraction tool returned unreadable output for `{path}`: {reason}")]
	#[diagnostic(
		code(kiln::extractor_output),
		help("the react-docgen-typescript command must print a JSON array of component docs")
	)]
	ExtractorOutput { path: String, reason: String },

	#[error("no command configured for extraction tool `{0}`")]
	#[diagnostic(
		code(kiln::missing_extractor_command),
		help("add the tool under [docgen.tools] in kiln.toml")
	)]
	MissingExtractorCommand(String),

	#[error("unknown documentation language: `{0}`")]
	#[diagnostic(code(kiln::unknown_language), help("supported languages: en, zh"))]
	UnknownLanguage(String),
}

pub type KilnResult<T> = Result<T, KilnError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
