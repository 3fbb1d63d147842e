use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::KilnError;

/// A language API tables can be generated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
	En,
	Zh,
}

impl Language {
	pub const ALL: [Language; 2] = [Language::En, Language::Zh];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::En => "en",
			Self::Zh => "zh",
		}
	}

	pub fn locale(self) -> &'static Locale {
		match self {
			Self::En => &EN,
			Self::Zh => &ZH,
		}
	}
}

impl fmt::Display for Language {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Language {
	type Err = KilnError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"en" => Ok(Self::En),
			"zh" => Ok(Self::Zh),
			other => Err(KilnError::UnknownLanguage(other.to_string())),
		}
	}
}

/// Strings used in generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
	pub property: &'static str,
	pub description: &'static str,
	pub r#type: &'static str,
	pub default_value: &'static str,
	pub required: &'static str,
	pub class_name: &'static str,
	pub style: &'static str,
	pub children: &'static str,
	pub disabled: &'static str,
}

pub static EN: Locale = Locale {
	property: "Property",
	description: "Description",
	r#type: "Type",
	default_value: "Default Value",
	required: "Required",
	class_name: "Additional css class name",
	style: "Additional inline style",
	children: "Content",
	disabled: "Whether the component is disabled",
};

pub static ZH: Locale = Locale {
	property: "属性",
	description: "说明",
	r#type: "类型",
	default_value: "默认值",
	required: "必选",
	class_name: "额外的类名",
	style: "额外的内联样式",
	children: "内容",
	disabled: "是否禁用",
};
