use std::collections::BTreeMap;

use serde::Deserialize;

use crate::docgen::Language;

/// Props rendered even without a description, with a localized fallback.
const WELL_KNOWN_PROPS: [&str; 4] = ["className", "style", "disabled", "children"];

/// Component documentation as emitted by `react-docgen-typescript`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentDoc {
	pub display_name: String,
	pub description: String,
	/// Props keyed by name. Rendered in name order.
	pub props: BTreeMap<String, PropItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropItem {
	pub name: String,
	pub description: String,
	pub required: bool,
	pub r#type: PropType,
	pub default_value: Option<DefaultValue>,
	pub declarations: Option<Vec<Declaration>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PropType {
	pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultValue {
	#[serde(default, deserialize_with = "value_to_string")]
	pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Declaration {
	pub file_name: String,
	pub name: String,
}

/// Stringify a default value. Falsy values (`null`, `false`, `0` and `""`)
/// become empty so the table shows `-` for them.
#[allow(clippy::float_cmp)]
fn value_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: serde::Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	Ok(match value {
		serde_json::Value::Null | serde_json::Value::Bool(false) => String::new(),
		serde_json::Value::Number(n) if n.as_f64().is_some_and(|n| n == 0.0) => String::new(),
		serde_json::Value::String(s) => s,
		other => other.to_string(),
	})
}

impl PropItem {
	/// A prop is kept when it has no declarations or when at least one
	/// declaration lives outside `node_modules`.
	pub fn is_declared_locally(&self) -> bool {
		match &self.declarations {
			Some(declarations) if !declarations.is_empty() => declarations
				.iter()
				.any(|declaration| !declaration.file_name.contains("node_modules")),
			_ => true,
		}
	}

	fn is_documented(&self) -> bool {
		!self.description.is_empty() || WELL_KNOWN_PROPS.contains(&self.name.as_str())
	}
}

impl ComponentDoc {
	/// Drop props inherited from dependencies.
	pub fn retain_local_props(&mut self) {
		self.props.retain(|_, prop| prop.is_declared_locally());
	}
}

/// Render markdown property tables for `docs` in `language`.
pub fn generate_table(docs: &[ComponentDoc], language: Language) -> String {
	docs.iter()
		.map(|doc| component_table(doc, language))
		.collect::<Vec<_>>()
		.join("\n")
}

fn component_table(doc: &ComponentDoc, language: Language) -> String {
	let t = language.locale();
	let mut table = String::new();

	if !doc.display_name.is_empty() {
		table.push_str(&format!("### {}\n\n", doc.display_name));
	}

	if !doc.description.is_empty() {
		table.push_str(&format!("**{}**\n\n", doc.description));
	}

	table.push_str(&format!(
		"|{}|{}|{}|{}|\n|:---:|:---:|:---:|:---:|\n",
		t.property, t.description, t.r#type, t.default_value
	));

	for prop in doc.props.values().filter(|prop| prop.is_documented()) {
		let cells = [
			prop.name.clone(),
			describe(prop, language),
			type_cell(prop, language),
			default_cell(prop),
		];
		let row = cells
			.iter()
			.map(|cell| escape_pipes(cell))
			.collect::<Vec<_>>()
			.join("|");
		table.push_str(&format!("|{row}|\n"));
	}

	table
}

fn describe(prop: &PropItem, language: Language) -> String {
	if !prop.description.is_empty() {
		return prop.description.clone();
	}

	let t = language.locale();
	match prop.name.as_str() {
		"className" => t.class_name.to_string(),
		"style" => t.style.to_string(),
		"children" => t.children.to_string(),
		"disabled" => t.disabled.to_string(),
		_ => String::new(),
	}
}

fn type_cell(prop: &PropItem, language: Language) -> String {
	let name = prop.r#type.name.replace('|', "\\|");
	if prop.required {
		format!("`{name}` **({})**", language.locale().required)
	} else {
		format!("`{name}`")
	}
}

fn default_cell(prop: &PropItem) -> String {
	let value = prop
		.default_value
		.as_ref()
		.map(|default| default.value.as_str())
		.filter(|value| !value.is_empty())
		.unwrap_or("-");
	format!("`{value}`")
}

/// Replace every `|` not preceded by a backslash with `&#124;` so it cannot
/// break the table layout.
pub fn escape_pipes(cell: &str) -> String {
	let mut escaped = String::with_capacity(cell.len());
	let mut previous = None;

	for ch in cell.chars() {
		if ch == '|' && previous != Some('\\') {
			escaped.push_str("&#124;");
		} else {
			escaped.push(ch);
		}
		previous = Some(ch);
	}

	escaped
}
