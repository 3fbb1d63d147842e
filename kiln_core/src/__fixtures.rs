use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use crate::KilnError;
use crate::KilnResult;
use crate::docgen::ApiExtractor;
use crate::docgen::ComponentDoc;
use crate::docgen::Declaration;
use crate::docgen::DefaultValue;
use crate::docgen::Extraction;
use crate::docgen::ParseTool;
use crate::docgen::PropItem;
use crate::docgen::PropType;
use crate::progress::ProgressBus;

/// In-memory writer whose contents stay readable after being handed to a
/// bus.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.borrow()).to_string()
	}
}

impl Write for SharedBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.borrow_mut().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

pub fn capture_bus() -> (Rc<ProgressBus>, SharedBuffer) {
	let buffer = SharedBuffer::default();
	let bus = Rc::new(ProgressBus::with_writer(buffer.clone(), false));
	(bus, buffer)
}

/// Extractor returning canned results keyed by file name.
#[derive(Debug, Default)]
pub struct StaticExtractor {
	pub components: BTreeMap<String, Vec<ComponentDoc>>,
	pub markdown: BTreeMap<String, String>,
}

impl ApiExtractor for StaticExtractor {
	fn extract(&self, tool: ParseTool, path: &Path) -> KilnResult<Extraction> {
		let name = path
			.file_name()
			.map(|name| name.to_string_lossy().to_string())
			.unwrap_or_default();
		let missing = || KilnError::Extractor {
			path: path.display().to_string(),
			reason: "no such file".to_string(),
		};

		match tool {
			ParseTool::ReactDocgenTypescript => self
				.components
				.get(&name)
				.cloned()
				.map(Extraction::Components)
				.ok_or_else(missing),
			ParseTool::Documentation => self
				.markdown
				.get(&name)
				.cloned()
				.map(Extraction::Markdown)
				.ok_or_else(missing),
		}
	}
}

pub fn prop(name: &str, description: &str, type_name: &str) -> PropItem {
	PropItem {
		name: name.to_string(),
		description: description.to_string(),
		required: false,
		r#type: PropType {
			name: type_name.to_string(),
		},
		default_value: None,
		declarations: None,
	}
}

pub fn declared_in(mut item: PropItem, file_name: &str) -> PropItem {
	item.declarations
		.get_or_insert_with(Vec::new)
		.push(Declaration {
			file_name: file_name.to_string(),
			name: item.name.clone(),
		});
	item
}

pub fn with_default(mut item: PropItem, value: &str) -> PropItem {
	item.default_value = Some(DefaultValue {
		value: value.to_string(),
	});
	item
}

pub fn required(mut item: PropItem) -> PropItem {
	item.required = true;
	item
}

pub fn component(name: &str, description: &str, props: Vec<PropItem>) -> ComponentDoc {
	ComponentDoc {
		display_name: name.to_string(),
		description: description.to_string(),
		props: props
			.into_iter()
			.map(|item| (item.name.clone(), item))
			.collect(),
	}
}

pub fn button_doc() -> ComponentDoc {
	component(
		"Button",
		"A clickable button.",
		vec![
			with_default(prop("size", "Button size", "\"small\" | \"large\""), "\"small\""),
			required(prop("onClick", "Click handler", "() => void")),
			prop("className", "", "string"),
			prop("internal", "", "boolean"),
		],
	)
}
