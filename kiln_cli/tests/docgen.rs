#![cfg(unix)]

mod common;

use std::path::Path;

use kiln_core::AnyEmptyResult;

const BUTTON_JSON: &str = r#"[
  {
    "displayName": "Button",
    "description": "A clickable button.",
    "props": {
      "size": {
        "name": "size",
        "description": "Button size",
        "required": false,
        "type": { "name": "\"small\" | \"large\"" },
        "defaultValue": { "value": "small" }
      },
      "onClick": {
        "name": "onClick",
        "description": "",
        "required": true,
        "type": { "name": "() => void" },
        "defaultValue": null
      }
    }
  }
]"#;

fn setup_project(root: &Path) -> AnyEmptyResult {
	std::fs::create_dir_all(root.join("src"))?;
	std::fs::write(root.join("src/button.json"), BUTTON_JSON)?;
	std::fs::write(root.join("src/guide.md"), "# Guide\n\nHello.\n")?;
	std::fs::write(
		root.join("kiln.toml"),
		r#"[docgen]
languages = ["en", "zh"]

[docgen.entries.react-docgen-typescript]
Button = "src/button.json"

[docgen.entries.documentation]
Guide = "src/guide.md"

[docgen.tools]
react-docgen-typescript = "cat '{file}'"
documentation = "cat '{file}'"
"#,
	)?;
	Ok(())
}

#[test]
fn generates_one_file_per_entry_and_language() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	setup_project(tmp.path())?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Wrote 3 API doc(s)."));

	let api = tmp.path().join("api");
	let english = std::fs::read_to_string(api.join("Button-en.md"))?;
	assert!(english.starts_with("### Button\n\n**A clickable button.**\n\n"));
	assert!(english.contains("|Property|Description|Type|Default Value|"));
	assert!(english.contains("|size|Button size|`\"small\" \\| \"large\"`|`small`|"));
	assert!(!english.contains("onClick"));

	let chinese = std::fs::read_to_string(api.join("Button-zh.md"))?;
	assert!(chinese.contains("|属性|说明|类型|默认值|"));

	let guide = std::fs::read_to_string(api.join("Guide.md"))?;
	similar_asserts::assert_eq!(guide, "# Guide\n\nHello.\n");

	Ok(())
}

#[test]
fn second_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	setup_project(tmp.path())?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::kiln_cmd()
		.arg("docgen")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("All API docs are already up to date."));

	Ok(())
}

#[test]
fn check_fails_until_docs_are_generated() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	setup_project(tmp.path())?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Check failed: 3 API doc(s) are out of date."));

	assert!(!tmp.path().join("api").exists());

	common::kiln_cmd()
		.arg("docgen")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::kiln_cmd()
		.arg("docgen")
		.arg("--check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Check passed"));

	std::fs::write(tmp.path().join("api/Guide.md"), "edited by hand\n")?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--check")
		.arg("--verbose")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("Check failed: 1 API doc(s) are out of date."))
		.stderr(predicates::str::contains("-edited by hand"))
		.stderr(predicates::str::contains("+# Guide"));

	Ok(())
}

#[test]
fn out_flag_overrides_configured_directory() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	setup_project(tmp.path())?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--out")
		.arg("docs/api")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("docs/api/Button-en.md").exists());
	assert!(!tmp.path().join("api").exists());

	Ok(())
}

#[test]
fn failing_entries_are_reported_and_skipped() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	setup_project(tmp.path())?;
	std::fs::remove_file(tmp.path().join("src/button.json"))?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("Generate API table error"))
		.stdout(predicates::str::contains("Wrote 1 API doc(s)."));

	assert!(tmp.path().join("api/Guide.md").exists());
	assert!(!tmp.path().join("api/Button-en.md").exists());

	Ok(())
}

#[test]
fn no_entries_is_a_warning() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::kiln_cmd()
		.arg("docgen")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("no entries configured"));

	Ok(())
}
