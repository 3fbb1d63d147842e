mod common;

use kiln_core::AnyEmptyResult;

const EVENT: &str = "{\"event\":\"progress\",\"percentage\":0.5,\"message\":\"m\"}\n";

#[test]
fn dotfile_config_is_discovered() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".kiln.toml"), "[progress]\nid = \"dot\"\n")?;

	common::kiln_cmd()
		.arg("progress")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(EVENT)
		.assert()
		.success()
		.stderr(predicates::str::contains("[dot] 50% m"));

	Ok(())
}

#[test]
fn nested_config_is_discovered() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/kiln.toml"),
		"[progress]\nid = \"nested\"\n",
	)?;

	common::kiln_cmd()
		.arg("progress")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(EVENT)
		.assert()
		.success()
		.stderr(predicates::str::contains("[nested] 50% m"));

	Ok(())
}

#[test]
fn root_config_wins_over_other_candidates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join("kiln.toml"), "[progress]\nid = \"root\"\n")?;
	std::fs::write(tmp.path().join(".kiln.toml"), "[progress]\nid = \"dot\"\n")?;
	std::fs::write(
		tmp.path().join(".config/kiln.toml"),
		"[progress]\nid = \"nested\"\n",
	)?;

	common::kiln_cmd()
		.arg("progress")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(EVENT)
		.assert()
		.success()
		.stderr(predicates::str::contains("[root] 50% m"));

	Ok(())
}

#[test]
fn invalid_config_exits_with_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("kiln.toml"), "[progress\n")?;

	common::kiln_cmd()
		.arg("progress")
		.arg("--path")
		.arg(tmp.path())
		.write_stdin(EVENT)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
