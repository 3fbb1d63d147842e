mod common;

use kiln_core::AnyEmptyResult;
use kiln_core::KilnConfig;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::kiln_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created"));

	let config_path = tmp.path().join("kiln.toml");
	let content = std::fs::read_to_string(&config_path)?;
	assert!(content.contains("[progress]"));
	assert!(content.contains("[docgen]"));

	// The generated config should be loadable.
	let config = KilnConfig::load(tmp.path())?.expect("config");
	assert_eq!(config.progress.id, "Modern");
	assert!(config.docgen.entries.is_empty());

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let config_path = tmp.path().join(".kiln.toml");
	std::fs::write(&config_path, "existing config")?;

	common::kiln_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert_eq!(std::fs::read_to_string(&config_path)?, "existing config");
	assert!(!tmp.path().join("kiln.toml").exists());

	Ok(())
}
