use assert_cmd::Command;

pub fn kiln_cmd() -> Command {
	let mut cmd = Command::cargo_bin("kiln").unwrap_or_else(|e| panic!("kiln binary: {e}"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("RUST_LOG");
	cmd
}
