use assert_cmd::cargo::cargo_bin_cmd;

fn run_help(args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("gatecheck");
    cmd.args(args).arg("--help").assert().success();
}

#[test]
fn every_cli_command_has_help_path() {
    // top-level
    run_help(&[]);

    run_help(&["preflight"]);
    run_help(&["preflight", "run"]);
    run_help(&["preflight", "plan"]);

    run_help(&["contract"]);
    run_help(&["contract", "list"]);
    run_help(&["contract", "lint"]);
    run_help(&["contract", "check"]);

    run_help(&["gate"]);
    run_help(&["gate", "build"]);
    run_help(&["gate", "verify"]);
    run_help(&["gate", "pubkey"]);

    run_help(&["doctor"]);
}
