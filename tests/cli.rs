mod common;

use common::TestEnv;
use predicates::str::contains;

#[test]
fn preflight_plan_lists_default_steps() {
    let env = TestEnv::new();
    env.cmd()
        .args(["preflight", "plan"])
        .assert()
        .success()
        .stdout(contains("lint\t./.venv/bin/python3 -m ruff check ."))
        .stdout(contains(
            "unit-tests\t./.venv/bin/python3 -m pytest tests/ --ignore=tests/integration -x -q --tb=short",
        ))
        .stdout(contains(
            "provenance-contract\t./.venv/bin/python3 scripts/core_audit/check_provenance_runner_contract.py --root . --mode ci",
        ));
}

#[test]
fn preflight_plan_honors_python_override() {
    let env = TestEnv::new();
    env.cmd()
        .args(["preflight", "plan", "--python", "python3.12"])
        .assert()
        .success()
        .stdout(contains("python3.12 -m ruff check ."));
}

#[test]
fn contract_list_shows_demo_contracts() {
    let env = TestEnv::with_demos();
    env.cmd()
        .args(["contract", "list"])
        .assert()
        .success()
        .stdout(contains("control-comparability"))
        .stdout(contains("sensitivity-artifact"))
        .stdout(contains("provenance-runner"));
}

#[test]
fn unknown_contract_is_an_error() {
    let env = TestEnv::with_demos();
    env.cmd()
        .args(["contract", "check", "no-such-contract"])
        .assert()
        .failure()
        .stderr(contains("contract not found: no-such-contract"));
}

#[test]
fn check_without_names_or_all_is_an_error() {
    let env = TestEnv::with_demos();
    env.cmd()
        .args(["contract", "check"])
        .assert()
        .failure()
        .stderr(contains("--all"));
}

#[test]
fn invalid_config_is_reported() {
    let env = TestEnv::new();
    env.write("gatecheck.toml", "[preflight\n");
    env.cmd()
        .args(["preflight", "plan"])
        .assert()
        .failure()
        .stderr(contains("config parse error"));
}
