mod common;

use common::TestEnv;
use predicates::str::contains;
use serde_json::json;

const SEED_HEX: &str = "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb";

/// Three shell steps that append their name to `markers.txt` and exit with
/// the given codes.
#[cfg(unix)]
fn write_marker_steps(env: &TestEnv, codes: [i32; 3]) {
    let mut toml = String::new();
    for (name, code) in ["lint", "unit-tests", "provenance-contract"].iter().zip(codes) {
        toml.push_str(&format!(
            "[[preflight.steps]]\nname = \"{name}\"\nprogram = \"sh\"\nargs = [\"-c\", \"echo {name} >> markers.txt; exit {code}\"]\n\n"
        ));
    }
    env.write("gatecheck.toml", &toml);
}

#[cfg(unix)]
fn markers(env: &TestEnv) -> Vec<String> {
    if !env.root.join("markers.txt").exists() {
        return vec![];
    }
    env.read("markers.txt").lines().map(str::to_string).collect()
}

#[cfg(unix)]
#[test]
fn preflight_runs_every_step_when_all_pass() {
    let env = TestEnv::new();
    write_marker_steps(&env, [0, 0, 0]);
    let out = env.run_json(&["preflight", "run"]);
    assert_eq!(out["ok"], true);
    assert_eq!(out["data"]["overall"], "ok");
    assert_eq!(markers(&env), vec!["lint", "unit-tests", "provenance-contract"]);

    let audit = env.read(".gatecheck/audit.jsonl");
    assert!(audit.contains("\"action\":\"preflight\""));
}

#[cfg(unix)]
#[test]
fn preflight_stops_at_first_failure_and_propagates_exit_code() {
    let all = ["lint", "unit-tests", "provenance-contract"];
    for failing in 0..3 {
        let env = TestEnv::new();
        let mut codes = [0; 3];
        codes[failing] = 3 + failing as i32;
        write_marker_steps(&env, codes);

        let out = env.run_json_code(&["preflight", "run"], 3 + failing as i32);
        assert_eq!(out["ok"], false);
        assert_eq!(out["data"]["failed_step"], all[failing]);
        assert_eq!(out["data"]["exit_code"], 3 + failing as i32);

        // later steps were never invoked
        assert_eq!(markers(&env), all[..=failing].to_vec());
        for later in failing + 1..3 {
            assert_eq!(out["data"]["steps"][later]["status"], "not_run");
        }
    }
}

#[cfg(unix)]
#[test]
fn preflight_text_mode_reports_failure() {
    let env = TestEnv::new();
    write_marker_steps(&env, [0, 1, 0]);
    env.cmd()
        .args(["preflight", "run"])
        .assert()
        .code(1)
        .stdout(contains("preflight failed at unit-tests (exit 1)"));
    common::validate(
        "preflight-report.schema.json",
        &env.run_json_code(&["preflight", "run"], 1)["data"],
    );
}

#[cfg(unix)]
#[test]
fn preflight_json_keeps_step_stdout_off_stdout() {
    let env = TestEnv::new();
    env.write(
        "gatecheck.toml",
        "[[preflight.steps]]\nname = \"chatty\"\nprogram = \"sh\"\nargs = [\"-c\", \"echo noise\"]\n",
    );
    let assert = env
        .cmd()
        .args(["--json", "preflight", "run"])
        .assert()
        .success()
        .stderr(contains("noise"));
    let out: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout is one json document");
    assert_eq!(out["data"]["overall"], "ok");
    assert_eq!(out["data"]["steps"][0]["name"], "chatty");
}

#[test]
fn preflight_with_missing_interpreter_fails_with_127() {
    let env = TestEnv::new();
    let out = env.run_json_code(&["preflight", "run"], 127);
    assert_eq!(out["data"]["failed_step"], "lint");
    assert_eq!(out["data"]["steps"][1]["status"], "not_run");
    assert_eq!(out["data"]["steps"][2]["status"], "not_run");
}

#[test]
fn gate_build_is_degraded_when_optional_artifact_missing() {
    let env = TestEnv::with_demos();
    let out = env.run_json(&["gate", "build"]);
    assert_eq!(out["data"]["status"], "degraded");
    assert_eq!(out["data"]["mode"], "release");
    assert_eq!(out["data"]["blocking"], json!([]));

    let written: serde_json::Value =
        serde_json::from_str(&env.read("status/release_gate_health.json")).unwrap();
    assert_eq!(written["status"], "degraded");
    assert_eq!(written["checks"][2]["contract"], "provenance-runner");
    assert_eq!(written["checks"][2]["reason_codes"], json!(["ARTIFACT_MISSING"]));
}

#[test]
fn gate_build_is_healthy_when_everything_passes() {
    let env = TestEnv::with_demos();
    env.write_json(
        "results/provenance_runner.json",
        &json!({"runner": {"version": "2.1.0"}, "runs": [{"id": "r1"}], "orphaned_outputs": 0}),
    );
    let out = env.run_json(&["gate", "build", "--out", "out/gate.json"]);
    assert_eq!(out["data"]["status"], "healthy");
    assert!(env.root.join("out/gate.json").exists());
}

#[test]
fn gate_enforce_exits_nonzero_when_blocked() {
    let env = TestEnv::with_demos();
    std::fs::remove_file(env.root.join("results/CONTROL_COMPARABILITY_STATUS.json")).unwrap();

    let out = env.run_json(&["gate", "build"]);
    assert_eq!(out["ok"], false);
    assert_eq!(out["data"]["status"], "blocked");
    assert_eq!(out["data"]["blocking"], json!(["control-comparability"]));

    env.run_json_code(&["gate", "build", "--enforce"], 1);
}

#[test]
fn gate_unknown_check_contract_is_an_error() {
    let env = TestEnv::with_demos();
    env.write(
        "gatecheck.toml",
        "[[gate.checks]]\ncontract = \"does-not-exist\"\n",
    );
    env.cmd()
        .args(["gate", "build"])
        .assert()
        .failure()
        .stderr(contains("unknown contract: does-not-exist"));
}

#[test]
fn gate_sign_and_verify_round_trip() {
    let env = TestEnv::with_demos();
    env.write("keys/gate.key", &format!("{SEED_HEX}\n"));

    let pubkey = env.run_json(&["gate", "pubkey", "--sign-key", "keys/gate.key"]);
    let pubkey = pubkey["data"].as_str().unwrap().to_string();
    assert_eq!(pubkey.len(), 64);

    env.run_json(&["gate", "build", "--sign-key", "keys/gate.key"]);
    assert!(env
        .root
        .join("status/release_gate_health.json.sig")
        .exists());

    // no trusted keys yet
    let untrusted = env.run_json_code(
        &["gate", "verify", "--status", "status/release_gate_health.json"],
        1,
    );
    assert_eq!(untrusted["data"]["verified"], false);

    env.write(".gatecheck/trusted_keys.txt", &format!("# release\n{pubkey}\n"));
    let verified = env.run_json(&["gate", "verify", "--status", "status/release_gate_health.json"]);
    assert_eq!(verified["data"]["verified"], true);
    assert_eq!(verified["data"]["trusted_key_count"], 1);

    // tampering breaks the signature
    let tampered = env
        .read("status/release_gate_health.json")
        .replace("degraded", "healthy");
    env.write("status/release_gate_health.json", &tampered);
    env.run_json_code(
        &["gate", "verify", "--status", "status/release_gate_health.json"],
        1,
    );
}

#[test]
fn doctor_reports_missing_interpreter() {
    let env = TestEnv::with_demos();
    let out = env.run_json(&["doctor"]);
    assert_eq!(out["ok"], false);
    assert_eq!(out["data"]["overall"], "needs_attention");
    let checks = out["data"]["checks"].as_array().unwrap();
    assert!(checks
        .iter()
        .any(|c| c["name"] == "python_interpreter" && c["status"] == "missing"));
    assert!(checks
        .iter()
        .any(|c| c["name"] == "contract:sensitivity-artifact.json" && c["status"] == "ok"));
}
