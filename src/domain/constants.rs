pub const CONFIG_FILE: &str = "gatecheck.toml";
pub const DEFAULT_PYTHON: &str = "./.venv/bin/python3";
pub const PYTHON_PLACEHOLDER: &str = "{python}";
pub const DEFAULT_CONTRACTS_DIR: &str = "contracts";
pub const DEFAULT_GATE_OUT: &str = "status/release_gate_health.json";
pub const AUDIT_LOG: &str = ".gatecheck/audit.jsonl";
pub const TRUSTED_KEYS_FILE: &str = ".gatecheck/trusted_keys.txt";
pub const CONTRACT_SCHEMA_VERSION: &str = "1";
pub const GATE_SCHEMA_VERSION: &str = "1";

/// Shell convention for "command not found".
pub const EXIT_SPAWN_FAILED: i32 = 127;
pub const EXIT_SIGNAL_BASE: i32 = 128;

/// (name, argv) of the preflight sequence used when the config lists no steps.
pub const DEFAULT_PREFLIGHT_STEPS: &[(&str, &[&str])] = &[
    ("lint", &["{python}", "-m", "ruff", "check", "."]),
    (
        "unit-tests",
        &[
            "{python}",
            "-m",
            "pytest",
            "tests/",
            "--ignore=tests/integration",
            "-x",
            "-q",
            "--tb=short",
        ],
    ),
    (
        "provenance-contract",
        &[
            "{python}",
            "scripts/core_audit/check_provenance_runner_contract.py",
            "--root",
            ".",
            "--mode",
            "ci",
        ],
    ),
];
