use crate::domain::models::{CheckItem, ConfigFile, DoctorReport, Step};
use crate::services::config::{contracts_dir, load_config};
use crate::services::contracts::{lint_contracts, load_contracts};
use crate::services::gate::resolve_checks;
use crate::services::preflight::plan;
use std::path::{Path, PathBuf};

fn item(name: impl Into<String>, status: &str) -> CheckItem {
    CheckItem {
        name: name.into(),
        status: status.to_string(),
    }
}

fn ok_or(cond: bool, otherwise: &str) -> &str {
    if cond {
        "ok"
    } else {
        otherwise
    }
}

/// A program is resolvable if it is a path that exists (relative to root)
/// or a bare name found on `PATH`.
pub fn program_resolvable(root: &Path, program: &str) -> bool {
    if program.contains('/') || program.contains(std::path::MAIN_SEPARATOR) {
        let p = PathBuf::from(program);
        let p = if p.is_absolute() { p } else { root.join(p) };
        return p.is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

pub fn doctor(root: &Path, config_override: Option<&str>, python: &str) -> DoctorReport {
    let mut checks = vec![item("root_exists", ok_or(root.is_dir(), "missing"))];

    let config = match load_config(root, config_override) {
        Ok(c) => {
            checks.push(item("config", "ok"));
            c
        }
        Err(e) => {
            tracing::warn!(error = %e, "config invalid");
            checks.push(item("config", "invalid"));
            ConfigFile::default()
        }
    };

    let dir = contracts_dir(root, &config);
    checks.push(item("contracts_dir", ok_or(dir.is_dir(), "missing")));
    match lint_contracts(&dir) {
        Ok(items) => {
            for i in items {
                let status = ok_or(i.problems.is_empty(), "invalid");
                checks.push(item(format!("contract:{}", i.file), status));
            }
        }
        Err(_) => checks.push(item("contracts_readable", "invalid")),
    }

    checks.push(item(
        "python_interpreter",
        ok_or(program_resolvable(root, python), "missing"),
    ));
    let steps: Vec<Step> = plan(&config, python);
    for step in &steps {
        checks.push(item(
            format!("step:{}", step.name),
            ok_or(program_resolvable(root, &step.program), "missing"),
        ));
    }

    if let Ok(contracts) = load_contracts(&dir) {
        let gate_ok = resolve_checks(&config.gate, &contracts).is_ok();
        checks.push(item("gate_checks", ok_or(gate_ok, "invalid")));
    }

    let overall = if checks.iter().all(|c| c.status == "ok") {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport { overall, checks }
}
