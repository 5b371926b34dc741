use crate::domain::constants::{
    CONFIG_FILE, DEFAULT_CONTRACTS_DIR, DEFAULT_GATE_OUT, DEFAULT_PYTHON,
};
use crate::domain::errors::ConfigError;
use crate::domain::models::ConfigFile;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub fn config_path(root: &Path, explicit: Option<&str>) -> PathBuf {
    match explicit {
        Some(p) => PathBuf::from(p),
        None => root.join(CONFIG_FILE),
    }
}

/// Loads `gatecheck.toml`. A missing file means every default applies.
pub fn load_config(root: &Path, explicit: Option<&str>) -> anyhow::Result<ConfigFile> {
    let path = config_path(root, explicit);
    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path)?;
    let config: ConfigFile = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.clone(),
        message: e.to_string(),
    })?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &ConfigFile) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for (index, step) in config.preflight.steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            return Err(ConfigError::EmptyStepField {
                index,
                field: "name",
            });
        }
        if step.program.trim().is_empty() {
            return Err(ConfigError::EmptyStepField {
                index,
                field: "program",
            });
        }
        if !seen.insert(step.name.clone()) {
            return Err(ConfigError::DuplicateStep(step.name.clone()));
        }
    }
    Ok(())
}

pub fn python_interpreter(config: &ConfigFile, cli_override: Option<&str>) -> String {
    cli_override
        .map(str::to_string)
        .or_else(|| config.preflight.python.clone())
        .unwrap_or_else(|| DEFAULT_PYTHON.to_string())
}

pub fn contracts_dir(root: &Path, config: &ConfigFile) -> PathBuf {
    root.join(
        config
            .contracts
            .dir
            .as_deref()
            .unwrap_or(DEFAULT_CONTRACTS_DIR),
    )
}

pub fn gate_out_path(root: &Path, config: &ConfigFile, cli_override: Option<&str>) -> PathBuf {
    root.join(
        cli_override
            .or(config.gate.out.as_deref())
            .unwrap_or(DEFAULT_GATE_OUT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert!(config.preflight.steps.is_empty());
        assert_eq!(python_interpreter(&config, None), DEFAULT_PYTHON);
        assert_eq!(
            contracts_dir(tmp.path(), &config),
            tmp.path().join("contracts")
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_config(tmp.path(), missing.to_str()).is_err());
    }

    #[test]
    fn parses_steps_and_gate_checks() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("gatecheck.toml"),
            r#"
[preflight]
python = "python3"

[[preflight.steps]]
name = "lint"
program = "{python}"
args = ["-m", "ruff", "check", "."]

[contracts]
dir = "policy/contracts"

[gate]
out = "out/gate.json"

[[gate.checks]]
contract = "sensitivity"

[[gate.checks]]
contract = "comparability"
required = false
"#,
        )
        .unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config.preflight.steps.len(), 1);
        assert_eq!(python_interpreter(&config, None), "python3");
        assert_eq!(python_interpreter(&config, Some("py")), "py");
        assert!(config.gate.checks[0].required);
        assert!(!config.gate.checks[1].required);
        assert_eq!(
            gate_out_path(tmp.path(), &config, None),
            tmp.path().join("out/gate.json")
        );
    }

    #[test]
    fn rejects_duplicate_step_names() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("gatecheck.toml"),
            r#"
[[preflight.steps]]
name = "lint"
program = "ruff"

[[preflight.steps]]
name = "lint"
program = "ruff"
"#,
        )
        .unwrap();
        let err = load_config(tmp.path(), None).unwrap_err();
        assert!(err.to_string().contains("duplicate preflight step name"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("gatecheck.toml"), "[preflight]\nshell = \"bash\"\n")
            .unwrap();
        assert!(load_config(tmp.path(), None).is_err());
    }
}
