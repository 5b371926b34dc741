//! Fail-fast preflight sequence.
//!
//! Steps run one at a time from the repository root. The first step that
//! exits non-zero stops the run; every later step is reported `not_run`
//! and is never spawned. The failing step's exit code becomes the
//! preflight exit code.

use crate::domain::constants::{
    DEFAULT_PREFLIGHT_STEPS, EXIT_SIGNAL_BASE, EXIT_SPAWN_FAILED, PYTHON_PLACEHOLDER,
};
use crate::domain::models::{ConfigFile, PreflightReport, Step, StepResult, StepStatus};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;

/// Runs one step and returns its exit code.
pub trait StepExecutor {
    fn execute(&mut self, step: &Step) -> i32;
}

/// Spawns steps as child processes rooted at the repository.
pub struct ProcessExecutor {
    root: PathBuf,
    stdout_to_stderr: bool,
}

impl ProcessExecutor {
    pub fn new(root: &Path, stdout_to_stderr: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            stdout_to_stderr,
        }
    }
}

impl StepExecutor for ProcessExecutor {
    fn execute(&mut self, step: &Step) -> i32 {
        let stdout = if self.stdout_to_stderr {
            Stdio::from(std::io::stderr())
        } else {
            Stdio::inherit()
        };
        let status = Command::new(&step.program)
            .args(&step.args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .status();
        match status {
            Ok(s) => exit_code_of(s),
            Err(e) => {
                tracing::error!(step = %step.name, program = %step.program, error = %e, "failed to spawn step");
                EXIT_SPAWN_FAILED
            }
        }
    }
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(sig)) => EXIT_SIGNAL_BASE + sig,
        (None, None) => 1,
    }
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

fn expand(raw: &str, python: &str) -> String {
    raw.replace(PYTHON_PLACEHOLDER, python)
}

/// Resolves the configured steps, or the default lint/tests/contract
/// sequence when none are configured.
pub fn plan(config: &ConfigFile, python: &str) -> Vec<Step> {
    if config.preflight.steps.is_empty() {
        return DEFAULT_PREFLIGHT_STEPS
            .iter()
            .map(|(name, argv)| Step {
                name: name.to_string(),
                program: expand(argv[0], python),
                args: argv[1..].iter().map(|a| expand(a, python)).collect(),
            })
            .collect();
    }
    config
        .preflight
        .steps
        .iter()
        .map(|s| Step {
            name: s.name.clone(),
            program: expand(&s.program, python),
            args: s.args.iter().map(|a| expand(a, python)).collect(),
        })
        .collect()
}

pub fn run(steps: &[Step], executor: &mut dyn StepExecutor) -> PreflightReport {
    let mut results = Vec::with_capacity(steps.len());
    let mut failure: Option<(String, i32)> = None;

    for step in steps {
        if failure.is_some() {
            results.push(StepResult {
                name: step.name.clone(),
                command: step.display(),
                status: StepStatus::NotRun,
                exit_code: None,
                duration_ms: 0,
            });
            continue;
        }

        tracing::info!(step = %step.name, command = %step.display(), "running preflight step");
        let started = Instant::now();
        let code = executor.execute(step);
        let duration_ms = started.elapsed().as_millis() as u64;

        let status = if code == 0 {
            tracing::info!(step = %step.name, duration_ms, "preflight step passed");
            StepStatus::Passed
        } else {
            tracing::error!(step = %step.name, exit_code = code, "preflight step failed, stopping");
            failure = Some((step.name.clone(), code));
            StepStatus::Failed
        };
        results.push(StepResult {
            name: step.name.clone(),
            command: step.display(),
            status,
            exit_code: Some(code),
            duration_ms,
        });
    }

    let (overall, failed_step, exit_code) = match failure {
        Some((name, code)) => ("failed", Some(name), code),
        None => ("ok", None, 0),
    };
    PreflightReport {
        overall: overall.to_string(),
        failed_step,
        exit_code,
        steps: results,
    }
}
