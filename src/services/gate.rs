use crate::cli::Mode;
use crate::domain::constants::GATE_SCHEMA_VERSION;
use crate::domain::errors::ConfigError;
use crate::domain::models::{
    ContractDocument, ContractReport, ContractStatus, GateCheckConfig, GateCheckResult,
    GateConfig, GateHealthReport, GateStatus, Severity,
};

/// Gate checks from config, or every known contract as a required check.
pub fn resolve_checks(
    gate: &GateConfig,
    contracts: &[ContractDocument],
) -> Result<Vec<GateCheckConfig>, ConfigError> {
    if gate.checks.is_empty() {
        return Ok(contracts
            .iter()
            .map(|c| GateCheckConfig {
                contract: c.name.clone(),
                required: true,
            })
            .collect());
    }
    for check in &gate.checks {
        if !contracts.iter().any(|c| c.name == check.contract) {
            return Err(ConfigError::UnknownGateContract(check.contract.clone()));
        }
    }
    Ok(gate.checks.clone())
}

fn reason_codes(report: &ContractReport) -> Vec<String> {
    let mut codes: Vec<String> = report
        .violations
        .iter()
        .map(|v| v.reason_code.as_str().to_string())
        .collect();
    codes.sort();
    codes.dedup();
    codes
}

/// `reports` must line up with `checks`.
pub fn build_gate_health(
    checks: &[GateCheckConfig],
    reports: &[ContractReport],
    mode: Mode,
    generated_at: String,
) -> GateHealthReport {
    let mut results = Vec::new();
    let mut blocking = Vec::new();
    let mut recommendations = Vec::new();
    let mut degraded = false;

    for (check, report) in checks.iter().zip(reports) {
        match report.status {
            ContractStatus::Fail if check.required => {
                blocking.push(check.contract.clone());
                recommendations.push(format!(
                    "Fix {} ({}) and re-run `gatecheck contract check {} --mode {}` before release.",
                    report.artifact,
                    reason_codes(report).join(", "),
                    check.contract,
                    mode.as_str()
                ));
            }
            ContractStatus::Fail => {
                degraded = true;
                recommendations.push(format!(
                    "Optional check {} is failing ({}); review {}.",
                    check.contract,
                    reason_codes(report).join(", "),
                    report.artifact
                ));
            }
            ContractStatus::Skipped => {
                degraded = true;
                recommendations.push(format!(
                    "Produce {} so that {} is evaluated instead of skipped.",
                    report.artifact, check.contract
                ));
            }
            ContractStatus::Pass => {
                if report
                    .violations
                    .iter()
                    .any(|v| v.severity == Severity::Warning)
                {
                    degraded = true;
                }
            }
        }
        results.push(GateCheckResult {
            contract: check.contract.clone(),
            required: check.required,
            status: report.status.as_str().to_string(),
            reason_codes: reason_codes(report),
            artifact_sha256: report.artifact_sha256.clone(),
        });
    }

    let status = if !blocking.is_empty() {
        GateStatus::Blocked
    } else if degraded {
        GateStatus::Degraded
    } else {
        GateStatus::Healthy
    };

    GateHealthReport {
        schema_version: GATE_SCHEMA_VERSION.to_string(),
        status,
        mode,
        generated_at,
        checks: results,
        blocking,
        recommendations,
    }
}
