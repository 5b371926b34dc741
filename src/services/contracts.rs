use crate::artifact::{self, ArtifactError};
use crate::cli::Mode;
use crate::domain::constants::CONTRACT_SCHEMA_VERSION;
use crate::domain::errors::ContractError;
use crate::domain::models::{
    ContractDocument, ContractLintItem, ContractReport, ContractStatus, ReasonCode, RuleKind,
    Severity, Violation,
};
use crate::services::policy::{artifact_required, violation_blocks};
use crate::services::rules;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

fn contract_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(vec![]);
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().map(|x| x == "json").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}

/// A JSON Pointer is empty or starts with `/`, and `~` only appears as
/// `~0` or `~1`.
fn is_json_pointer(path: &str) -> bool {
    if path.is_empty() {
        return true;
    }
    if !path.starts_with('/') {
        return false;
    }
    let mut chars = path.chars();
    while let Some(c) = chars.next() {
        if c == '~' && !matches!(chars.next(), Some('0' | '1')) {
            return false;
        }
    }
    true
}

fn kind_fields(kind: &str) -> &'static [&'static str] {
    match kind {
        "type" => &["expected"],
        "one_of" => &["values"],
        "equals" | "min" | "max" | "min_items" => &["value"],
        "schema" => &["schema"],
        _ => &[],
    }
}

/// Keys a rule object carries beyond its common fields and the fields of
/// its kind. Deserializing `Rule` drops them silently.
fn unknown_rule_keys(raw: &serde_json::Value) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(rules) = raw.get("rules").and_then(|r| r.as_array()) else {
        return problems;
    };
    for rule in rules {
        let Some(obj) = rule.as_object() else {
            continue;
        };
        let id = obj.get("id").and_then(|v| v.as_str()).unwrap_or("?");
        let kind = obj.get("kind").and_then(|v| v.as_str()).unwrap_or_default();
        for key in obj.keys() {
            let common = matches!(key.as_str(), "id" | "kind" | "path" | "severity");
            if !common && !kind_fields(kind).contains(&key.as_str()) {
                problems.push(format!("rule {id}: unknown field {key:?} for kind {kind}"));
            }
        }
    }
    problems
}

fn structural_problems(doc: &ContractDocument) -> Vec<String> {
    let mut problems = Vec::new();
    if doc.schema_version != CONTRACT_SCHEMA_VERSION {
        problems.push(format!(
            "unsupported schema_version {} (expected {CONTRACT_SCHEMA_VERSION})",
            doc.schema_version
        ));
    }
    if doc.name.trim().is_empty() {
        problems.push("name must be non-empty".to_string());
    }
    if doc.artifact.trim().is_empty() {
        problems.push("artifact must be non-empty".to_string());
    }
    let mut ids = HashSet::new();
    for rule in &doc.rules {
        if rule.id.trim().is_empty() {
            problems.push("rule id must be non-empty".to_string());
        } else if !ids.insert(rule.id.as_str()) {
            problems.push(format!("duplicate rule id: {}", rule.id));
        }
        if !is_json_pointer(&rule.path) {
            problems.push(format!(
                "rule {}: path {:?} is not a JSON Pointer",
                rule.id, rule.path
            ));
        }
        match &rule.kind {
            RuleKind::Min { value } | RuleKind::Max { value } if !value.is_number() => {
                problems.push(format!("rule {}: threshold must be a number", rule.id));
            }
            RuleKind::OneOf { values } if values.is_empty() => {
                problems.push(format!("rule {}: one_of needs at least one value", rule.id));
            }
            RuleKind::Schema { schema } if schema.trim().is_empty() => {
                problems.push(format!("rule {}: schema path must be non-empty", rule.id));
            }
            _ => {}
        }
    }
    problems
}

/// Structural validation of every contract document in `dir`, one item per file.
pub fn lint_contracts(dir: &Path) -> anyhow::Result<Vec<ContractLintItem>> {
    let mut items = Vec::new();
    let mut names = HashSet::new();
    for file in contract_files(dir)? {
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let parsed: Result<(serde_json::Value, ContractDocument), String> =
            std::fs::read_to_string(&file)
                .map_err(|e| e.to_string())
                .and_then(|raw| serde_json::from_str::<serde_json::Value>(&raw).map_err(|e| e.to_string()))
                .and_then(|raw: serde_json::Value| {
                    let doc = serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;
                    Ok((raw, doc))
                });
        let item = match parsed {
            Ok((raw, doc)) => {
                let mut problems = structural_problems(&doc);
                problems.extend(unknown_rule_keys(&raw));
                if !names.insert(doc.name.clone()) {
                    problems.push(ContractError::Duplicate(doc.name.clone()).to_string());
                }
                ContractLintItem {
                    file: file_name,
                    contract: Some(doc.name),
                    problems,
                }
            }
            Err(e) => ContractLintItem {
                file: file_name,
                contract: None,
                problems: vec![format!("parse error: {e}")],
            },
        };
        items.push(item);
    }
    Ok(items)
}

/// Loads every contract in `dir`, sorted by file name. Any structural
/// problem is an error.
pub fn load_contracts(dir: &Path) -> anyhow::Result<Vec<ContractDocument>> {
    if let Some(bad) = lint_contracts(dir)?
        .into_iter()
        .find(|i| !i.problems.is_empty())
    {
        return Err(ContractError::Invalid {
            file: bad.file,
            message: bad.problems.join("; "),
        }
        .into());
    }
    let mut out = Vec::new();
    for file in contract_files(dir)? {
        let raw = std::fs::read_to_string(&file)?;
        out.push(serde_json::from_str(&raw)?);
    }
    Ok(out)
}

pub fn find_contract<'a>(
    contracts: &'a [ContractDocument],
    name: &str,
) -> Result<&'a ContractDocument, ContractError> {
    contracts
        .iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ContractError::NotFound(name.to_string()))
}

fn artifact_violation(reason_code: ReasonCode, message: String) -> Violation {
    Violation {
        rule: "artifact".to_string(),
        severity: Severity::Error,
        path: String::new(),
        reason_code,
        message,
    }
}

/// Evaluates every rule of `contract` against its artifact. Rules do not
/// short-circuit: the report lists all violations.
pub fn check_contract(root: &Path, contract: &ContractDocument, mode: Mode) -> ContractReport {
    let mut report = ContractReport {
        contract: contract.name.clone(),
        artifact: contract.artifact.clone(),
        artifact_sha256: None,
        mode,
        status: ContractStatus::Pass,
        violations: vec![],
    };

    let loaded = match artifact::load(root, &contract.artifact) {
        Ok(a) => a,
        Err(ArtifactError::Missing(path)) => {
            if artifact_required(contract, mode) {
                report.status = ContractStatus::Fail;
                report.violations.push(artifact_violation(
                    ReasonCode::ArtifactMissing,
                    format!("artifact not found: {}", path.display()),
                ));
            } else {
                tracing::info!(contract = %contract.name, mode = mode.as_str(), "artifact missing, skipping");
                report.status = ContractStatus::Skipped;
            }
            return report;
        }
        Err(e @ ArtifactError::Unreadable { .. }) => {
            if let ArtifactError::Unreadable { sha256, .. } = &e {
                report.artifact_sha256 = sha256.clone();
            }
            report.status = ContractStatus::Fail;
            report
                .violations
                .push(artifact_violation(ReasonCode::ArtifactUnreadable, e.to_string()));
            return report;
        }
    };

    tracing::debug!(path = %loaded.path.display(), sha256 = %loaded.sha256, "artifact loaded");
    report.artifact_sha256 = Some(loaded.sha256);
    for rule in &contract.rules {
        report
            .violations
            .extend(rules::evaluate(rule, &loaded.document, root));
    }
    if report.violations.iter().any(|v| violation_blocks(mode, v)) {
        report.status = ContractStatus::Fail;
    }
    tracing::debug!(
        contract = %contract.name,
        status = report.status.as_str(),
        violations = report.violations.len(),
        "contract evaluated"
    );
    report
}
