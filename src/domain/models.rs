use crate::cli::Mode;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

// ---- config (gatecheck.toml) ----

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub preflight: PreflightConfig,
    #[serde(default)]
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub gate: GateConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PreflightConfig {
    pub python: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct StepConfig {
    pub name: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ContractsConfig {
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    pub out: Option<String>,
    #[serde(default)]
    pub checks: Vec<GateCheckConfig>,
}

fn default_required() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GateCheckConfig {
    pub contract: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

// ---- preflight ----

/// A resolved preflight step: `{python}` already expanded.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
}

impl Step {
    pub fn display(&self) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Passed,
    Failed,
    NotRun,
}

#[derive(Debug, Serialize)]
pub struct StepResult {
    pub name: String,
    pub command: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct PreflightReport {
    pub overall: String,
    pub failed_step: Option<String>,
    pub exit_code: i32,
    pub steps: Vec<StepResult>,
}

// ---- contracts ----

fn default_required_in() -> Vec<Mode> {
    vec![Mode::Ci, Mode::Release]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ContractDocument {
    pub schema_version: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub artifact: String,
    #[serde(default = "default_required_in")]
    pub required_in: Vec<Mode>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Rule {
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(flatten)]
    pub kind: RuleKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl JsonType {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Number => "number",
            JsonType::Integer => "integer",
            JsonType::Boolean => "boolean",
            JsonType::Null => "null",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    Required,
    Type { expected: JsonType },
    OneOf { values: Vec<serde_json::Value> },
    Equals { value: serde_json::Value },
    Min { value: serde_json::Value },
    Max { value: serde_json::Value },
    NonEmpty,
    MinItems { value: usize },
    Schema { schema: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    ArtifactMissing,
    ArtifactUnreadable,
    MissingField,
    TypeMismatch,
    ValueNotAllowed,
    ValueMismatch,
    BelowMinimum,
    AboveMaximum,
    EmptyValue,
    TooFewItems,
    SchemaViolation,
    SchemaUnavailable,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::ArtifactMissing => "ARTIFACT_MISSING",
            ReasonCode::ArtifactUnreadable => "ARTIFACT_UNREADABLE",
            ReasonCode::MissingField => "MISSING_FIELD",
            ReasonCode::TypeMismatch => "TYPE_MISMATCH",
            ReasonCode::ValueNotAllowed => "VALUE_NOT_ALLOWED",
            ReasonCode::ValueMismatch => "VALUE_MISMATCH",
            ReasonCode::BelowMinimum => "BELOW_MINIMUM",
            ReasonCode::AboveMaximum => "ABOVE_MAXIMUM",
            ReasonCode::EmptyValue => "EMPTY_VALUE",
            ReasonCode::TooFewItems => "TOO_FEW_ITEMS",
            ReasonCode::SchemaViolation => "SCHEMA_VIOLATION",
            ReasonCode::SchemaUnavailable => "SCHEMA_UNAVAILABLE",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub rule: String,
    pub severity: Severity,
    pub path: String,
    pub reason_code: ReasonCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Pass,
    Fail,
    Skipped,
}

impl ContractStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Pass => "pass",
            ContractStatus::Fail => "fail",
            ContractStatus::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractReport {
    pub contract: String,
    pub artifact: String,
    pub artifact_sha256: Option<String>,
    pub mode: Mode,
    pub status: ContractStatus,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Serialize)]
pub struct ContractLintItem {
    pub file: String,
    pub contract: Option<String>,
    pub problems: Vec<String>,
}

#[derive(Serialize)]
pub struct ContractSummary {
    pub name: String,
    pub artifact: String,
    pub rule_count: usize,
    pub description: String,
}

// ---- gate ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    Healthy,
    Degraded,
    Blocked,
}

impl GateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GateStatus::Healthy => "healthy",
            GateStatus::Degraded => "degraded",
            GateStatus::Blocked => "blocked",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GateCheckResult {
    pub contract: String,
    pub required: bool,
    pub status: String,
    pub reason_codes: Vec<String>,
    pub artifact_sha256: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GateHealthReport {
    pub schema_version: String,
    pub status: GateStatus,
    pub mode: Mode,
    pub generated_at: String,
    pub checks: Vec<GateCheckResult>,
    pub blocking: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Serialize)]
pub struct GateVerifyReport {
    pub status_file: String,
    pub trusted_key_count: usize,
    pub verified: bool,
}

// ---- doctor ----

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}
