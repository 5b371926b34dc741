use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("preflight step {index} has an empty {field}")]
    EmptyStepField { index: usize, field: &'static str },
    #[error("duplicate preflight step name: {0}")]
    DuplicateStep(String),
    #[error("gate check references unknown contract: {0}")]
    UnknownGateContract(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ContractError {
    #[error("contract not found: {0}")]
    NotFound(String),
    #[error("duplicate contract name: {0}")]
    Duplicate(String),
    #[error("invalid contract {file}: {message}")]
    Invalid { file: String, message: String },
}

#[derive(thiserror::Error, Debug)]
pub enum TrustError {
    #[error("signing key must be 32 bytes of hex, got {0} bytes")]
    KeyLength(usize),
    #[error("signature file missing: {0}")]
    SignatureMissing(PathBuf),
}
