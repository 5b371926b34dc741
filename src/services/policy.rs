use crate::cli::Mode;
use crate::domain::models::{ContractDocument, Severity, Violation};

/// Errors always block. Warnings block only a release gate.
pub fn severity_blocks(mode: Mode, severity: Severity) -> bool {
    match severity {
        Severity::Error => true,
        Severity::Warning => mode == Mode::Release,
    }
}

pub fn violation_blocks(mode: Mode, v: &Violation) -> bool {
    severity_blocks(mode, v.severity)
}

/// Whether a missing artifact fails the contract in this mode, or is skipped.
pub fn artifact_required(contract: &ContractDocument, mode: Mode) -> bool {
    contract.required_in.contains(&mode)
}
