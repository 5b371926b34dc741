//! Shared data model layer (structs/constants/errors only).
//!
//! ## Purpose
//! - Keep config, contract and report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON output schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs`: config, contract document, report/output structs.
//! - `constants.rs`: default paths, default preflight steps, exit codes.
//! - `errors.rs`: typed errors for config, contract and trust failures.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/process side effects.
//!
//! ## Compatibility note
//! Changes in these structs can affect `--json` outputs and the gate health file.
//! Keep schema-impacting changes explicit and synchronized with `docs/contracts/*`.

pub mod constants;
pub mod errors;
pub mod models;
