//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `config.rs`: `gatecheck.toml` loading, defaults and overrides.
//! - `preflight.rs`: fail-fast step sequence behind the `StepExecutor` seam.
//! - `contracts.rs`: contract document loading/lint and artifact evaluation.
//! - `rules.rs`: single-rule evaluation against a JSON document.
//! - `policy.rs`: mode policy (what blocks in dev/ci/release).
//! - `gate.rs`: gate health status assembly.
//! - `trust.rs`: ed25519 signing/verification of gate status files.
//! - `doctor.rs`: readiness report for the gated repository.
//! - `storage.rs`: audit log + file writes.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod contracts;
pub mod doctor;
pub mod gate;
pub mod output;
pub mod policy;
pub mod preflight;
pub mod rules;
pub mod storage;
pub mod trust;
