//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `runtime.rs`: preflight/contract/doctor commands.
//! - `admin.rs`: gate build/verify/pubkey.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.
//! - Handlers return the process exit code; `main` exits with it.

pub mod admin;
pub mod runtime;

pub use admin::handle_gate_commands;
pub use runtime::handle_runtime_commands;
