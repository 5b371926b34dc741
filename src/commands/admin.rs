use crate::*;
use std::path::Path;

/// Returns `None` when the command is not a gate command.
pub fn handle_gate_commands(cli: &Cli, root: &Path) -> anyhow::Result<Option<i32>> {
    let Commands::Gate { command } = &cli.command else {
        return Ok(None);
    };

    let code = match command {
        GateCommands::Build {
            mode,
            out,
            sign_key,
            enforce,
        } => {
            let config = load_config(root, cli.config.as_deref())?;
            let contracts = load_contracts(&contracts_dir(root, &config))?;
            let checks = resolve_checks(&config.gate, &contracts)?;
            let mut reports = Vec::with_capacity(checks.len());
            for check in &checks {
                let contract = find_contract(&contracts, &check.contract)?;
                reports.push(check_contract(root, contract, *mode));
            }
            let health = build_gate_health(&checks, &reports, *mode, unix_now());

            let out_path = gate_out_path(root, &config, out.as_deref());
            let body = format!("{}\n", serde_json::to_string_pretty(&health)?);
            write_file(&out_path, body.as_bytes())?;
            tracing::info!(path = %out_path.display(), status = health.status.as_str(), "gate health written");
            if let Some(key_path) = sign_key {
                let key = load_signing_key(&artifact::resolve(root, key_path))?;
                let sig = sign_status(&key, &out_path, body.as_bytes())?;
                tracing::info!(path = %sig.display(), "gate health signed");
            }
            audit(
                root,
                "gate_build",
                serde_json::json!({
                    "status": health.status.as_str(),
                    "mode": mode.as_str(),
                    "blocking": health.blocking,
                    "signed": sign_key.is_some()
                }),
            );

            let blocked = health.status == GateStatus::Blocked;
            print_report(cli.json, !blocked, &health, |h| {
                let mut lines = vec![format!("gate: {} ({})", h.status.as_str(), h.mode.as_str())];
                lines.extend(
                    h.checks
                        .iter()
                        .map(|c| format!("{}\t{}\trequired={}", c.contract, c.status, c.required)),
                );
                lines.extend(h.recommendations.iter().map(|r| format!("- {r}")));
                lines
            })?;
            if *enforce && blocked {
                1
            } else {
                0
            }
        }
        GateCommands::Verify {
            status,
            trusted_keys,
        } => {
            let status_path = artifact::resolve(root, status);
            let keys_path = match trusted_keys {
                Some(k) => artifact::resolve(root, k),
                None => root.join(TRUSTED_KEYS_FILE),
            };
            let keys = load_trusted_pubkeys(&keys_path)?;
            let verified = verify_status_signature(&status_path, &keys)?;
            let report = GateVerifyReport {
                status_file: status_path.to_string_lossy().to_string(),
                trusted_key_count: keys.len(),
                verified,
            };
            print_report(cli.json, verified, &report, |r| {
                vec![format!(
                    "verified={} keys={} file={}",
                    r.verified, r.trusted_key_count, r.status_file
                )]
            })?;
            if verified {
                0
            } else {
                1
            }
        }
        GateCommands::Pubkey { sign_key } => {
            let key = load_signing_key(&artifact::resolve(root, sign_key))?;
            let public = public_key_hex(&key);
            print_report(cli.json, true, &public, |p| vec![p.clone()])?;
            0
        }
    };

    Ok(Some(code))
}
