use crate::*;
use std::path::Path;

pub fn handle_runtime_commands(cli: &Cli, root: &Path) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Preflight { command } => handle_preflight(cli, root, command),
        Commands::Contract { command } => handle_contract(cli, root, command),
        Commands::Doctor => {
            let config = load_config(root, cli.config.as_deref()).unwrap_or_default();
            let python = python_interpreter(&config, None);
            let report = doctor(root, cli.config.as_deref(), &python);
            print_report(cli.json, report.overall == "ok", &report, |r| {
                let mut lines = vec![format!("doctor: {}", r.overall)];
                lines.extend(r.checks.iter().map(|c| format!("{}\t{}", c.name, c.status)));
                lines
            })?;
            Ok(0)
        }
        // dispatched by `handle_gate_commands` before reaching here
        Commands::Gate { .. } => Ok(0),
    }
}

fn handle_preflight(cli: &Cli, root: &Path, command: &PreflightCommands) -> anyhow::Result<i32> {
    let config = load_config(root, cli.config.as_deref())?;
    match command {
        PreflightCommands::Plan { python } => {
            let steps = plan(&config, &python_interpreter(&config, python.as_deref()));
            print_out(cli.json, &steps, |s| format!("{}\t{}", s.name, s.display()))?;
            Ok(0)
        }
        PreflightCommands::Run { python } => {
            let steps = plan(&config, &python_interpreter(&config, python.as_deref()));
            let mut executor = ProcessExecutor::new(root, cli.json);
            let report = preflight::run(&steps, &mut executor);
            audit(
                root,
                "preflight",
                serde_json::json!({
                    "overall": report.overall,
                    "failed_step": report.failed_step,
                    "exit_code": report.exit_code
                }),
            );
            print_report(cli.json, report.exit_code == 0, &report, |r| {
                let mut lines: Vec<String> = r
                    .steps
                    .iter()
                    .map(|s| {
                        let status = match s.status {
                            StepStatus::Passed => "passed",
                            StepStatus::Failed => "FAILED",
                            StepStatus::NotRun => "not run",
                        };
                        format!("{}\t{}\t{}", s.name, status, s.command)
                    })
                    .collect();
                lines.push(match &r.failed_step {
                    Some(step) => format!("preflight failed at {} (exit {})", step, r.exit_code),
                    None => "preflight ok".to_string(),
                });
                lines
            })?;
            Ok(report.exit_code)
        }
    }
}

fn handle_contract(cli: &Cli, root: &Path, command: &ContractCommands) -> anyhow::Result<i32> {
    let config = load_config(root, cli.config.as_deref())?;
    let dir = contracts_dir(root, &config);
    match command {
        ContractCommands::List => {
            let contracts = load_contracts(&dir)?;
            let summaries: Vec<ContractSummary> = contracts
                .iter()
                .map(|c| ContractSummary {
                    name: c.name.clone(),
                    artifact: c.artifact.clone(),
                    rule_count: c.rules.len(),
                    description: c.description.clone(),
                })
                .collect();
            print_out(cli.json, &summaries, |s| {
                format!("{}\t{}\t{} rules", s.name, s.artifact, s.rule_count)
            })?;
            Ok(0)
        }
        ContractCommands::Lint => {
            let items = lint_contracts(&dir)?;
            let clean = items.iter().all(|i| i.problems.is_empty());
            print_report(cli.json, clean, &items, |items| {
                let mut lines = Vec::new();
                for i in items {
                    if i.problems.is_empty() {
                        lines.push(format!("{}\tok", i.file));
                    }
                    for p in &i.problems {
                        lines.push(format!("{}\t{}", i.file, p));
                    }
                }
                lines
            })?;
            Ok(if clean { 0 } else { 1 })
        }
        ContractCommands::Check { names, all, mode } => {
            let contracts = load_contracts(&dir)?;
            let selected: Vec<&ContractDocument> = if *all {
                contracts.iter().collect()
            } else {
                if names.is_empty() {
                    anyhow::bail!("name at least one contract or pass --all");
                }
                names
                    .iter()
                    .map(|n| find_contract(&contracts, n))
                    .collect::<Result<_, _>>()?
            };
            let reports: Vec<ContractReport> = selected
                .iter()
                .map(|c| check_contract(root, c, *mode))
                .collect();
            let failed: Vec<&str> = reports
                .iter()
                .filter(|r| r.status == ContractStatus::Fail)
                .map(|r| r.contract.as_str())
                .collect();
            audit(
                root,
                "contract_check",
                serde_json::json!({"mode": mode.as_str(), "checked": reports.len(), "failed": failed}),
            );
            let ok = failed.is_empty();
            print_report(cli.json, ok, &reports, |reports| {
                let mut lines = Vec::new();
                for r in reports {
                    lines.push(format!("{}\t{}\t{}", r.contract, r.status.as_str(), r.artifact));
                    for v in &r.violations {
                        lines.push(format!(
                            "  {}\t{}\t{}",
                            v.reason_code.as_str(),
                            v.rule,
                            v.message
                        ));
                    }
                }
                lines
            })?;
            Ok(if ok { 0 } else { 1 })
        }
    }
}
