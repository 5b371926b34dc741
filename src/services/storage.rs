use crate::domain::constants::AUDIT_LOG;
use std::path::{Path, PathBuf};

/// Appends one event to `<root>/.gatecheck/audit.jsonl`. Failures are logged
/// and never abort the command that triggered them.
pub fn audit(root: &Path, action: &str, data: serde_json::Value) {
    let path = root.join(AUDIT_LOG);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let event = serde_json::json!({
        "ts": unix_now(),
        "action": action,
        "data": data
    });
    let line = format!("{}\n", event);
    let res = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut f| std::io::Write::write_all(&mut f, line.as_bytes()));
    if let Err(e) = res {
        tracing::warn!(path = %path.display(), error = %e, "could not append audit event");
    }
}

pub fn unix_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    ts.to_string()
}

/// Writes `body` to `path`, creating parent directories.
pub fn write_file(path: &Path, body: &[u8]) -> anyhow::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    Ok(path.to_path_buf())
}
