use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A JSON result file read from disk, with the digest of its exact bytes.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub sha256: String,
    pub document: serde_json::Value,
}

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("artifact not found: {0}")]
    Missing(PathBuf),
    #[error("artifact {path} is not valid JSON: {message}")]
    Unreadable {
        path: PathBuf,
        message: String,
        sha256: Option<String>,
    },
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Resolves `rel` against the root unless it is already absolute.
pub fn resolve(root: &Path, rel: &str) -> PathBuf {
    let p = PathBuf::from(rel);
    if p.is_absolute() {
        p
    } else {
        root.join(p)
    }
}

pub fn load(root: &Path, rel: &str) -> Result<Artifact, ArtifactError> {
    let path = resolve(root, rel);
    if !path.is_file() {
        return Err(ArtifactError::Missing(path));
    }
    let bytes = std::fs::read(&path).map_err(|e| ArtifactError::Unreadable {
        path: path.clone(),
        message: e.to_string(),
        sha256: None,
    })?;
    let sha256 = sha256_hex(&bytes);
    let document = serde_json::from_slice(&bytes).map_err(|e| ArtifactError::Unreadable {
        path: path.clone(),
        message: e.to_string(),
        sha256: Some(sha256.clone()),
    })?;
    Ok(Artifact {
        path,
        sha256,
        document,
    })
}

pub fn load_json_file(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn load_reports_missing_and_unreadable() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            load(tmp.path(), "results/none.json"),
            Err(ArtifactError::Missing(_))
        ));

        std::fs::write(tmp.path().join("bad.json"), "{not json").unwrap();
        match load(tmp.path(), "bad.json") {
            Err(ArtifactError::Unreadable { sha256, .. }) => assert!(sha256.is_some()),
            other => panic!("expected unreadable, got {other:?}"),
        }

        std::fs::write(tmp.path().join("ok.json"), r#"{"status":"ok"}"#).unwrap();
        let a = load(tmp.path(), "ok.json").unwrap();
        assert_eq!(a.document["status"], "ok");
        assert_eq!(a.sha256.len(), 64);
    }
}
