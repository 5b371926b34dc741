use crate::domain::errors::TrustError;
use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use std::path::{Path, PathBuf};

pub fn signature_path(status_file: &Path) -> PathBuf {
    let mut name = status_file.as_os_str().to_owned();
    name.push(".sig");
    PathBuf::from(name)
}

fn non_comment_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

pub fn load_signing_key(path: &Path) -> anyhow::Result<SigningKey> {
    let raw = std::fs::read_to_string(path)?;
    let line = non_comment_lines(&raw).next().unwrap_or_default();
    let bytes = hex::decode(line)?;
    let seed: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| TrustError::KeyLength(bytes.len()))?;
    Ok(SigningKey::from_bytes(&seed))
}

pub fn public_key_hex(key: &SigningKey) -> String {
    hex::encode(key.verifying_key().to_bytes())
}

/// Signs `payload` and writes the hex signature next to `status_file`.
pub fn sign_status(key: &SigningKey, status_file: &Path, payload: &[u8]) -> anyhow::Result<PathBuf> {
    let sig = key.sign(payload);
    let path = signature_path(status_file);
    std::fs::write(&path, format!("{}\n", hex::encode(sig.to_bytes())))?;
    Ok(path)
}

/// Trusted keys are one hex ed25519 public key per line; `#` starts a comment.
/// Malformed lines are skipped.
pub fn load_trusted_pubkeys(path: &Path) -> anyhow::Result<Vec<VerifyingKey>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let mut out = Vec::new();
    for l in non_comment_lines(&std::fs::read_to_string(path)?) {
        let Ok(bytes) = hex::decode(l) else {
            tracing::warn!(line = l, "skipping non-hex trusted key");
            continue;
        };
        let Ok(arr) = <[u8; 32]>::try_from(bytes.as_slice()) else {
            tracing::warn!(line = l, bytes = bytes.len(), "skipping trusted key of wrong length");
            continue;
        };
        match VerifyingKey::from_bytes(&arr) {
            Ok(k) => out.push(k),
            Err(e) => tracing::warn!(line = l, error = %e, "skipping invalid trusted key"),
        }
    }
    Ok(out)
}

/// True when any signature line in `<status_file>.sig` verifies the exact
/// bytes of `status_file` under any trusted key.
pub fn verify_status_signature(status_file: &Path, keys: &[VerifyingKey]) -> anyhow::Result<bool> {
    let sig_path = signature_path(status_file);
    if !sig_path.exists() {
        return Err(TrustError::SignatureMissing(sig_path).into());
    }
    let payload = std::fs::read(status_file)?;
    let sigs_raw = std::fs::read_to_string(&sig_path)?;
    if keys.is_empty() {
        return Ok(false);
    }

    let mut signatures = Vec::new();
    for s in non_comment_lines(&sigs_raw) {
        let sig_bytes = match hex::decode(s) {
            Ok(b) => b,
            Err(_) => continue,
        };
        let sig_arr: [u8; 64] = match sig_bytes.as_slice().try_into() {
            Ok(a) => a,
            Err(_) => continue,
        };
        signatures.push(ed25519_dalek::Signature::from_bytes(&sig_arr));
    }

    for sig in signatures {
        for k in keys {
            if k.verify_strict(&payload, &sig).is_ok() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
