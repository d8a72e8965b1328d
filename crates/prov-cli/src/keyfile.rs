//! JSON key files holding a secp256k1 private key.

use anyhow::{bail, Context, Result};
use prov_sig::{Address, LinkSigner};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFile {
    pub private_key: String,
    pub address: Address,
}

impl KeyFile {
    pub fn from_signer(signer: &LinkSigner) -> Self {
        Self {
            private_key: signer.secret_hex(),
            address: signer.address(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write key file {}", path.display()))
    }
}

/// Read a key file and return its signer.
///
/// The stored address must match the one derived from the private key.
pub fn load_signer(path: &Path) -> Result<LinkSigner> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read key file {}", path.display()))?;
    let file: KeyFile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse key file {}", path.display()))?;
    let signer = LinkSigner::from_hex(&file.private_key)
        .with_context(|| format!("invalid private key in {}", path.display()))?;
    if signer.address() != file.address {
        bail!(
            "key file {} lists address {} but its key controls {}",
            path.display(),
            file.address,
            signer.address()
        );
    }
    Ok(signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prov_sig::keygen;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.json");
        let signer = keygen().unwrap();

        KeyFile::from_signer(&signer).save(&path).unwrap();
        let loaded = load_signer(&path).unwrap();
        assert_eq!(loaded.address(), signer.address());
    }

    #[test]
    fn test_mismatched_address_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.json");
        let signer = keygen().unwrap();

        let mut file = KeyFile::from_signer(&signer);
        file.address = keygen().unwrap().address();
        file.save(&path).unwrap();

        assert!(load_signer(&path).is_err());
    }
}
