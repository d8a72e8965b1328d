//! Key management and link signing commands.

use crate::keyfile::{load_signer, KeyFile};
use anyhow::{Context, Result};
use colored::Colorize;
use prov_ledger::{Address, ProductId};
use prov_sig::keygen;
use std::path::{Path, PathBuf};

/// Handle `provctl keygen`.
pub fn cmd_keygen(output: Option<PathBuf>) -> Result<()> {
    let signer = keygen().context("failed to generate key")?;
    let file = KeyFile::from_signer(&signer);

    if let Some(path) = output {
        file.save(&path)?;
        println!("{} Key for {} written to {}", "✓".green(), file.address, path.display());
    } else {
        println!("{}", "Generated secp256k1 Key".bold().underline());
        println!("{}: {}", "Private Key".bold().red(), file.private_key);
        println!("{}: {}", "Address".bold().green(), signer.address().to_checksum());
        println!();
        println!("{}", "WARNING: Keep the private key secret!".yellow().bold());
    }

    Ok(())
}

/// Handle `provctl sign`: endorse `verifier` using product `id` of the key's owner.
///
/// Prints only the 0x-hex signature so the output can be piped into `add --source`.
pub fn cmd_sign(key: &Path, id: ProductId, verifier: Address) -> Result<()> {
    let signer = load_signer(key)?;
    let signature = signer
        .sign_link(id.get(), &verifier)
        .context("failed to sign link")?;
    println!("0x{}", hex::encode(signature));
    Ok(())
}
