//! Ledger commands.
//!
//! Each command loads the snapshot, runs one ledger operation, and writes the
//! snapshot back only if the operation succeeded.

use crate::keyfile::load_signer;
use anyhow::{bail, Context, Result};
use colored::Colorize;
use prov_ledger::{Address, Ledger, LedgerEvent, NewProduct, ProductId, ProductTrace, Receipt};
use prov_trace::ancestry;
use std::path::Path;
use std::str::FromStr;

/// A `--source provider:id:signature` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub provider: Address,
    pub id: ProductId,
    pub signature: Vec<u8>,
}

impl FromStr for SourceSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        let (Some(provider), Some(id), Some(signature)) = (parts.next(), parts.next(), parts.next()) else {
            bail!("expected provider:id:signature, got {s:?}");
        };
        let provider = provider
            .parse::<Address>()
            .with_context(|| format!("invalid provider address {provider:?}"))?;
        let id = id
            .parse::<ProductId>()
            .with_context(|| format!("invalid source product id {id:?}"))?;
        let digits = signature.strip_prefix("0x").unwrap_or(signature);
        let signature =
            hex::decode(digits).with_context(|| format!("invalid signature hex {signature:?}"))?;
        Ok(Self {
            provider,
            id,
            signature,
        })
    }
}

fn open(path: &Path) -> Result<Ledger> {
    Ledger::load(path).with_context(|| format!("failed to open ledger {}", path.display()))
}

fn commit(ledger: &Ledger, path: &Path) -> Result<()> {
    ledger
        .save(path)
        .with_context(|| format!("failed to save ledger {}", path.display()))
}

fn print_receipt(receipt: &Receipt) {
    for event in &receipt.events {
        let message = match event {
            LedgerEvent::Authorized { address } => format!("{address} has been authorized"),
            LedgerEvent::ProductAdded { registrant, id } => {
                format!("product {id} of {registrant} has been added")
            }
        };
        println!("{} {}", "✓".green().bold(), message);
    }
}

/// Handle `provctl init`.
pub fn cmd_init(path: &Path, owner_key: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "ledger {} already exists (use --force to replace it)",
            path.display()
        );
    }
    let owner = load_signer(owner_key)?.address();
    let ledger = Ledger::new(owner);
    commit(&ledger, path)?;
    println!(
        "{} Ledger {} created, owner {}",
        "✓".green().bold(),
        path.display(),
        owner.to_checksum()
    );
    Ok(())
}

/// Handle `provctl owner`.
pub fn cmd_owner(path: &Path) -> Result<()> {
    let ledger = open(path)?;
    println!("{}", ledger.owner().to_checksum());
    Ok(())
}

/// Handle `provctl authorize`.
pub fn cmd_authorize(path: &Path, key: &Path, target: Address) -> Result<()> {
    let ledger = open(path)?;
    let caller = load_signer(key)?.address();
    let receipt = ledger
        .authorize(&caller, target)
        .context("authorization failed")?;
    commit(&ledger, path)?;
    print_receipt(&receipt);
    Ok(())
}

/// Handle `provctl status`.
pub fn cmd_status(path: &Path, address: Address) -> Result<()> {
    let ledger = open(path)?;
    if ledger.is_authorized(&address) {
        println!("{} {}", address, "authorized".green().bold());
    } else {
        println!("{} {}", address, "not authorized".yellow().bold());
    }
    Ok(())
}

pub struct AddArgs {
    pub id: ProductId,
    pub name: String,
    pub time: String,
    pub location: String,
    pub sources: Vec<SourceSpec>,
}

/// Handle `provctl add`.
pub fn cmd_add(path: &Path, key: &Path, args: AddArgs) -> Result<()> {
    let ledger = open(path)?;
    let caller = load_signer(key)?.address();

    let product = args
        .sources
        .into_iter()
        .fold(NewProduct::new(args.id, args.name, args.time, args.location), |p, s| {
            p.with_source(s.provider, s.id, s.signature)
        });

    let receipt = ledger
        .add_product(&caller, product)
        .context("product registration failed")?;
    commit(&ledger, path)?;
    print_receipt(&receipt);
    Ok(())
}

fn print_trace(trace: &ProductTrace, indent: &str) {
    println!("{indent}{}: {}", "Name".bold(), trace.name);
    println!("{indent}{}: {}", "Manufactured".bold(), trace.time);
    println!("{indent}{}: {}", "Location".bold(), trace.location);
    if trace.sources.is_empty() {
        println!("{indent}{}: {}", "Sources".bold(), "none".yellow());
    } else {
        println!("{indent}{}:", "Sources".bold());
        for (i, source) in trace.sources.iter().enumerate() {
            println!("{indent}  [{i}] {} #{}", source.provider.to_string().cyan(), source.id);
        }
    }
}

/// Handle `provctl trace`.
pub fn cmd_trace(path: &Path, registrant: Address, id: ProductId, recursive: bool, json: bool) -> Result<()> {
    let ledger = open(path)?;

    if recursive {
        let nodes = ancestry(&ledger, registrant, id)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&nodes)?);
            return Ok(());
        }
        for node in &nodes {
            let indent = "  ".repeat(node.depth);
            println!(
                "{indent}{} {} #{}",
                "Product".bold().cyan(),
                node.product.registrant,
                node.product.id
            );
            print_trace(&node.product.trace, &format!("{indent}  "));
        }
        return Ok(());
    }

    let trace = ledger.trace_product(&registrant, id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        println!("{} {} #{}", "Product".bold().cyan(), registrant, id);
        print_trace(&trace, "  ");
    }
    Ok(())
}

/// Handle `provctl audit`.
pub fn cmd_audit(path: &Path) -> Result<()> {
    let ledger = open(path)?;
    let report = ledger
        .audit()
        .context("ledger audit failed")?;

    println!("{} all source links verified", "✓".green().bold());
    println!();
    println!("{}", "Summary:".bold().underline());
    println!("  {}: {}", "Owner".bold(), ledger.owner().to_checksum());
    println!("  {}: {}", "Authorized".bold(), ledger.authorized().len());
    println!("  {}: {}", "Products".bold(), report.products);
    println!("  {}: {}", "Links".bold(), report.links);
    println!("  {}: {}", "Status".bold(), "VALID".green().bold());
    Ok(())
}
