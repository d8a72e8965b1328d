//! provctl subcommands.

pub mod keys;
pub mod ledger;
