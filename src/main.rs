//! rulescan - discover legacy `.cursorrules` files and normalize them
//! into portable agent prompt records
//!
//! rulescan provides:
//! - Recursive discovery of `.cursorrules` / `.cursorrules.md` / `.cursorrules.txt`
//! - Normalized global-prompt records with stable, path-derived identifiers
//! - A read-only plugin surface (emit always reports records as unsupported)
//! - Unified output formats (jsonl/json/md)

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod discover;
mod plugin;
mod workspace;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
