//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::core::model::{EmitOptions, GlobalPrompt};
use crate::core::render::{OutputFormat, RenderConfig, Renderer};
use crate::plugin::{CursorRules, Plugin};
use crate::workspace::{ScanRoot, Workspace};

/// rulescan - discover legacy .cursorrules files as portable prompt records.
#[derive(Parser, Debug)]
#[command(name = "rulescan")]
#[command(
    author,
    version,
    about,
    long_about = r#"rulescan walks a project tree, finds legacy .cursorrules files
(.cursorrules, .cursorrules.md, .cursorrules.txt), and prints one
normalized global-prompt record per match.

Well-known non-project subtrees (VCS metadata, dependency caches,
build output, framework caches) are never descended into. The format
is read-only: emit never writes files and reports every record as
unsupported.

Output formats:
- jsonl: one record per line (best for piping into tools/LLMs)
- json: the full result object, items plus warnings
- md: human-friendly Markdown

Examples:
    rulescan discover
    rulescan --root ../app --format json discover
    rulescan discover | rulescan emit
"#
)]
pub struct Cli {
    /// Root directory to scan.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to scan (defaults to the current directory).\n\n\
Every relative_dir emitted in records is relative to this root. A root\n\
that does not exist is not an error; discovery simply returns nothing."
    )]
    pub root: PathBuf,

    /// Treat ROOT as a managed workspace checkout.
    #[arg(
        long,
        global = true,
        long_help = "Resolve ROOT through the workspace handle instead of using it as a\n\
bare path. Unlike a bare path, a workspace is validated up front and\n\
must be an existing directory."
    )]
    pub workspace: bool,

    /// Output format (jsonl/json/md).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output for human inspection. Has no\n\
effect on md output."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover legacy rules files under ROOT.
    #[command(
        long_about = "Walk ROOT depth-first and emit one global-prompt record per\n\
readable .cursorrules / .cursorrules.md / .cursorrules.txt file.\n\n\
Records appear in walk order; no ordering is guaranteed across sibling\n\
directories. Unreadable files and subtrees are silently omitted.\n\n\
Examples:\n\
  rulescan discover\n\
  rulescan --root packages/api --format md discover\n"
    )]
    Discover,

    /// Emit records back to disk (always unsupported for this format).
    #[command(
        long_about = "Read global-prompt records (one JSON object per line) from FILE or\n\
stdin and hand them to the plugin's emit operation.\n\n\
The legacy rules format is read-only, so nothing is ever written: the\n\
printed result lists every input record under \"unsupported\".\n\n\
Examples:\n\
  rulescan emit records.jsonl\n\
  rulescan discover | rulescan emit\n"
    )]
    Emit {
        /// JSONL file of records; reads stdin when omitted.
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Validate without writing.
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the plugin registration (id, name, supported kinds).
    #[command(
        long_about = "Print the fixed registration data the host shell sees for this\n\
plugin: its id, display name, and supported customization kinds.\n\n\
Example:\n\
  rulescan info\n"
    )]
    Info,
}

pub fn run(cli: Cli) -> Result<()> {
    // Parse output format
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    let root: ScanRoot = if cli.workspace {
        Workspace::open(&cli.root)
            .with_context(|| format!("cannot open workspace at {}", cli.root.display()))?
            .into()
    } else {
        ScanRoot::path(cli.root)
    };

    let plugin = CursorRules;

    match cli.command {
        Commands::Discover => run_discover(&plugin, &root, render_config),
        Commands::Emit { input, dry_run } => {
            run_emit(&plugin, &root, input.as_deref(), dry_run, render_config)
        }
        Commands::Info => run_info(&plugin, render_config),
    }
}

fn run_discover(plugin: &impl Plugin, root: &ScanRoot, render_config: RenderConfig) -> Result<()> {
    let result = plugin.discover(root);

    let renderer = Renderer::with_config(render_config);
    println!("{}", renderer.render(&result));

    Ok(())
}

fn run_emit(
    plugin: &impl Plugin,
    root: &ScanRoot,
    input: Option<&Path>,
    dry_run: bool,
    render_config: RenderConfig,
) -> Result<()> {
    let items = read_records(input)?;
    let options = EmitOptions { dry_run };
    let result = plugin.emit(items, root, &options);

    let output = if render_config.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    Ok(())
}

fn run_info(plugin: &impl Plugin, render_config: RenderConfig) -> Result<()> {
    let info = serde_json::json!({
        "id": plugin.id(),
        "name": plugin.name(),
        "supports": plugin.supports(),
    });

    let output = if render_config.pretty {
        serde_json::to_string_pretty(&info)?
    } else {
        serde_json::to_string(&info)?
    };
    println!("{}", output);

    Ok(())
}

/// Read JSONL records from a file, or stdin when no file is given.
fn read_records(input: Option<&Path>) -> Result<Vec<GlobalPrompt>> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read records from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read records from stdin")?;
            buf
        }
    };

    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).with_context(|| format!("invalid record line: {}", line))
        })
        .collect()
}
