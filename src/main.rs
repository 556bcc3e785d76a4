//! research-index — regenerate the research documentation index in AGENTS.md.
//!
//! Scans the research documents for `## ` headings, renders a compact
//! pipe-delimited index of their line spans and splices it into the target
//! document after the `# Field Mapping Reference` section:
//!
//! - **update** (default): `research-index -C path/to/project`
//! - **check**: `research-index --check` fails when the target is stale
//! - **print**: `research-index --print` writes the block to stdout only

mod error;
mod format;
mod model;
mod scan;
mod splice;

use anyhow::{Context, Result};
use clap::Parser;
use error::IndexError;
use std::fs;
use std::path::{Path, PathBuf};

/// Source documents indexed when no `--source` is given.
const DEFAULT_SOURCES: &[&str] = &["claude-code-docs.md", "opencode-docs.md"];

#[derive(Parser)]
#[command(
    name = "research-index",
    about = "Regenerate the research documentation index in AGENTS.md"
)]
struct Cli {
    /// Project root; all other paths are relative to it
    #[arg(short = 'C', long, default_value = ".")]
    root: PathBuf,

    /// Directory holding the research documents
    #[arg(short = 'r', long, default_value = "openspec/research")]
    research_dir: PathBuf,

    /// Research document to index (repeatable, index order)
    #[arg(short = 's', long = "source")]
    sources: Vec<String>,

    /// Document receiving the index
    #[arg(short = 't', long, default_value = "AGENTS.md")]
    target: PathBuf,

    /// Heading the index is inserted after
    #[arg(long, default_value = splice::DEFAULT_ANCHOR)]
    anchor: String,

    /// Do not write; exit non-zero if the target is out of date
    #[arg(long, conflicts_with = "print")]
    check: bool,

    /// Do not write; print the generated index block to stdout
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let target = cli.root.join(&cli.target);

    run(&cli, &target).inspect_err(|_| {
        if !cli.print {
            eprintln!("✗ Failed to update {}", target.display());
        }
    })
}

fn run(cli: &Cli, target: &Path) -> Result<()> {
    let research_dir = cli.root.join(&cli.research_dir);
    let names: Vec<&str> = if cli.sources.is_empty() {
        DEFAULT_SOURCES.to_vec()
    } else {
        cli.sources.iter().map(String::as_str).collect()
    };

    // Every input must exist before anything is scanned
    let paths: Vec<PathBuf> = names.iter().map(|name| research_dir.join(name)).collect();
    if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
        return Err(IndexError::MissingInput(missing.clone()).into());
    }

    let mut indexes = Vec::with_capacity(paths.len());
    for (name, path) in names.iter().zip(&paths) {
        let index = index_document(name, path)?;
        if !cli.print {
            println!("Extracted {} sections from {}", index.entries.len(), name);
        }
        indexes.push(index);
    }

    let block = format::format_index(&root_label(&cli.research_dir), &indexes);

    let content = fs::read_to_string(target)
        .with_context(|| format!("failed to read {}", target.display()))?;
    let markers = splice::Markers {
        anchor: &cli.anchor,
        ..splice::Markers::default()
    };
    let updated = splice::splice(&content, &block, &markers)?;

    if cli.print {
        print!("{}", block);
        return Ok(());
    }

    if cli.check {
        if updated != content {
            anyhow::bail!("{} is out of date", target.display());
        }
        println!("✓ {} is up to date", target.display());
        return Ok(());
    }

    fs::write(target, &updated)
        .with_context(|| format!("failed to write {}", target.display()))?;
    log::info!("wrote {} bytes to {}", updated.len(), target.display());

    println!(
        "✓ Successfully updated {} with research documentation index",
        display_name(target)
    );
    println!("✓ Index size: {} bytes", block.len());
    Ok(())
}

/// Read and scan one research document.
fn index_document(name: &str, path: &Path) -> Result<model::DocumentIndex> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let entries = scan::scan_text(&text);
    log::debug!("{}: {} headings", path.display(), entries.len());
    Ok(model::DocumentIndex::new(name, entries))
}

/// Root shown in the index banner: "openspec/research" → "./openspec/research".
fn root_label(research_dir: &Path) -> String {
    let dir = research_dir.to_string_lossy().replace('\\', "/");
    if research_dir.is_absolute() || dir.starts_with("./") || dir.starts_with("../") {
        dir
    } else {
        format!("./{}", dir.trim_end_matches('/'))
    }
}

/// "path/to/AGENTS.md" → "AGENTS.md"
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
