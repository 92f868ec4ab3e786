//! tidytree CLI
//!
//! Drives the two canonical pipelines over marker trees produced by an
//! external parser:
//!
//! - `display` prints the cleaned, sorted tree as JSON
//! - `commit` re-emits the original source as one file per top-level
//!   declaration
//!
//! A tree argument may be a single `.json` file or a directory of them;
//! each tree is filtered independently and a failing tree never aborts
//! the batch.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use tidytree::{
    assign_units, leading_text, write_units, FixedChain, MarkerRule, ReorgOptions, SortDirection,
};
use tidytree_marker::{list_from_json_str, list_to_json_string, MarkerList};

/// Reorganize parsed source trees: clean them for browsing or split them
/// into one file per declaration.
#[derive(Parser, Debug)]
#[command(name = "tidytree")]
#[command(version = tidytree::VERSION)]
#[command(about = "Marker-tree filtering and source reorganization")]
#[command(after_help = "EXAMPLES:
  # Print the cleaned display tree
  tidytree Widget.cs.json

  # Split a file into one output file per declaration
  tidytree Widget.cs.json --mode commit --source Widget.cs --out ./split

  # Process every tree in a directory, members sorted descending
  tidytree ./trees --mode commit --out ./split --descending
")]
struct Cli {
    /// Marker tree JSON file, or a directory of tree files
    #[arg(value_name = "TREE", help_heading = "INPUT")]
    tree: PathBuf,

    /// Original source file (commit mode; defaults to the tree path
    /// without its .json extension)
    #[arg(long = "source", value_name = "FILE", help_heading = "INPUT")]
    source: Option<PathBuf>,

    /// Pipeline to run
    #[arg(long = "mode", value_enum, default_value = "display", help_heading = "PIPELINE")]
    mode: Mode,

    /// Sort members descending instead of ascending
    #[arg(long = "descending", help_heading = "PIPELINE")]
    descending: bool,

    /// Output file for display mode (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE", help_heading = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output directory for commit mode
    #[arg(long = "out", value_name = "DIR", help_heading = "OUTPUT")]
    out_dir: Option<PathBuf>,

    /// Write all units flat into the output root instead of per-kind folders
    #[arg(long = "flat", help_heading = "OUTPUT")]
    flat: bool,

    /// File extension for emitted units
    #[arg(long = "extension", value_name = "EXT", default_value = "cs", help_heading = "OUTPUT")]
    extension: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Comment elimination + sort/prune
    Display,
    /// Directive + comment-run consolidation + sort/prune, then file splitting
    Commit,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = ReorgOptions::new()
        .with_direction(if cli.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        })
        .with_separate_folders(!cli.flat)
        .with_extension(cli.extension.clone());

    let trees = collect_trees(&cli.tree)?;
    if trees.is_empty() {
        bail!("no tree files found under {}", cli.tree.display());
    }
    let batch = trees.len() > 1;

    let mut failures = 0usize;
    for tree_path in &trees {
        if let Err(e) = process_tree(&cli, &options, tree_path) {
            if !batch {
                return Err(e);
            }
            eprintln!("[WARN] Skipping {}: {:#}", tree_path.display(), e);
            failures += 1;
        }
    }
    if failures > 0 {
        eprintln!("[WARN] {failures} of {} trees failed", trees.len());
    }
    Ok(())
}

/// A single file, or every .json file under a directory (sorted for
/// deterministic batch order)
fn collect_trees(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("tree path does not exist: {}", path.display());
    }
    let mut trees: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    trees.sort();
    Ok(trees)
}

fn process_tree(cli: &Cli, options: &ReorgOptions, tree_path: &Path) -> anyhow::Result<()> {
    let json = fs::read_to_string(tree_path)
        .with_context(|| format!("reading tree {}", tree_path.display()))?;
    let tree: MarkerList = list_from_json_str(&json)
        .with_context(|| format!("parsing tree {}", tree_path.display()))?;

    match cli.mode {
        Mode::Display => {
            let pipeline = FixedChain::display_pipeline(options);
            let filtered = pipeline.apply_filter(&tree);
            let rendered = list_to_json_string(&filtered)?;
            match &cli.output {
                Some(path) => fs::write(path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{rendered}"),
            }
        }
        Mode::Commit => {
            let out_dir = cli
                .out_dir
                .as_ref()
                .context("commit mode requires --out")?;
            let source_path = source_path_for(cli, tree_path)?;
            let source = fs::read_to_string(&source_path)
                .with_context(|| format!("reading source {}", source_path.display()))?;

            let pipeline = FixedChain::commit_pipeline(options);
            let commit_tree = pipeline.apply_filter(&tree);
            let preamble = leading_text(&source, &tree);
            let units = assign_units(&commit_tree, &source, preamble, options);
            let report = write_units(&units, out_dir);

            println!(
                "{}: wrote {} file(s), {} error(s)",
                tree_path.display(),
                report.written.len(),
                report.errors.len()
            );
        }
    }
    Ok(())
}

/// The source file a tree describes: --source when given, otherwise the
/// tree path with its .json extension stripped (Widget.cs.json -> Widget.cs)
fn source_path_for(cli: &Cli, tree_path: &Path) -> anyhow::Result<PathBuf> {
    if let Some(source) = &cli.source {
        return Ok(source.clone());
    }
    let stem = tree_path.with_extension("");
    if stem.extension().is_none() {
        bail!(
            "cannot derive a source path from {}; pass --source",
            tree_path.display()
        );
    }
    Ok(stem)
}
