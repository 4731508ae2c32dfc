use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    about = "Insert missing member declarations into class bodies (main arguments)",
    long_about = "These are the main arguments for the patching operation."
)]
pub struct DeclpatchArgs {
    #[clap(help = "Header files to patch")]
    pub paths: Vec<PathBuf>,

    #[clap(
        long = "class",
        value_name = "NAME",
        help = "Class that must carry the declaration [multiple allowed]",
        action = clap::ArgAction::Append
    )]
    pub class: Vec<String>,

    #[clap(
        long,
        value_name = "LINE",
        help = "Exact declaration line to insert, indentation included"
    )]
    pub marker: Option<String>,

    #[clap(
        long,
        value_name = "PATH",
        help = "Write the patched text here instead of in place [single input only]"
    )]
    pub output: Option<PathBuf>,

    #[clap(long, help = "Report what would change without writing anything")]
    pub check: bool,

    #[clap(long, help = "Skip the confirmation prompt")]
    pub no_confirm: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    #[clap(about = "Generate shell completion scripts")]
    Completion(CompletionArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct CompletionArgs {
    #[clap(value_parser = clap::value_parser!(clap_complete::Shell))]
    pub shell: clap_complete::Shell,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "declpatch",
    version = "0.1.0",
    about = "Insert missing member declarations into class bodies",
    long_about = "Scans header files for the configured classes and inserts the given declaration line\nbefore each class's closing brace, skipping classes that already carry it.",
    propagate_version = true
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[clap(flatten)]
    pub main_opts: DeclpatchArgs,
}

/// Resolved configuration handed to the processor. Pure data, no I/O.
#[derive(Debug, Clone)]
pub struct PatchConfig {
    pub class_names: Vec<String>,
    pub marker_line: String,
    pub output_path: Option<PathBuf>,
}

impl PatchConfig {
    pub fn from_args(args: &DeclpatchArgs) -> Result<Self> {
        let marker = match args.marker.as_deref() {
            Some(m) => m,
            None => anyhow::bail!("--marker is required"),
        };
        if marker.trim().is_empty() {
            anyhow::bail!("Marker line must not be empty");
        }
        if marker.contains('\n') {
            anyhow::bail!("Marker must be a single line");
        }
        if args.class.is_empty() {
            anyhow::bail!("At least one --class is required");
        }
        if args.output.is_some() && args.paths.len() > 1 {
            anyhow::bail!("--output is only valid with a single input file");
        }
        Ok(PatchConfig {
            class_names: args.class.clone(),
            marker_line: marker.to_string(),
            output_path: args.output.clone(),
        })
    }
}

pub fn collect_files(args: &DeclpatchArgs) -> Result<Vec<PathBuf>> {
    if args.paths.is_empty() {
        anyhow::bail!("No input files specified");
    }
    let mut f = Vec::with_capacity(args.paths.len());
    for p in &args.paths {
        if !p.exists() {
            anyhow::bail!("Path not found: {}", p.display());
        }
        if !p.is_file() {
            anyhow::bail!("Not a file: {}", p.display());
        }
        f.push(p.clone());
    }
    f.sort();
    f.dedup();
    Ok(f)
}
