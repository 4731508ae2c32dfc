use crate::config::PatchConfig;
use crate::patcher::{self, ClassOutcome};
use anyhow::Result;
use rayon::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyMode {
    Apply,
    Check,
}

#[derive(Debug)]
pub struct ProcessedFileResult {
    pub path: PathBuf,
    pub outcomes: Vec<(String, ClassOutcome)>,
    pub changed: bool,
    pub error: Option<String>,
}

fn map_err_to_string<E: std::fmt::Display>(p: &Path, c: &str) -> impl Fn(E) -> String {
    let d = p.display().to_string();
    move |e| format!("{} failed for {}: {}", c, d, e)
}

// Full content goes to a temp file next to the target, which is then
// persisted over it, so a failing run never leaves a half-written file.
fn write_atomic(target: &Path, content: &str) -> Result<(), String> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut temp_file = tempfile::Builder::new()
        .prefix(".declpatch_")
        .tempfile_in(parent)
        .map_err(map_err_to_string(target, "Create temp file"))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(map_err_to_string(target, "Write temp file"))?;
    temp_file
        .persist(target)
        .map_err(map_err_to_string(target, "Persist temp file"))?;
    Ok(())
}

fn process_single_file(
    path: &Path,
    config: &PatchConfig,
    mode: ApplyMode,
) -> Result<(Vec<(String, ClassOutcome)>, bool), String> {
    let original = fs::read_to_string(path).map_err(map_err_to_string(path, "Read"))?;

    let report = patcher::patch(&original, &config.class_names, &config.marker_line)
        .map_err(map_err_to_string(path, "Patch"))?;
    let changed = report.text != original;

    if mode == ApplyMode::Apply {
        let target = config.output_path.as_deref().unwrap_or(path);
        if changed || target != path {
            write_atomic(target, &report.text)?;
        }
    }

    Ok((report.outcomes, changed))
}

pub fn process_files(
    files: Vec<PathBuf>,
    config: &PatchConfig,
    mode: ApplyMode,
) -> Result<Vec<ProcessedFileResult>> {
    let r: Vec<ProcessedFileResult> = files
        .par_iter()
        .map(|p| match process_single_file(p, config, mode) {
            Ok((outcomes, changed)) => ProcessedFileResult {
                path: p.clone(),
                outcomes,
                changed,
                error: None,
            },
            Err(e) => ProcessedFileResult {
                path: p.clone(),
                outcomes: Vec::new(),
                changed: false,
                error: Some(e),
            },
        })
        .collect();
    Ok(r)
}
