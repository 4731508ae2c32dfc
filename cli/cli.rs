use declpatch_core::{
    ApplyMode, CliArgs, ClassOutcome, Command as CoreCommand, PatchConfig, ProcessedFileResult,
    collect_files, process_files,
};
mod interaction;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::style;
use std::io;
use std::process::ExitCode;

fn print_completions_cli(shell: clap_complete::Shell) {
    let mut cmd = CliArgs::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

fn outcome_counts(result: &ProcessedFileResult) -> (usize, usize, usize) {
    let inserted = result
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, ClassOutcome::Inserted { .. }))
        .count();
    let present = result
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, ClassOutcome::AlreadyPresent))
        .count();
    let not_found = result
        .outcomes
        .iter()
        .filter(|(_, o)| matches!(o, ClassOutcome::NotFound))
        .count();
    (inserted, present, not_found)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli: CliArgs = CliArgs::parse();
    let mut exit_code = ExitCode::SUCCESS;

    if let Some(command_enum_val) = cli.command {
        match command_enum_val {
            CoreCommand::Completion(args) => {
                print_completions_cli(args.shell);
                return Ok(ExitCode::SUCCESS);
            }
        }
    }

    let main_app_args = cli.main_opts;

    let config = match PatchConfig::from_args(&main_app_args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", style(format!("Invalid arguments: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let files_to_patch = match collect_files(&main_app_args) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("{}", style(format!("Error collecting files: {}", e)).red());
            return Ok(ExitCode::FAILURE);
        }
    };

    let mode = if main_app_args.check {
        ApplyMode::Check
    } else {
        ApplyMode::Apply
    };

    println!("Found {} files:", files_to_patch.len());
    for file in files_to_patch.iter().take(10) {
        println!("  {}", style(file.display()).dim());
    }
    if files_to_patch.len() > 10 {
        println!("  ... and {} more.", files_to_patch.len() - 10);
    }

    if mode == ApplyMode::Apply {
        match interaction::confirm_patching(
            files_to_patch.len(),
            config.class_names.len(),
            main_app_args.no_confirm,
        ) {
            Ok(true) => {}
            Ok(false) => return Ok(ExitCode::SUCCESS),
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Error during confirmation: {}", e)).red()
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    println!(
        "Patching {} into `class` bodies...",
        style(config.marker_line.trim()).cyan()
    );

    let patch_results: Vec<ProcessedFileResult> =
        match process_files(files_to_patch, &config, mode) {
            Ok(results) => results,
            Err(e) => {
                eprintln!(
                    "{}",
                    style(format!("Critical error during processing setup: {}", e)).red()
                );
                return Ok(ExitCode::FAILURE);
            }
        };

    let mut success_count = 0;
    let mut failure_count = 0;
    let mut pending_changes = 0;
    println!("\nPatching complete.");
    for result in patch_results {
        match result.error {
            None => {
                let (inserted, present, not_found) = outcome_counts(&result);
                let verb = match mode {
                    ApplyMode::Apply => "inserted",
                    ApplyMode::Check => "would insert",
                };
                println!(
                    "  {}: {} {}, {} already present, {} not found",
                    style(result.path.display()).dim(),
                    style(inserted).green(),
                    verb,
                    present,
                    not_found
                );
                if result.changed {
                    pending_changes += 1;
                }
                success_count += 1;
            }
            Some(err_msg) => {
                eprintln!(
                    "  {} Failed: {} - {}",
                    style("⚠️").yellow(),
                    style(result.path.display()).dim(),
                    style(err_msg).red()
                );
                failure_count += 1;
            }
        }
    }
    println!(
        "Result: {} {} patched successfully, {} {} failed.",
        style(success_count).green(),
        if success_count == 1 { "file" } else { "files" },
        style(failure_count).red(),
        if failure_count == 1 { "file" } else { "files" }
    );
    if failure_count > 0 {
        exit_code = ExitCode::FAILURE;
    }
    if mode == ApplyMode::Check && pending_changes > 0 {
        println!(
            "{}",
            style(format!(
                "{} file(s) would change; run without --check to apply.",
                pending_changes
            ))
            .yellow()
        );
        exit_code = ExitCode::FAILURE;
    }

    Ok(exit_code)
}
