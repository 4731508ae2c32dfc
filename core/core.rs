pub mod config;
pub mod patcher;
pub mod processor;
pub mod scanner;

pub use config::{CliArgs, Command, CompletionArgs, DeclpatchArgs, PatchConfig, collect_files};

pub use patcher::{ClassOutcome, PatchReport, patch};
pub use processor::{ApplyMode, ProcessedFileResult, process_files};
pub use scanner::{ClassSpan, find_class_span};

#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unbalanced braces in `class {class}` declared on line {line}")]
    UnbalancedBraces { class: String, line: usize },

    #[error("File processing error in {path}: {message}")]
    Processing { path: String, message: String },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
