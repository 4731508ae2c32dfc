use crate::CoreError;
use crate::scanner::find_class_span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassOutcome {
    /// Marker inserted; carries the 1-based line number it now occupies.
    Inserted { line: usize },
    AlreadyPresent,
    NotFound,
}

#[derive(Debug)]
pub struct PatchReport {
    pub text: String,
    pub outcomes: Vec<(String, ClassOutcome)>,
}

impl PatchReport {
    pub fn inserted(&self) -> usize {
        self.count(|o| matches!(o, ClassOutcome::Inserted { .. }))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, ClassOutcome::AlreadyPresent))
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| matches!(o, ClassOutcome::NotFound))
    }

    pub fn changed(&self) -> bool {
        self.inserted() > 0
    }

    fn count(&self, pred: impl Fn(&ClassOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Inserts `marker_line` into the body of each named class, immediately
/// before the line that closes the body.
///
/// Pure text-to-text transformation; the caller owns all file I/O. Classes
/// already containing the marker (compared with surrounding whitespace
/// trimmed) are left untouched, classes that do not occur in `source` are
/// skipped. At most one insertion happens per class name, and only the first
/// occurrence of a name is considered.
pub fn patch(
    source: &str,
    class_names: &[String],
    marker_line: &str,
) -> Result<PatchReport, CoreError> {
    // split('\n') keeps the reconstruction exact: join restores every byte,
    // including the trailing-newline convention of the input.
    let mut lines: Vec<String> = source.split('\n').map(str::to_string).collect();
    let marker_key = marker_line.trim();
    let mut outcomes = Vec::with_capacity(class_names.len());

    for name in class_names {
        let span = match find_class_span(&lines, name)? {
            Some(s) => s,
            None => {
                outcomes.push((name.clone(), ClassOutcome::NotFound));
                continue;
            }
        };

        let present = lines[span.decl_line..=span.close_line]
            .iter()
            .any(|l| l.trim() == marker_key);
        if present {
            outcomes.push((name.clone(), ClassOutcome::AlreadyPresent));
        } else {
            lines.insert(span.close_line, marker_line.to_string());
            outcomes.push((
                name.clone(),
                ClassOutcome::Inserted {
                    line: span.close_line + 1,
                },
            ));
        }
    }

    Ok(PatchReport {
        text: lines.join("\n"),
        outcomes,
    })
}
