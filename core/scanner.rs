use crate::CoreError;

/// Inclusive line range of a class definition, from the declaration line to
/// the line on which its closing brace sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSpan {
    pub decl_line: usize,
    pub close_line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingBrace,
    InBody { depth: usize },
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_decl_line(line: &str, class_name: &str) -> bool {
    let needle = format!("class {}", class_name);
    let mut search_from = 0;
    while let Some(rel) = line[search_from..].find(&needle) {
        let start = search_from + rel;
        let end = start + needle.len();
        let before_ok = start == 0
            || !line[..start]
                .chars()
                .next_back()
                .is_some_and(is_ident_char);
        let after_ok = !line[end..].chars().next().is_some_and(is_ident_char);
        if before_ok && after_ok {
            return true;
        }
        search_from = end;
    }
    false
}

/// Finds the body span of the first occurrence of `class <name>`.
///
/// Later occurrences of the same name are ignored. The body extent is found
/// by counting `{` / `}` per line; the span closes on the line where the
/// depth returns to zero. Returns `Ok(None)` when no line declares the class,
/// and `UnbalancedBraces` when the text ends before the body opens or closes.
pub fn find_class_span<S: AsRef<str>>(
    lines: &[S],
    class_name: &str,
) -> Result<Option<ClassSpan>, CoreError> {
    let decl_line = match lines
        .iter()
        .position(|l| is_decl_line(l.as_ref(), class_name))
    {
        Some(i) => i,
        None => return Ok(None),
    };

    let mut state = ScanState::SeekingBrace;
    for (offset, line) in lines[decl_line..].iter().enumerate() {
        for c in line.as_ref().chars() {
            state = match (state, c) {
                (ScanState::SeekingBrace, '{') => ScanState::InBody { depth: 1 },
                (ScanState::InBody { depth }, '{') => ScanState::InBody { depth: depth + 1 },
                (ScanState::InBody { depth: 1 }, '}') => {
                    return Ok(Some(ClassSpan {
                        decl_line,
                        close_line: decl_line + offset,
                    }));
                }
                (ScanState::InBody { depth }, '}') => ScanState::InBody { depth: depth - 1 },
                (s, _) => s,
            };
        }
    }

    Err(CoreError::UnbalancedBraces {
        class: class_name.to_string(),
        line: decl_line + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::{ClassSpan, find_class_span};
    use crate::CoreError;

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn finds_simple_body() {
        let text = "class Foo {\n    int x;\n};\n";
        let span = find_class_span(&lines(text), "Foo").unwrap().unwrap();
        assert_eq!(
            span,
            ClassSpan {
                decl_line: 0,
                close_line: 2
            }
        );
    }

    #[test]
    fn opening_brace_on_later_line() {
        let text = "class Foo\n{\n    int x;\n}\n";
        let span = find_class_span(&lines(text), "Foo").unwrap().unwrap();
        assert_eq!(span.decl_line, 0);
        assert_eq!(span.close_line, 3);
    }

    #[test]
    fn nested_braces_close_at_true_end() {
        let text = "class Foo {\n    int get() { return x; }\n    int x;\n};\n";
        let span = find_class_span(&lines(text), "Foo").unwrap().unwrap();
        assert_eq!(span.close_line, 3);
    }

    #[test]
    fn name_must_end_at_identifier_boundary() {
        let text = "class FooBar {\n};\nclass Foo {\n};\n";
        let span = find_class_span(&lines(text), "Foo").unwrap().unwrap();
        assert_eq!(span.decl_line, 2);
    }

    #[test]
    fn name_must_start_at_identifier_boundary() {
        let text = "myclass Foo {\n};\nclass Foo {\n};\n";
        let span = find_class_span(&lines(text), "Foo").unwrap().unwrap();
        assert_eq!(span.decl_line, 2);
    }

    #[test]
    fn missing_class_is_none() {
        let text = "class Foo {\n};\n";
        assert!(find_class_span(&lines(text), "Bar").unwrap().is_none());
    }

    #[test]
    fn first_occurrence_wins() {
        let text = "class Foo {\n};\nclass Foo {\n    int y;\n};\n";
        let span = find_class_span(&lines(text), "Foo").unwrap().unwrap();
        assert_eq!(span.decl_line, 0);
        assert_eq!(span.close_line, 1);
    }

    #[test]
    fn unclosed_body_is_unbalanced() {
        let text = "class Foo {\n    int x;\n";
        let err = find_class_span(&lines(text), "Foo").unwrap_err();
        match err {
            CoreError::UnbalancedBraces { class, line } => {
                assert_eq!(class, "Foo");
                assert_eq!(line, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn body_that_never_opens_is_unbalanced() {
        let text = "class Foo\nint x;\n";
        assert!(matches!(
            find_class_span(&lines(text), "Foo"),
            Err(CoreError::UnbalancedBraces { .. })
        ));
    }
}
