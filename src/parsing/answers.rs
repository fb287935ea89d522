use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use serde::Serialize;

use crate::parsing::problem::{is_gzipped, ParseError};

/// A single differing line between expected and actual answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// 1-based line number
    pub line: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Result of comparing an answer file against computed answers
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub lines_compared: usize,
    pub mismatches: Vec<Mismatch>,
    /// True only if the two texts are equal byte for byte
    pub byte_identical: bool,
}

impl Comparison {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty() && self.byte_identical
    }
}

/// Read an answer file into memory (`.gz` files are decompressed)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or is not UTF-8.
pub fn read_answer_file(path: &Path) -> Result<String, ParseError> {
    let file = std::fs::File::open(path)?;
    let mut reader: Box<dyn Read> = if is_gzipped(path) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(content)
}

/// Compare expected and actual answer text line by line
#[must_use]
pub fn compare_answers(expected: &str, actual: &str) -> Comparison {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let lines_compared = expected_lines.len().max(actual_lines.len());

    let mismatches = (0..lines_compared)
        .filter_map(|i| {
            let e = expected_lines.get(i).copied();
            let a = actual_lines.get(i).copied();
            (e != a).then(|| Mismatch {
                line: i + 1,
                expected: e.map(str::to_string),
                actual: a.map(str::to_string),
            })
        })
        .collect();

    Comparison {
        lines_compared,
        mismatches,
        byte_identical: expected == actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_answers() {
        let cmp = compare_answers("1 2\n3 4\n", "1 2\n3 4\n");
        assert!(cmp.is_match());
        assert_eq!(cmp.lines_compared, 2);
    }

    #[test]
    fn test_differing_line() {
        let cmp = compare_answers("1 2\n3 4\n", "1 2\n3 5\n");
        assert!(!cmp.is_match());
        assert_eq!(
            cmp.mismatches,
            vec![Mismatch {
                line: 2,
                expected: Some("3 4".to_string()),
                actual: Some("3 5".to_string()),
            }]
        );
    }

    #[test]
    fn test_missing_and_extra_lines() {
        let cmp = compare_answers("1 2\n", "1 2\nNA\n");
        assert_eq!(cmp.mismatches.len(), 1);
        assert_eq!(cmp.mismatches[0].expected, None);
        assert_eq!(cmp.mismatches[0].actual.as_deref(), Some("NA"));
    }

    #[test]
    fn test_trailing_newline_is_not_byte_identical() {
        let cmp = compare_answers("1 2\n", "1 2");
        assert!(cmp.mismatches.is_empty());
        assert!(!cmp.byte_identical);
        assert!(!cmp.is_match());
    }
}
