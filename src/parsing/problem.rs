//! Reader for metabolite-annotation problem files.
//!
//! Layout:
//!
//! ```text
//! <case count>
//! <|M|> <|A|> <|S|>
//! <M values>
//! <A values>
//! <S values>
//! ...
//! ```
//!
//! Values are decimals scaled into `i32` (see [`scale_value`]). Size headers
//! that disagree with the value lines are logged and otherwise ignored.

use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::warn;

use crate::utils::validation::{check_value_limit, scale_value, MAX_VALUES_PER_LINE};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid problem file format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value on line {line}: '{value}'")]
    InvalidValue { line: usize, value: String },

    #[error("Value on line {line} does not fit a 32-bit integer after scaling: '{value}'")]
    ValueOutOfRange { line: usize, value: String },

    #[error("Too many values on line {0}: exceeds maximum allowed ({MAX_VALUES_PER_LINE})")]
    TooManyValues(usize),
}

/// One test case: the two factor arrays and the targets, already scaled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemCase {
    pub m: Vec<i32>,
    pub a: Vec<i32>,
    pub s: Vec<i32>,
}

/// Parse a problem file; `.gz` files are decompressed and `-` reads stdin
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_problem_file(path: &Path, scale: f64) -> Result<Vec<ProblemCase>, ParseError> {
    let reader: Box<dyn Read> = if path.as_os_str() == "-" {
        Box::new(std::io::stdin())
    } else if is_gzipped(path) {
        Box::new(GzDecoder::new(std::fs::File::open(path)?))
    } else {
        Box::new(std::fs::File::open(path)?)
    };

    let mut content = String::new();
    BufReader::new(reader).read_to_string(&mut content)?;
    parse_problem_text(&content, scale)
}

/// Check if a file has a gzip extension
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Parse problem text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the case count is missing or lines are
/// missing, `ParseError::InvalidValue`/`ValueOutOfRange` for bad numbers, or
/// `ParseError::TooManyValues` if a line exceeds the limit.
pub fn parse_problem_text(text: &str, scale: f64) -> Result<Vec<ProblemCase>, ParseError> {
    let mut lines = text.lines().enumerate();

    let (_, first) = lines
        .next()
        .ok_or_else(|| ParseError::InvalidFormat("File is empty".to_string()))?;
    let count: usize = first.trim().parse().map_err(|_| {
        ParseError::InvalidFormat(format!("Invalid case count: '{}'", first.trim()))
    })?;

    let mut next_line = |what: &str, case: usize| {
        lines.next().ok_or_else(|| {
            ParseError::InvalidFormat(format!("Missing {what} line for case {}", case + 1))
        })
    };

    let mut cases = Vec::with_capacity(count);
    for case in 0..count {
        let (header_idx, header) = next_line("size", case)?;
        let (m_idx, m_line) = next_line("M", case)?;
        let (a_idx, a_line) = next_line("A", case)?;
        let (s_idx, s_line) = next_line("S", case)?;

        // Line numbers in errors are 1-based
        let parsed = ProblemCase {
            m: parse_values(m_line, m_idx + 1, scale)?,
            a: parse_values(a_line, a_idx + 1, scale)?,
            s: parse_values(s_line, s_idx + 1, scale)?,
        };
        check_sizes(header, header_idx + 1, &parsed);
        cases.push(parsed);
    }

    Ok(cases)
}

/// Parse a line of whitespace-separated decimals into scaled integers
///
/// # Errors
///
/// Returns `ParseError::InvalidValue` for non-numeric tokens,
/// `ParseError::ValueOutOfRange` if scaling overflows `i32`, or
/// `ParseError::TooManyValues` if the line has too many values.
pub fn parse_values(line: &str, line_num: usize, scale: f64) -> Result<Vec<i32>, ParseError> {
    let mut values = Vec::new();

    for token in line.split_whitespace() {
        if check_value_limit(values.len()).is_some() {
            return Err(ParseError::TooManyValues(line_num));
        }

        let value: f64 = token.parse().map_err(|_| ParseError::InvalidValue {
            line: line_num,
            value: token.to_string(),
        })?;
        let scaled = scale_value(value, scale).ok_or_else(|| ParseError::ValueOutOfRange {
            line: line_num,
            value: token.to_string(),
        })?;
        values.push(scaled);
    }

    Ok(values)
}

/// Warn when the `|M| |A| |S|` header disagrees with the parsed lines
fn check_sizes(header: &str, line_num: usize, case: &ProblemCase) {
    let declared: Vec<usize> = header
        .split_whitespace()
        .filter_map(|t| t.parse().ok())
        .collect();
    let actual = [case.m.len(), case.a.len(), case.s.len()];

    if declared[..] != actual[..] {
        warn!(
            "Size header on line {line_num} ({}) does not match values ({} {} {})",
            header.trim(),
            actual[0],
            actual[1],
            actual[2]
        );
    }
}
