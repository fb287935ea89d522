//! Parsers for problem files and stored answer files.
//!
//! - **Problem files**: a case count followed by a size header plus M, A and S lines per case
//! - **Answer files**: one `"<m> <a>"` line per target, compared line by line
//!
//! Both accept gzip-compressed input (`.gz`).
//!
//! ## Example
//!
//! ```rust
//! use metabolite_annotation::parsing::problem::parse_problem_text;
//!
//! let text = "1\n2 2 1\n1 3\n1 0\n1\n";
//! let cases = parse_problem_text(text, 1e6).unwrap();
//! assert_eq!(cases[0].m, vec![1_000_000, 3_000_000]);
//! ```

pub mod answers;
pub mod problem;
