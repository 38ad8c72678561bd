//! Clause recognition for the log filter language
//!
//! A query is a sequence of clauses in one of three shapes:
//!
//! - `[and] <column> (in|nin) (<values>)`
//! - `[and] <column> (gt|lt|gte|lte) <value>`
//! - `[and] <column> (contains|ncontains) <text>`
//!
//! Keywords are case-insensitive. Column names are plain ASCII and matched
//! case-sensitively, so no Unicode case folding reaches them. Matching is
//! leftmost-first and greedy, so a `contains` clause runs to the end of the
//! query and an `in` list runs to the last closing parenthesis.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::error::LogQueryError;
use super::operators::Operator;

static CLAUSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<conj>(?i:and) +)?(?:",
        r"(?P<in_col>[A-Za-z0-9_.-]+) (?P<in_op>(?i:in|nin)) (?P<in_val>\([\S ]+\))",
        r"|(?P<cmp_col>[A-Za-z0-9_.]+) (?P<cmp_op>(?i:gt|lt|gte|lte)) (?P<cmp_val>'?\S+'?)",
        r"|(?P<txt_col>[A-Za-z0-9_.]+) (?P<txt_op>(?i:contains|ncontains)) (?P<txt_val>'?[\S ]+'?)",
        r")"
    ))
    .expect("Invalid clause regex")
});

/// Capture group names per clause shape: (column, operator, operand)
const SHAPES: [(&str, &str, &str); 3] = [
    ("in_col", "in_op", "in_val"),
    ("cmp_col", "cmp_op", "cmp_val"),
    ("txt_col", "txt_op", "txt_val"),
];

/// One recognised clause, borrowed from the query it was found in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseToken<'a> {
    /// Matched text, including any leading conjunction
    pub raw: &'a str,
    /// Clause started with an `and` conjunction
    pub conjunction: bool,
    pub column: &'a str,
    pub operator: Operator,
    pub operand: &'a str,
    /// Byte range of the operator keyword within `raw`
    operator_span: Range<usize>,
}

impl<'a> ClauseToken<'a> {
    fn from_captures(caps: &Captures<'a>) -> Result<Self, LogQueryError> {
        let whole = caps.get(0).ok_or(LogQueryError::UnknownTokens)?;
        let raw = whole.as_str();

        for (col, op, val) in SHAPES {
            let (Some(column), Some(keyword), Some(operand)) =
                (caps.name(col), caps.name(op), caps.name(val))
            else {
                continue;
            };
            let operator = Operator::from_keyword(keyword.as_str())
                .ok_or_else(|| LogQueryError::malformed(raw))?;
            let start = keyword.start() - whole.start();
            return Ok(Self {
                raw,
                conjunction: caps.name("conj").is_some(),
                column: column.as_str(),
                operator,
                operand: operand.as_str(),
                operator_span: start..start + keyword.len(),
            });
        }

        Err(LogQueryError::malformed(raw))
    }

    /// Operator keyword exactly as written in the query
    pub fn operator_text(&self) -> &'a str {
        &self.raw[self.operator_span.clone()]
    }

    /// Clause text with the operator keyword replaced by `replacement`
    pub fn with_operator(&self, replacement: &str) -> String {
        let mut out = String::with_capacity(self.raw.len() + replacement.len());
        out.push_str(&self.raw[..self.operator_span.start]);
        out.push_str(replacement);
        out.push_str(&self.raw[self.operator_span.end..]);
        out
    }
}

/// Find every clause in `query`, left to right.
///
/// Returns an empty list when nothing matches; the caller treats that as a
/// full-text search. When at least one clause matches, any non-whitespace text
/// outside the matches fails the whole query with `UnknownTokens`.
pub fn scan_clauses(query: &str) -> Result<Vec<ClauseToken<'_>>, LogQueryError> {
    let clauses = CLAUSE_REGEX
        .captures_iter(query)
        .map(|caps| ClauseToken::from_captures(&caps))
        .collect::<Result<Vec<_>, _>>()?;

    if clauses.is_empty() {
        return Ok(clauses);
    }

    let residue = CLAUSE_REGEX.replace_all(query, "");
    if !residue.trim().is_empty() {
        tracing::debug!(residue = %residue.trim(), "Unrecognised text in log filter");
        return Err(LogQueryError::UnknownTokens);
    }

    Ok(clauses)
}
