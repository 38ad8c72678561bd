//! Clause translation into SQL predicate fragments
//!
//! Every fragment ends with a single space and carries its own leading
//! conjunction, so fragments join by plain concatenation.

use super::error::LogQueryError;
use super::grammar::{ClauseToken, scan_clauses};
use super::schema::{BODY_COLUMN, FULLTEXT_ALIAS};

/// Translate a raw filter query into ordered predicate fragments.
///
/// A query with no recognisable clause becomes a single full-text search on
/// the body column, with the query text used verbatim.
pub fn translate_query(query: &str) -> Result<Vec<String>, LogQueryError> {
    let clauses = scan_clauses(query)?;

    if clauses.is_empty() {
        return Ok(vec![format!("{BODY_COLUMN} ILIKE '%{query}%' ")]);
    }

    clauses.iter().map(translate_clause).collect()
}

fn translate_clause(clause: &ClauseToken<'_>) -> Result<String, LogQueryError> {
    let symbol = clause.operator.symbol();

    if !clause.operator.is_text_search() {
        return Ok(format!("{} ", clause.with_operator(symbol)));
    }

    let operand = clause.operand.trim();
    if operand.is_empty() {
        return Err(LogQueryError::malformed(clause.raw));
    }

    let mut column = clause.column.to_lowercase();
    if column == FULLTEXT_ALIAS {
        column = BODY_COLUMN.to_string();
    }
    let pattern = strip_quotes(operand);

    let fragment = format!("{column} {symbol} '%{pattern}%' ");
    Ok(if clause.conjunction {
        format!("AND {fragment}")
    } else {
        fragment
    })
}

fn strip_quotes(s: &str) -> &str {
    let s = s.strip_prefix('\'').unwrap_or(s);
    s.strip_suffix('\'').unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_becomes_body_search() {
        assert_eq!(
            translate_query("connection refused").unwrap(),
            vec!["body ILIKE '%connection refused%' "]
        );
    }

    #[test]
    fn test_free_text_is_verbatim() {
        assert_eq!(
            translate_query("  Mixed CASE, punct!  ").unwrap(),
            vec!["body ILIKE '%  Mixed CASE, punct!  %' "]
        );
    }

    #[test]
    fn test_comparison_substitutes_symbol_once() {
        assert_eq!(
            translate_query("status gt 400").unwrap(),
            vec!["status > 400 "]
        );
    }

    #[test]
    fn test_all_comparison_operators() {
        let cases = [
            ("latency lt 5", "latency < 5 "),
            ("latency lte 5", "latency <= 5 "),
            ("latency gt 5", "latency > 5 "),
            ("latency gte 5", "latency >= 5 "),
        ];
        for (query, expected) in cases {
            assert_eq!(translate_query(query).unwrap(), vec![expected]);
        }
    }

    #[test]
    fn test_comparison_keeps_quoted_operand() {
        assert_eq!(
            translate_query("level gte 'warn'").unwrap(),
            vec!["level >= 'warn' "]
        );
    }

    #[test]
    fn test_membership_preserves_values() {
        assert_eq!(
            translate_query("host in (a,b,c)").unwrap(),
            vec!["host IN (a,b,c) "]
        );
        assert_eq!(
            translate_query("host nin ('a', 'b')").unwrap(),
            vec!["host NOT IN ('a', 'b') "]
        );
    }

    #[test]
    fn test_conjunction_kept_verbatim_for_substitution() {
        assert_eq!(
            translate_query("status gt 400 AND host in (a)").unwrap(),
            vec!["status > 400 ", "AND host IN (a) "]
        );
    }

    #[test]
    fn test_contains_with_conjunction() {
        assert_eq!(
            translate_query("and message contains 'timeout'").unwrap(),
            vec!["AND message ILIKE '%timeout%' "]
        );
    }

    #[test]
    fn test_fulltext_alias_targets_body() {
        assert_eq!(
            translate_query("fulltext contains 'timeout'").unwrap(),
            vec!["body ILIKE '%timeout%' "]
        );
        assert_eq!(
            translate_query("FullText ncontains 'debug'").unwrap(),
            vec!["body NOT ILIKE '%debug%' "]
        );
    }

    #[test]
    fn test_contains_unquoted_operand_with_spaces() {
        assert_eq!(
            translate_query("message contains disk full").unwrap(),
            vec!["message ILIKE '%disk full%' "]
        );
    }

    #[test]
    fn test_contains_lowercases_column() {
        assert_eq!(
            translate_query("Message contains 'x'").unwrap(),
            vec!["message ILIKE '%x%' "]
        );
    }

    #[test]
    fn test_contains_blank_operand_is_malformed() {
        assert_eq!(
            translate_query("message contains  ").unwrap_err(),
            LogQueryError::malformed("message contains  ")
        );
    }

    #[test]
    fn test_mixed_clauses() {
        assert_eq!(
            translate_query("status gte 500 and service in ('api') and body contains 'panic'")
                .unwrap(),
            vec![
                "status >= 500 ",
                "and service IN ('api') ",
                "AND body ILIKE '%panic%' ",
            ]
        );
    }

    #[test]
    fn test_stray_punctuation_with_clause_fails() {
        assert_eq!(
            translate_query("status gt 400 ;").unwrap_err(),
            LogQueryError::UnknownTokens
        );
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'abc'"), "abc");
        assert_eq!(strip_quotes("abc"), "abc");
        assert_eq!(strip_quotes("'abc"), "abc");
        assert_eq!(strip_quotes("'"), "");
    }
}
