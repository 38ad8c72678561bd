//! Column-name extraction shared by clause translation and schema resolution

use super::error::LogQueryError;

/// Conjunction keyword that may lead a clause
pub const CONJUNCTION: &str = "and";

/// Lowercased column name referenced by a clause or fragment.
///
/// The text must hold at least three words (column, operator, operand, with an
/// optional leading `and`). The column is the first word, or the second when
/// the first is the conjunction.
pub fn column_name(text: &str) -> Result<String, LogQueryError> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.len() < 3 {
        return Err(LogQueryError::malformed(text));
    }

    let column = if words[0] == CONJUNCTION {
        words[1]
    } else {
        words[0]
    };
    Ok(column.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name_plain() {
        assert_eq!(column_name("status > 400 ").unwrap(), "status");
    }

    #[test]
    fn test_column_name_skips_conjunction() {
        assert_eq!(column_name("and host IN (a,b) ").unwrap(), "host");
        assert_eq!(column_name("AND Message ILIKE '%x%' ").unwrap(), "message");
    }

    #[test]
    fn test_column_name_lowercases() {
        assert_eq!(column_name("User_ID gt 5").unwrap(), "user_id");
    }

    #[test]
    fn test_column_name_not_fooled_by_and_prefix() {
        assert_eq!(column_name("android gt 5").unwrap(), "android");
    }

    #[test]
    fn test_column_name_requires_three_words() {
        assert_eq!(
            column_name("status >").unwrap_err(),
            LogQueryError::malformed("status >")
        );
        assert!(column_name("").is_err());
    }
}
