//! Keyword-based question classifier

use crate::models::types::{GroupColumn, QueryIntent};
use crate::utils::constants::{DEFAULT_TOP_N, REGION_KEYWORD, TOP_N_KEYWORDS};

/// Classify a free-text question. Case-insensitive substring scan only.
///
/// The top-n count is always `DEFAULT_TOP_N`; numbers in the question are
/// not read ("top 10" still yields 5).
pub fn classify(question: &str) -> QueryIntent {
    let q = question.to_lowercase();

    let top_n = TOP_N_KEYWORDS
        .iter()
        .any(|kw| q.contains(kw))
        .then_some(DEFAULT_TOP_N);

    // Region beats city; a question naming neither is grouped by city too
    let group_by = if q.contains(REGION_KEYWORD) {
        GroupColumn::Region
    } else {
        GroupColumn::City
    };

    QueryIntent { top_n, group_by }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_keywords() {
        assert_eq!(classify("Top cities").top_n, Some(5));
        assert_eq!(classify("which has the HIGHEST revenue").top_n, Some(5));
        assert_eq!(classify("Most profitable").top_n, Some(5));
        assert_eq!(classify("sales by city").top_n, None);
    }

    #[test]
    fn test_top_n_is_fixed() {
        assert_eq!(classify("top 10 regions").top_n, Some(5));
    }

    #[test]
    fn test_substring_match_is_loose() {
        // "stop" contains "top", "almost" contains "most"
        assert!(classify("stop here").is_top_n());
        assert!(classify("almost done").is_top_n());
    }

    #[test]
    fn test_group_precedence() {
        assert_eq!(classify("by Region").group_by, GroupColumn::Region);
        assert_eq!(classify("by city").group_by, GroupColumn::City);
        assert_eq!(classify("city or region?").group_by, GroupColumn::Region);
        assert_eq!(classify("total sales").group_by, GroupColumn::City);
    }
}
