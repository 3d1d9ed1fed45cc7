//! Account inclusion filter
//!
//! Accounts can be selected by an explicit id allowlist, by case-insensitive
//! name search terms, or both. With neither configured every account is
//! included.
//!
//! # Examples
//!
//! ```
//! use awscost_core::filters::AccountFilter;
//! use awscost_core::types::Account;
//!
//! let filter = AccountFilter::new()
//!     .with_account_ids("111111111111|222222222222")
//!     .with_search_terms("prod|Staging");
//!
//! assert!(filter.includes(&Account::new("111111111111", "sandbox")));
//! assert!(filter.includes(&Account::new("333333333333", "payments-PROD")));
//! assert!(!filter.includes(&Account::new("444444444444", "sandbox")));
//! ```

use crate::types::Account;

/// Separator used by pipe-delimited configuration values
pub const LIST_SEPARATOR: char = '|';

/// Split a pipe-delimited value, trimming and dropping empty items
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decides which organization accounts get a report
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccountFilter {
    /// Explicit id allowlist
    pub account_ids: Option<Vec<String>>,
    /// Lower-cased name substrings
    pub search_terms: Option<Vec<String>>,
}

impl AccountFilter {
    /// Create a filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the id allowlist from a pipe-delimited string
    pub fn with_account_ids(mut self, raw: &str) -> Self {
        self.account_ids = Some(split_list(raw));
        self
    }

    /// Set the name search terms from a pipe-delimited string
    pub fn with_search_terms(mut self, raw: &str) -> Self {
        self.search_terms = Some(
            split_list(raw)
                .into_iter()
                .map(|term| term.to_lowercase())
                .collect(),
        );
        self
    }

    /// Check if an account should be reported on
    ///
    /// An account matches when its id is allowlisted or its lower-cased name
    /// contains one of the search terms. With neither list configured every
    /// account matches.
    pub fn includes(&self, account: &Account) -> bool {
        if self.account_ids.is_none() && self.search_terms.is_none() {
            return true;
        }

        let id_listed = self
            .account_ids
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|id| id == &account.id));
        if id_listed {
            return true;
        }

        let name = account.name.to_lowercase();
        self.search_terms
            .as_ref()
            .is_some_and(|terms| terms.iter().any(|term| name.contains(term.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("a|b| c |"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_empty_filter_includes_everything() {
        let filter = AccountFilter::new();
        assert!(filter.includes(&Account::new("1", "anything")));
    }

    #[test]
    fn test_search_terms_are_case_insensitive() {
        let filter = AccountFilter::new().with_search_terms("Prod");
        assert!(filter.includes(&Account::new("1", "PRODUCTION")));
        assert!(filter.includes(&Account::new("2", "web-prod")));
        assert!(!filter.includes(&Account::new("3", "dev")));
    }

    #[test]
    fn test_allowlist_wins_over_search_terms() {
        let filter = AccountFilter::new()
            .with_account_ids("3")
            .with_search_terms("prod");
        assert!(filter.includes(&Account::new("3", "dev")));
        assert!(!filter.includes(&Account::new("4", "dev")));
    }

    #[test]
    fn test_allowlist_alone_restricts() {
        let filter = AccountFilter::new().with_account_ids("3|5");
        assert!(filter.includes(&Account::new("5", "dev")));
        assert!(!filter.includes(&Account::new("4", "dev")));
    }
}
