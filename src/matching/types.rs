//! Input records of the allocation and the weighting configuration.
//!
//! All of them are read-only to the builder.
use super::score::same_name;
use crate::error::{Error, Result};
use itertools::Itertools; // for unique
use serde::{Deserialize, Serialize};

/// The side being assigned. Consumes at most one unit of flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Applicant {
    pub id: String,
    /// route through the sub-quota node of every provider
    pub sub_quota: bool,
    /// provider identifiers, most preferred first
    pub preferences: Vec<String>,
    pub keywords: Vec<String>,
    /// category names, most preferred first
    pub categories: Vec<String>,
}

impl Applicant {
    pub fn new(id: &str) -> Applicant {
        Applicant {
            id: id.to_string(),
            ..Default::default()
        }
    }
    pub fn with_preferences(mut self, preferences: &[&str]) -> Applicant {
        self.preferences = preferences.iter().map(|s| s.to_string()).collect();
        self
    }
    pub fn with_keywords(mut self, keywords: &[&str]) -> Applicant {
        self.keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }
    pub fn with_categories(mut self, categories: &[&str]) -> Applicant {
        self.categories = categories.iter().map(|s| s.to_string()).collect();
        self
    }
    pub fn with_sub_quota(mut self) -> Applicant {
        self.sub_quota = true;
        self
    }
}

/// The capacity-limited side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    pub id: String,
    /// number of applicants it accepts, positive
    pub capacity: u32,
    pub category: String,
    pub keywords: Vec<String>,
}

impl Provider {
    pub fn new(id: &str, capacity: u32, category: &str) -> Provider {
        Provider {
            id: id.to_string(),
            capacity,
            category: category.to_string(),
            keywords: Vec::new(),
        }
    }
    pub fn with_keywords(mut self, keywords: &[&str]) -> Provider {
        self.keywords = keywords.iter().map(|s| s.to_string()).collect();
        self
    }
}

///
/// Cost tables and switches of the matching rules.
///
/// Every table is indexed by a rank starting at zero:
/// * `preference_weights[r]`: provider is the applicant's r-th preference
/// * `category_weights[r]`: provider's category is the applicant's r-th category choice
/// * `keyword_weights[k - 1]`: they share `k` keywords
///
/// Deserializes from JSON with missing fields taking the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightingConfig {
    /// recognized category names, one category node each
    pub categories: Vec<String>,
    pub preference_weights: Vec<i64>,
    pub no_preference_weight: i64,
    pub category_matching: bool,
    pub category_weights: Vec<i64>,
    pub no_category_weight: i64,
    pub keyword_matching: bool,
    /// keyword overlap must be strictly greater than this to count
    pub keyword_threshold: usize,
    pub keyword_weights: Vec<i64>,
    pub no_keyword_weight: i64,
}

impl Default for WeightingConfig {
    fn default() -> Self {
        WeightingConfig {
            categories: Vec::new(),
            preference_weights: vec![1, 2, 3, 4, 5],
            no_preference_weight: 10,
            category_matching: false,
            category_weights: vec![1, 2, 3],
            no_category_weight: 10,
            keyword_matching: false,
            keyword_threshold: 0,
            keyword_weights: vec![3, 2, 1],
            no_keyword_weight: 10,
        }
    }
}

/// the largest `f(applicant)`, zero without applicants
fn longest(applicants: &[Applicant], f: impl Fn(&Applicant) -> usize) -> usize {
    applicants.iter().map(f).max().unwrap_or(0)
}

impl WeightingConfig {
    /// index of the recognized category equal to `name`, ignoring case
    pub fn category_index(&self, name: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|c| same_name(c, name))
    }

    ///
    /// Check the weights against the applicants before building a network.
    ///
    /// * no weight or fallback is negative
    /// * `preference_weights` covers the longest preference list
    /// * `category_weights` covers the longest category choice list, if category matching is on
    /// * `keyword_weights` covers the most distinct keywords of an applicant, if keyword
    ///   matching is on
    ///
    /// `build` does not call this. Without it a too short table is only detected when a
    /// rank beyond it is actually scored.
    ///
    pub fn validate(&self, applicants: &[Applicant]) -> Result<()> {
        let tables: [(&'static str, &[i64], i64); 3] = [
            ("preference", self.preference_weights.as_slice(), self.no_preference_weight),
            ("category", self.category_weights.as_slice(), self.no_category_weight),
            ("keyword", self.keyword_weights.as_slice(), self.no_keyword_weight),
        ];
        for (table, weights, fallback) in tables {
            if let Some(&value) = weights.iter().chain(Some(&fallback)).find(|&&w| w < 0) {
                return Err(Error::NegativeWeight { table, value });
            }
        }

        let required = [
            (
                "preference",
                true,
                self.preference_weights.len(),
                longest(applicants, |a| a.preferences.len()),
            ),
            (
                "category",
                self.category_matching,
                self.category_weights.len(),
                longest(applicants, |a| a.categories.len()),
            ),
            (
                "keyword",
                self.keyword_matching,
                self.keyword_weights.len(),
                longest(applicants, |a| {
                    a.keywords.iter().map(|k| k.to_lowercase()).unique().count()
                }),
            ),
        ];
        for (table, enabled, len, required) in required {
            if enabled && required > len {
                return Err(Error::WeightTableTooShort {
                    table,
                    required,
                    len,
                });
            }
        }
        Ok(())
    }
}
