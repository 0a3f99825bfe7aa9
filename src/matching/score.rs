//! Eligibility and cost of a single (applicant, provider) pair
use super::types::{Applicant, Provider, WeightingConfig};
use crate::error::{Error, Result};
use itertools::Itertools; // for unique
use std::collections::HashSet;

/// Identifier and category comparison, ignoring case (Unicode aware)
pub fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

///
/// Number of keywords shared by the two lists.
///
/// Comparison ignores case and each keyword counts once, however often it is repeated.
///
pub fn keyword_overlap(a: &[String], b: &[String]) -> usize {
    let b: HashSet<String> = b.iter().map(|k| k.to_lowercase()).collect();
    a.iter()
        .map(|k| k.to_lowercase())
        .unique()
        .filter(|k| b.contains(k))
        .count()
}

/// rank of the provider in the applicant's preferences, first occurrence only
pub fn preference_rank(applicant: &Applicant, provider: &Provider) -> Option<usize> {
    applicant
        .preferences
        .iter()
        .position(|p| same_name(p, &provider.id))
}

/// rank of the provider's category in the applicant's category choices, first occurrence only
pub fn category_rank(applicant: &Applicant, provider: &Provider) -> Option<usize> {
    applicant
        .categories
        .iter()
        .position(|c| same_name(c, &provider.category))
}

///
/// Whether the applicant can be routed to the provider at all.
///
/// Any of
/// 1. the applicant listed the provider as a preference
/// 2. category matching is on and the provider's category is one of the applicant's choices
/// 3. keyword matching is on and the keyword overlap exceeds the threshold
///
pub fn is_eligible(applicant: &Applicant, provider: &Provider, config: &WeightingConfig) -> bool {
    preference_rank(applicant, provider).is_some()
        || (config.category_matching && category_rank(applicant, provider).is_some())
        || (config.keyword_matching
            && keyword_overlap(&applicant.keywords, &provider.keywords) > config.keyword_threshold)
}

fn weight(table: &'static str, weights: &[i64], index: usize) -> Result<i64> {
    weights
        .get(index)
        .copied()
        .ok_or(Error::MissingWeight { table, index })
}

///
/// Cost of assigning the applicant to the provider.
///
/// Sum of the preference weight, plus the category weight if category matching is on,
/// plus the keyword weight if keyword matching is on. Each term falls back to its
/// "no match" weight.
///
pub fn cost(applicant: &Applicant, provider: &Provider, config: &WeightingConfig) -> Result<i64> {
    let mut total = match preference_rank(applicant, provider) {
        Some(rank) => weight("preference", &config.preference_weights, rank)?,
        None => config.no_preference_weight,
    };

    if config.category_matching {
        total += match category_rank(applicant, provider) {
            Some(rank) => weight("category", &config.category_weights, rank)?,
            None => config.no_category_weight,
        };
    }

    if config.keyword_matching {
        let overlap = keyword_overlap(&applicant.keywords, &provider.keywords);
        total += if overlap > config.keyword_threshold {
            // overlap >= 1 here, so the table starts at one shared keyword
            weight("keyword", &config.keyword_weights, overlap - 1)?
        } else {
            config.no_keyword_weight
        };
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn config() -> WeightingConfig {
        WeightingConfig {
            categories: strings(&["organic", "physical"]),
            preference_weights: vec![1, 2, 3],
            no_preference_weight: 100,
            category_matching: false,
            category_weights: vec![10, 20],
            no_category_weight: 50,
            keyword_matching: false,
            keyword_threshold: 1,
            keyword_weights: vec![9, 8, 7],
            no_keyword_weight: 30,
        }
    }

    #[test]
    fn keyword_overlap_ignores_case_and_duplicates() {
        let a = strings(&["NMR", "nmr", "catalysis", "lasers"]);
        let b = strings(&["nmr", "Catalysis", "catalysis", "polymers"]);
        assert_eq!(keyword_overlap(&a, &b), 2);
        assert_eq!(keyword_overlap(&b, &a), 2);
        assert_eq!(keyword_overlap(&a, &[]), 0);
    }

    #[test]
    fn ranks() {
        let u = Applicant::new("u1")
            .with_preferences(&["p2", "P1", "p1"])
            .with_categories(&["physical", "Organic"]);
        let p1 = Provider::new("p1", 1, "organic");
        let p3 = Provider::new("p3", 1, "inorganic");
        assert_eq!(preference_rank(&u, &p1), Some(1));
        assert_eq!(preference_rank(&u, &p3), None);
        assert_eq!(category_rank(&u, &p1), Some(1));
        assert_eq!(category_rank(&u, &p3), None);
    }

    #[test]
    fn ranks_ignore_non_ascii_case() {
        let u = Applicant::new("u1")
            .with_preferences(&["Émile"])
            .with_categories(&["ÉLECTROCHIMIE"]);
        let p = Provider::new("émile", 1, "électrochimie");
        assert!(same_name("Émile", "émile"));
        assert_eq!(preference_rank(&u, &p), Some(0));
        assert_eq!(category_rank(&u, &p), Some(0));
    }

    #[test]
    fn eligibility_rules() {
        let mut c = config();
        let u = Applicant::new("u1")
            .with_preferences(&["p1"])
            .with_categories(&["organic"])
            .with_keywords(&["a", "b", "c"]);
        let by_pref = Provider::new("p1", 1, "physical");
        let by_category = Provider::new("p2", 1, "organic");
        let by_keyword = Provider::new("p3", 1, "physical").with_keywords(&["a", "b"]);
        let one_keyword = Provider::new("p4", 1, "physical").with_keywords(&["a"]);

        assert!(is_eligible(&u, &by_pref, &c));
        assert!(!is_eligible(&u, &by_category, &c));
        assert!(!is_eligible(&u, &by_keyword, &c));

        c.category_matching = true;
        assert!(is_eligible(&u, &by_category, &c));

        c.keyword_matching = true;
        assert!(is_eligible(&u, &by_keyword, &c));
        // overlap 1 does not exceed threshold 1
        assert!(!is_eligible(&u, &one_keyword, &c));
    }

    #[test]
    fn cost_terms() {
        let mut c = config();
        let u = Applicant::new("u1")
            .with_preferences(&["p2", "p1"])
            .with_categories(&["physical", "organic"])
            .with_keywords(&["a", "b", "c"]);
        let p1 = Provider::new("p1", 1, "organic").with_keywords(&["a", "b"]);
        let p9 = Provider::new("p9", 1, "inorganic");

        assert_eq!(cost(&u, &p1, &c), Ok(2));
        assert_eq!(cost(&u, &p9, &c), Ok(100));

        c.category_matching = true;
        assert_eq!(cost(&u, &p1, &c), Ok(2 + 20));
        assert_eq!(cost(&u, &p9, &c), Ok(100 + 50));

        c.keyword_matching = true;
        // two shared keywords: keyword_weights[1]
        assert_eq!(cost(&u, &p1, &c), Ok(2 + 20 + 8));
        assert_eq!(cost(&u, &p9, &c), Ok(100 + 50 + 30));
    }

    #[test]
    fn short_weight_table_is_error() {
        let c = WeightingConfig {
            preference_weights: vec![1],
            ..config()
        };
        let u = Applicant::new("u1").with_preferences(&["p0", "p1"]);
        let p1 = Provider::new("p1", 1, "organic");
        assert_eq!(
            cost(&u, &p1, &c),
            Err(Error::MissingWeight {
                table: "preference",
                index: 1
            })
        );
    }
}
