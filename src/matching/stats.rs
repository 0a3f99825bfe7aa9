//! Counts describing an assignment
//!
//! Only numbers, rendering them is up to the caller.
use super::interpret::Assignment;
use super::node::NodeKey;
use super::score::preference_rank;
use super::types::{Applicant, Provider, WeightingConfig};
use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};

/// Breakdown of an assignment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationStats {
    pub n_applicants: usize,
    pub n_matched: usize,
    /// `by_choice[r]`: applicants matched to their r-th preference
    pub by_choice: Vec<usize>,
    /// matched to a provider outside their preferences (category or keyword route)
    pub n_by_other: usize,
    /// providers without any applicant
    pub n_idle_providers: usize,
    /// `by_category[k]`: applicants matched into `WeightingConfig::categories[k]`
    pub by_category: Vec<usize>,
}

impl AllocationStats {
    pub fn n_unmatched(&self) -> usize {
        self.n_applicants.saturating_sub(self.n_matched)
    }
    /// applicants matched to one of their preferences
    pub fn n_by_choice(&self) -> usize {
        self.by_choice.iter().sum()
    }
    /// share of matched applicants in percent, zero without applicants
    pub fn matched_percentage(&self) -> f64 {
        if self.n_applicants == 0 {
            0.0
        } else {
            self.n_matched as f64 * 100.0 / self.n_applicants as f64
        }
    }
}

///
/// Compute the statistics of `assignment` over the given records.
///
/// `by_choice` has one entry per preference weight, more if some preference list is longer.
/// Identifiers in the assignment that are not among the records are `MissingNode`.
///
pub fn stats(
    assignment: &Assignment,
    applicants: &[Applicant],
    providers: &[Provider],
    config: &WeightingConfig,
) -> Result<AllocationStats> {
    let applicant_of: HashMap<&str, &Applicant> =
        applicants.iter().map(|a| (a.id.as_str(), a)).collect();
    let provider_of: HashMap<&str, &Provider> =
        providers.iter().map(|p| (p.id.as_str(), p)).collect();

    let n_choices = applicants
        .iter()
        .map(|a| a.preferences.len())
        .chain(Some(config.preference_weights.len()))
        .max()
        .unwrap_or(0);
    let mut s = AllocationStats {
        n_applicants: applicants.len(),
        n_matched: assignment.len(),
        by_choice: vec![0; n_choices],
        by_category: vec![0; config.categories.len()],
        ..Default::default()
    };

    let mut busy: HashSet<&str> = HashSet::new();
    for (applicant_id, provider_id) in assignment.iter() {
        let missing = |key: NodeKey| Error::MissingNode(key.to_string());
        let applicant = applicant_of
            .get(applicant_id.as_str())
            .ok_or_else(|| missing(NodeKey::Applicant(applicant_id.clone())))?;
        let provider = provider_of
            .get(provider_id.as_str())
            .ok_or_else(|| missing(NodeKey::Provider(provider_id.clone())))?;
        busy.insert(provider.id.as_str());

        match preference_rank(applicant, provider) {
            Some(rank) => s.by_choice[rank] += 1,
            None => s.n_by_other += 1,
        }
        match config.category_index(&provider.category) {
            Some(k) => s.by_category[k] += 1,
            None => warn!(
                "provider <{}> of <{}> has unrecognized category <{}>",
                provider.id, applicant.id, provider.category
            ),
        }
    }
    s.n_idle_providers = providers
        .iter()
        .filter(|p| !busy.contains(p.id.as_str()))
        .count();

    info!(
        n_matched = s.n_matched,
        n_by_choice = s.n_by_choice(),
        n_by_other = s.n_by_other,
        n_idle_providers = s.n_idle_providers,
        "allocation stats"
    );
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WeightingConfig {
        WeightingConfig {
            categories: vec!["organic".to_string(), "physical".to_string()],
            preference_weights: vec![1, 2, 3],
            ..Default::default()
        }
    }

    fn assignment(pairs: &[(&str, &str)]) -> Assignment {
        pairs
            .iter()
            .map(|&(a, p)| (a.to_string(), p.to_string()))
            .collect()
    }

    #[test]
    fn breakdown() {
        let applicants = vec![
            Applicant::new("u1").with_preferences(&["p1", "p2"]),
            Applicant::new("u2").with_preferences(&["p1", "P2"]),
            Applicant::new("u3").with_categories(&["physical"]),
            Applicant::new("u4").with_preferences(&["p1"]),
        ];
        let providers = vec![
            Provider::new("p1", 1, "organic"),
            Provider::new("p2", 2, "Physical"),
            Provider::new("p3", 1, "physical"),
        ];
        let a = assignment(&[("u1", "p1"), ("u2", "p2"), ("u3", "p2")]);
        let s = stats(&a, &applicants, &providers, &config()).unwrap();

        assert_eq!(s.n_applicants, 4);
        assert_eq!(s.n_matched, 3);
        assert_eq!(s.n_unmatched(), 1);
        assert_eq!(s.by_choice, vec![1, 1, 0]);
        assert_eq!(s.n_by_choice(), 2);
        assert_eq!(s.n_by_other, 1);
        assert_eq!(s.n_idle_providers, 1);
        assert_eq!(s.by_category, vec![1, 2]);
        assert_eq!(s.matched_percentage(), 75.0);
    }

    #[test]
    fn long_preference_lists_widen_choices() {
        let applicants = vec![Applicant::new("u1").with_preferences(&["a", "b", "c", "d", "p1"])];
        let providers = vec![Provider::new("p1", 1, "organic")];
        let s = stats(&assignment(&[("u1", "p1")]), &applicants, &providers, &config()).unwrap();
        assert_eq!(s.by_choice, vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn empty() {
        let s = stats(&Assignment::new(), &[], &[], &config()).unwrap();
        assert_eq!(s.n_unmatched(), 0);
        assert_eq!(s.matched_percentage(), 0.0);
        assert_eq!(s.by_category, vec![0, 0]);
    }

    #[test]
    fn unknown_identifier_is_error() {
        let applicants = vec![Applicant::new("u1")];
        let providers = vec![Provider::new("p1", 1, "organic")];
        assert_eq!(
            stats(&assignment(&[("u1", "p9")]), &applicants, &providers, &config()),
            Err(Error::MissingNode("provider <p9>".to_string()))
        );
        assert_eq!(
            stats(&assignment(&[("u9", "p1")]), &applicants, &providers, &config()),
            Err(Error::MissingNode("applicant <u9>".to_string()))
        );
    }
}
