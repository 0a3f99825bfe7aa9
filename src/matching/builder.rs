//! Translation of applicants, providers and weights into a flow network
//!
//! ```text
//! source --1--> applicant --1--> provider ---------capacity--------> category --cap--> sink
//!                        \                   ^
//!                         --1--> sub-quota --capacity-1
//! ```
//!
//! Applicants with the sub-quota flag are linked to the sub-quota node of the provider,
//! all others to the provider (master) node.
use super::node::NodeTable;
use super::score;
use super::types::{Applicant, Provider, WeightingConfig};
use crate::error::{Error, Result};
use crate::min_flow::{CapacityMatrix, CostMatrix, Matrix};
use itertools::iproduct;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Non-fatal inconsistency of the input. The offending entry contributes no flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// a preference names a provider that does not exist
    UnknownProvider { applicant: String, provider: String },
    /// a provider declares a category that is not one of the configured categories
    UnknownCategory { provider: String, category: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Warning::UnknownProvider {
                applicant,
                provider,
            } => write!(
                f,
                "applicant <{}> referenced non-existent provider <{}>",
                applicant, provider
            ),
            Warning::UnknownCategory { provider, category } => write!(
                f,
                "category <{}> not recognized for provider <{}>",
                category, provider
            ),
        }
    }
}

/// Flow network of one allocation
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    pub nodes: NodeTable,
    pub capacity: CapacityMatrix,
    pub cost: CostMatrix,
    pub warnings: Vec<Warning>,
}

/// Capacity of every category -> sink arc: `floor(n_applicants * percentage / 100)`
pub fn category_cap(n_applicants: usize, capped_percentage: u32) -> i64 {
    (n_applicants as i64 * capped_percentage as i64) / 100
}

/// Provider identifier (lower-cased) to position, first occurrence wins
fn provider_lookup(providers: &[Provider]) -> HashMap<String, usize> {
    let mut lookup = HashMap::new();
    for (j, provider) in providers.iter().enumerate() {
        lookup.entry(provider.id.to_lowercase()).or_insert(j);
    }
    lookup
}

///
/// Build the flow network.
///
/// * `capped_percentage`: share of the applicants (0..=100) each category may take
///
/// Unknown providers in preference lists and unrecognized provider categories become
/// warnings. Duplicate identifiers and too short weight tables are errors.
///
pub fn build(
    applicants: &[Applicant],
    providers: &[Provider],
    capped_percentage: u32,
    config: &WeightingConfig,
) -> Result<FlowNetwork> {
    if capped_percentage > 100 {
        return Err(Error::InvalidPercentage(capped_percentage));
    }
    info!(
        n_applicants = applicants.len(),
        n_providers = providers.len(),
        n_categories = config.categories.len(),
        capped_percentage,
        "building network"
    );

    let nodes = NodeTable::new(
        applicants.iter().map(|a| a.id.clone()),
        providers.iter().map(|p| p.id.clone()),
        config.categories.iter().cloned(),
    )?;
    let n = nodes.len();
    let mut capacity = Matrix::zeros(n);
    let mut cost = Matrix::zeros(n);
    let mut warnings = Vec::new();

    // preferences naming unknown providers
    let lookup = provider_lookup(providers);
    for applicant in applicants {
        for preference in applicant.preferences.iter() {
            if !lookup.contains_key(&preference.to_lowercase()) {
                warnings.push(Warning::UnknownProvider {
                    applicant: applicant.id.clone(),
                    provider: preference.clone(),
                });
            }
        }
    }

    // source -> applicant
    for i in 0..applicants.len() {
        capacity[(nodes.source(), nodes.applicant(i))] = 1;
    }

    // applicant -> provider or sub-quota
    for (i, j) in iproduct!(0..applicants.len(), 0..providers.len()) {
        let (applicant, provider) = (&applicants[i], &providers[j]);
        let from = nodes.applicant(i);
        let to = if applicant.sub_quota {
            nodes.sub_quota(j)
        } else {
            nodes.provider(j)
        };
        if score::is_eligible(applicant, provider, config) {
            debug!("linking <{}> to {}", applicant.id, nodes.node(to).key);
            capacity[(from, to)] = 1;
        }
        cost[(from, to)] = score::cost(applicant, provider, config)?;
    }

    // sub-quota -> provider, one unit kept for the direct route
    for (j, provider) in providers.iter().enumerate() {
        capacity[(nodes.sub_quota(j), nodes.provider(j))] = (provider.capacity as i64 - 1).max(0);
    }

    // provider -> category
    for (j, provider) in providers.iter().enumerate() {
        match config.category_index(&provider.category) {
            Some(k) => {
                capacity[(nodes.provider(j), nodes.category(k))] = provider.capacity as i64;
            }
            None => warnings.push(Warning::UnknownCategory {
                provider: provider.id.clone(),
                category: provider.category.clone(),
            }),
        }
    }

    // category -> sink
    let cap = category_cap(applicants.len(), capped_percentage);
    info!("capacity of each category is {}", cap);
    for k in 0..config.categories.len() {
        capacity[(nodes.category(k), nodes.sink())] = cap;
    }

    for warning in warnings.iter() {
        warn!("{}", warning);
    }

    Ok(FlowNetwork {
        nodes,
        capacity,
        cost,
        warnings,
    })
}
