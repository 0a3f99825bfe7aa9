//! Reading the assignment out of a solved flow
use super::node::{NodeKey, NodeKind, NodeTable};
use crate::error::{Error, Result};
use crate::min_flow::Flow;
use itertools::Itertools; // for positions, at_most_one
use std::collections::BTreeMap;
use tracing::{error, info};

/// applicant identifier -> provider identifier. Unmatched applicants are absent.
pub type Assignment = BTreeMap<String, String>;

///
/// Resolve the target node of an applicant's flow to the provider identifier.
///
/// A sub-quota node resolves to its master provider node.
///
fn resolve_provider(nodes: &NodeTable, applicant: usize, target: usize) -> Result<String> {
    match nodes.kind(target) {
        NodeKind::ProviderMaster(_) => Ok(nodes.name(target).to_string()),
        NodeKind::ProviderSubQuota(_) => {
            let master = nodes.get(&NodeKey::Provider(nodes.name(target).to_string()))?;
            Ok(nodes.name(master).to_string())
        }
        _ => {
            error!(
                "applicant <{}> matched to {}",
                nodes.name(applicant),
                nodes.node(target).key
            );
            Err(Error::UnexpectedTarget {
                applicant: nodes.name(applicant).to_string(),
                node: nodes.node(target).key.to_string(),
            })
        }
    }
}

///
/// Convert the flow into the applicant -> provider assignment.
///
/// For each applicant node the outgoing arcs carrying exactly one unit are the match.
/// More than one such arc is a `MultipleMatches` error.
///
pub fn interpret(flow: &Flow, nodes: &NodeTable) -> Result<Assignment> {
    assert_eq!(
        flow.size(),
        nodes.len(),
        "flow (n={}) does not match node table (n={})",
        flow.size(),
        nodes.len()
    );

    let mut assignment = Assignment::new();

    for applicant in nodes.applicants() {
        let target = match flow.row(applicant).iter().positions(|&f| f == 1).at_most_one() {
            Ok(None) => continue,
            Ok(Some(target)) => target,
            Err(_) => {
                error!("applicant <{}> matched twice", nodes.name(applicant));
                return Err(Error::MultipleMatches(nodes.name(applicant).to_string()));
            }
        };
        let provider = resolve_provider(nodes, applicant, target)?;
        assignment.insert(nodes.name(applicant).to_string(), provider);
    }

    info!(
        n_matched = assignment.len(),
        n_applicants = nodes.n_applicants(),
        "match created"
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::min_flow::Matrix;

    fn ids(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn table() -> NodeTable {
        NodeTable::new(
            ids(&["u1", "u2", "u3"]).into_iter(),
            ids(&["p1", "p2"]).into_iter(),
            ids(&["organic"]).into_iter(),
        )
        .unwrap()
    }

    #[test]
    fn reads_master_and_sub_quota_matches() {
        let nodes = table();
        let mut flow = Matrix::zeros(nodes.len());
        flow[(nodes.applicant(0), nodes.provider(1))] = 1;
        flow[(nodes.applicant(2), nodes.sub_quota(0))] = 1;

        let assignment = interpret(&flow, &nodes).unwrap();
        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment["u1"], "p2");
        assert_eq!(assignment["u3"], "p1");
        assert!(!assignment.contains_key("u2"));
    }

    #[test]
    fn multiple_matches_is_error() {
        let nodes = table();
        let mut flow = Matrix::zeros(nodes.len());
        flow[(nodes.applicant(1), nodes.provider(0))] = 1;
        flow[(nodes.applicant(1), nodes.provider(1))] = 1;
        assert_eq!(
            interpret(&flow, &nodes),
            Err(Error::MultipleMatches("u2".to_string()))
        );
    }

    #[test]
    fn non_provider_target_is_error() {
        let nodes = table();
        let mut flow = Matrix::zeros(nodes.len());
        flow[(nodes.applicant(0), nodes.category(0))] = 1;
        assert!(matches!(
            interpret(&flow, &nodes),
            Err(Error::UnexpectedTarget { .. })
        ));
    }

    #[test]
    fn empty_flow_is_empty_assignment() {
        let nodes = table();
        let flow = Matrix::zeros(nodes.len());
        assert_eq!(interpret(&flow, &nodes), Ok(Assignment::new()));
    }
}
