//! Capacitated applicant/provider allocation on top of [`crate::min_flow`]
//!
//! Builder -> Solver -> Interpreter, one full assignment per call.
pub mod builder;
pub mod interpret;
pub mod node;
pub mod score;
pub mod stats;
pub mod types;

pub use builder::{build, category_cap, FlowNetwork, Warning};
pub use interpret::{interpret, Assignment};
pub use node::{Node, NodeKey, NodeKind, NodeTable};
pub use stats::{stats, AllocationStats};
pub use types::{Applicant, Provider, WeightingConfig};

use crate::error::Result;
use crate::min_flow::min_cost_max_flow;
use tracing::info;

/// Outcome of [`allocate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub assignment: Assignment,
    pub warnings: Vec<Warning>,
    /// number of matched applicants
    pub total_flow: i64,
    pub total_cost: i64,
}

impl Allocation {
    /// counts of this allocation, see [`stats`]
    pub fn stats(
        &self,
        applicants: &[Applicant],
        providers: &[Provider],
        config: &WeightingConfig,
    ) -> Result<AllocationStats> {
        stats::stats(&self.assignment, applicants, providers, config)
    }
}

///
/// Assign applicants to providers, maximizing the number of matched applicants
/// and then minimizing the total cost.
///
/// * `capped_percentage`: each category takes at most this share (0..=100) of the applicants
///
/// Warnings about inconsistent input are returned with the still-valid assignment.
///
pub fn allocate(
    applicants: &[Applicant],
    providers: &[Provider],
    capped_percentage: u32,
    config: &WeightingConfig,
) -> Result<Allocation> {
    info!("allocation started with capped percentage of {}", capped_percentage);
    let network = build(applicants, providers, capped_percentage, config)?;
    let solution = min_cost_max_flow(
        &network.capacity,
        &network.cost,
        network.nodes.source(),
        network.nodes.sink(),
    );
    let assignment = interpret(&solution.flow, &network.nodes)?;

    Ok(Allocation {
        assignment,
        warnings: network.warnings,
        total_flow: solution.total_flow,
        total_cost: solution.total_cost,
    })
}
