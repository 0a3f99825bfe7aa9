//!
//! Minimum cost maximum flow on a dense capacity/cost matrix pair,
//! by successive cheapest augmenting paths.
//!
pub mod flow;
#[cfg(test)]
pub mod mocks;
pub mod residue;
pub mod utils;

pub use flow::{is_valid_flow, CapacityMatrix, CostMatrix, Flow, Matrix};
pub use residue::{improve_flow, Augmentation, ResidueDirection, ResidueEdge, INF};
use tracing::info;
use utils::draw_with_flow;

/// Output of [`min_cost_max_flow`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxFlow {
    /// flow on each arc
    pub flow: Flow,
    /// total amount of flow leaving the source
    pub total_flow: i64,
    /// total cost of the flow
    pub total_cost: i64,
}

//
// public functions
//

///
/// Find the maximum flow from `source` to `sink` with the minimum cost among the maximum flows.
///
/// * `capacity[(i, j)]`: capacity of the arc `i -> j`, zero if there is no arc
/// * `cost[(i, j)]`: cost per unit flow on the arc `i -> j`
///
/// Pure function of the inputs. With the same input the output is always identical.
/// Panics if `source == sink`.
///
pub fn min_cost_max_flow(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    source: usize,
    sink: usize,
) -> MaxFlow {
    let n = capacity.size();
    assert_eq!(
        cost.size(),
        n,
        "cost matrix (n={}) does not match capacity matrix (n={})",
        cost.size(),
        n
    );
    assert!(
        source < n && sink < n,
        "source {} or sink {} is out of the network (n={})",
        source,
        sink,
        n
    );
    assert_ne!(source, sink, "source and sink must be different nodes");

    let flow = Matrix::zeros(n);
    min_cost_max_flow_from(capacity, cost, flow, source, sink)
}

//
// internal functions
//

///
/// Augment by starting from the specified flow values until the sink is unreachable.
///
fn min_cost_max_flow_from(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    init_flow: Flow,
    source: usize,
    sink: usize,
) -> MaxFlow {
    let mut flow = init_flow;
    let mut total_flow = 0;
    let mut total_cost = 0;
    let mut n_paths = 0;

    loop {
        debug_assert!(is_valid_flow(&flow, capacity, source, sink));
        match improve_flow(capacity, cost, &mut flow, source, sink) {
            Some(augmentation) => {
                total_flow += augmentation.amount;
                total_cost += augmentation.cost;
                n_paths += 1;
                continue;
            }
            None => {
                break;
            }
        };
    }

    draw_with_flow(capacity, cost, &flow);
    info!(total_flow, total_cost, n_paths, "min cost max flow found");

    MaxFlow {
        flow,
        total_flow,
        total_cost,
    }
}
