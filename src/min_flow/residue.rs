//! Residue graph related definitions
//! - ResidueDirection
//! - ResidueEdge
//! - cheapest augmenting path search on the implicit residue graph
//!
//! The residue graph is never materialized. For the current flow `f`,
//! node `v` can move to node `w` either
//!
//! ```text
//! Forward:  along v -> w      if u(v,w) - f(v,w) > 0, weight +c(v,w)
//! Backward: cancelling w -> v if f(w,v) > 0,          weight -c(w,v)
//! ```
use super::flow::{CapacityMatrix, CostMatrix, Flow};
use itertools::Itertools; // for join
use tracing::{debug, trace};

/// Sentinel distance of unreached nodes.
/// Half of the max so that `INF + cost` never overflows.
pub const INF: i64 = i64::MAX / 2;

/// Residue direction enum
/// residue edge has two types
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResidueDirection {
    /// Forward edge: it increases the flow of `from -> to`
    Forward,
    /// Backward edge: it decreases the flow of `to -> from`
    Backward,
}

impl ResidueDirection {
    /// Map ResidueDirection into the sign of the flow change
    /// * Forward  -> +1
    /// * Backward -> -1
    pub fn int(&self) -> i64 {
        match *self {
            ResidueDirection::Forward => 1,
            ResidueDirection::Backward => -1,
        }
    }
}

impl std::fmt::Display for ResidueDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResidueDirection::Forward => write!(f, "+"),
            ResidueDirection::Backward => write!(f, "-"),
        }
    }
}

/// One movement `from -> to` of an augmenting path
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResidueEdge {
    pub from: usize,
    pub to: usize,
    /// The movable amount of the flow
    pub count: i64,
    /// Cost of the unit change of this flow (signed)
    pub weight: i64,
    pub direction: ResidueDirection,
}

impl ResidueEdge {
    ///
    /// Build the residue edge `from -> to` of the given direction for the current flow.
    ///
    pub fn new(
        capacity: &CapacityMatrix,
        cost: &CostMatrix,
        flow: &Flow,
        from: usize,
        to: usize,
        direction: ResidueDirection,
    ) -> ResidueEdge {
        let (count, weight) = match direction {
            ResidueDirection::Forward => {
                (capacity[(from, to)] - flow[(from, to)], cost[(from, to)])
            }
            ResidueDirection::Backward => (flow[(to, from)], -cost[(to, from)]),
        };
        ResidueEdge {
            from,
            to,
            count,
            weight,
            direction,
        }
    }
}

impl std::fmt::Display for ResidueEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}->{}({},{})w{}",
            self.from, self.to, self.direction, self.count, self.weight
        )
    }
}

///
/// Choose the residual movement `v -> w`, if any.
///
/// When both directions are movable the cheaper one is taken, Forward on a tie.
///
fn residue_direction(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    flow: &Flow,
    v: usize,
    w: usize,
) -> Option<ResidueDirection> {
    let forward = capacity[(v, w)] - flow[(v, w)] > 0;
    let backward = flow[(w, v)] > 0;
    match (forward, backward) {
        (false, false) => None,
        (true, false) => Some(ResidueDirection::Forward),
        (false, true) => Some(ResidueDirection::Backward),
        (true, true) => {
            if cost[(v, w)] <= -cost[(w, v)] {
                Some(ResidueDirection::Forward)
            } else {
                Some(ResidueDirection::Backward)
            }
        }
    }
}

///
/// Find the cheapest augmenting path from `source` to `sink` in the residue graph.
///
/// Label-correcting search: the unvisited node with the smallest tentative distance
/// (smallest index on a tie) is expanded next, and a node whose distance improves
/// becomes unvisited again, so negative weights of backward edges are handled.
///
/// Returns the path as edges ordered from `source` to `sink`,
/// or `None` if `sink` is unreachable or is the `source` itself.
///
pub fn find_cheapest_path(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    flow: &Flow,
    source: usize,
    sink: usize,
) -> Option<Vec<ResidueEdge>> {
    let n = flow.size();
    let mut dist = vec![INF; n];
    let mut visited = vec![false; n];
    let mut parents: Vec<Option<(usize, ResidueDirection)>> = vec![None; n];

    dist[source] = 0;
    let mut current = source;

    loop {
        visited[current] = true;

        for w in 0..n {
            let direction = match residue_direction(capacity, cost, flow, current, w) {
                Some(direction) => direction,
                None => continue,
            };
            let weight = match direction {
                ResidueDirection::Forward => cost[(current, w)],
                ResidueDirection::Backward => -cost[(w, current)],
            };
            let d = dist[current] + weight;
            if d < dist[w] {
                dist[w] = d;
                parents[w] = Some((current, direction));
                visited[w] = false;
            }
        }

        // next node to expand
        let next = (0..n)
            .filter(|&v| !visited[v] && dist[v] < INF)
            .min_by_key(|&v| (dist[v], v));
        match next {
            Some(v) => current = v,
            None => break,
        }
    }

    // an empty path cannot carry any flow
    if source == sink || dist[sink] >= INF {
        return None;
    }

    Some(trace_back(capacity, cost, flow, &parents, source, sink))
}

///
/// Walk the parent chain from `sink` back to `source` and return it as edges from `source`.
///
fn trace_back(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    flow: &Flow,
    parents: &[Option<(usize, ResidueDirection)>],
    source: usize,
    sink: usize,
) -> Vec<ResidueEdge> {
    let mut edges = Vec::new();
    let mut node = sink;
    while node != source {
        // a simple path has at most n-1 edges
        assert!(
            edges.len() < parents.len(),
            "parent chain from {} does not reach the source {}",
            sink,
            source
        );
        let (parent, direction) = parents[node].expect("reached node without parent");
        edges.push(ResidueEdge::new(capacity, cost, flow, parent, node, direction));
        node = parent;
    }
    edges.reverse();
    edges
}

/// Result of a single augmentation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Augmentation {
    /// bottleneck amount pushed along the path
    pub amount: i64,
    /// total cost change, `amount * sum(weight)`
    pub cost: i64,
}

///
/// Change the flow by `amount` along the edges of a path in residue graph
///
pub fn change_flow_along_edges(flow: &mut Flow, edges: &[ResidueEdge], amount: i64) {
    for edge in edges {
        let arc = match edge.direction {
            ResidueDirection::Forward => (edge.from, edge.to),
            ResidueDirection::Backward => (edge.to, edge.from),
        };
        flow[arc] += edge.direction.int() * amount;
    }
}

///
/// Update the flow along an augmenting path by its bottleneck.
///
pub fn apply_residual_edges_to_flow(flow: &mut Flow, edges: &[ResidueEdge]) -> Augmentation {
    // (1) determine flow_change_amount
    // that is the minimum of ResidueEdge.count
    let amount = edges.iter().map(|e| e.count).min().unwrap_or(0);

    // (2) apply these changes to the flow along the path
    change_flow_along_edges(flow, edges, amount);

    let cost = edges.iter().map(|e| amount * e.weight).sum();
    Augmentation { amount, cost }
}

fn format_path(edges: &[ResidueEdge]) -> String {
    edges.iter().join(",")
}

//
// public functions
//

/// augment the current flow along the cheapest path in the residual graph
pub fn improve_flow(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    flow: &mut Flow,
    source: usize,
    sink: usize,
) -> Option<Augmentation> {
    let path = find_cheapest_path(capacity, cost, flow, source, sink)?;
    trace!("augmenting path {}", format_path(&path));
    let augmentation = apply_residual_edges_to_flow(flow, &path);
    debug!(
        amount = augmentation.amount,
        cost = augmentation.cost,
        length = path.len(),
        "augmented"
    );
    Some(augmentation)
}
