//!
//! utils
//!
//! conversion into petgraph `DiGraph` for drawing
//!
use super::flow::{CapacityMatrix, CostMatrix, Flow};
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, Graph, NodeIndex};
use petgraph::EdgeType;
use tracing::trace;

/// Edge attributes of the drawn network.
///
/// `[f/u] c` = flow / capacity, cost per unit flow
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    pub capacity: i64,
    pub cost: i64,
    pub flow: i64,
}

impl std::fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}] {}", self.flow, self.capacity, self.cost)
    }
}

/// node weight is the matrix index
pub type FlowGraph = DiGraph<usize, FlowEdge>;

///
/// Convert the matrices into a graph with one edge per positive capacity cell.
/// `NodeIndex::new(i)` corresponds to the matrix index `i`.
///
pub fn to_flow_graph(
    capacity: &CapacityMatrix,
    cost: &CostMatrix,
    flow: Option<&Flow>,
) -> FlowGraph {
    let n = capacity.size();
    let mut graph: FlowGraph = Graph::with_capacity(n, 0);
    for i in 0..n {
        graph.add_node(i);
    }
    for (i, j, u) in capacity.iter_nonzero().filter(|&(_, _, u)| u > 0) {
        let edge = FlowEdge {
            capacity: u,
            cost: cost[(i, j)],
            flow: flow.map_or(0, |f| f[(i, j)]),
        };
        graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), edge);
    }
    graph
}

pub fn draw<'a, N: 'a, E: 'a, Ty, Ix>(graph: &'a Graph<N, E, Ty, Ix>)
where
    E: std::fmt::Display,
    N: std::fmt::Display,
    Ty: EdgeType,
    Ix: petgraph::graph::IndexType,
{
    trace!("\n{}", Dot::with_config(graph, &[]));
}

/// draw the network with the current flow in graphviz dot format, on trace level
pub fn draw_with_flow(capacity: &CapacityMatrix, cost: &CostMatrix, flow: &Flow) {
    if tracing::enabled!(tracing::Level::TRACE) {
        draw(&to_flow_graph(capacity, cost, Some(flow)));
    }
}
