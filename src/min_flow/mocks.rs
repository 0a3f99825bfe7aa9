use super::flow::{CapacityMatrix, CostMatrix, Matrix};

/// mock network generation functions
/// each returns `(capacity, cost, source, sink)`
pub type MockNetwork = (CapacityMatrix, CostMatrix, usize, usize);

/// straight line s -> a -> b -> t, capacity 5 and cost 1 on every edge
pub fn mock_flow_network1() -> MockNetwork {
    let cap = Matrix::from_rows(&[
        vec![0, 5, 0, 0],
        vec![0, 0, 5, 0],
        vec![0, 0, 0, 5],
        vec![0, 0, 0, 0],
    ]);
    let cost = Matrix::from_rows(&[
        vec![0, 1, 0, 0],
        vec![0, 0, 1, 0],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 0],
    ]);
    (cap, cost, 0, 3)
}

/// two unit routes s -> a -> t (cost 4) and s -> b -> t (cost 2)
pub fn mock_flow_network_diamond() -> MockNetwork {
    let cap = Matrix::from_rows(&[
        vec![0, 1, 1, 0],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 0],
    ]);
    let cost = Matrix::from_rows(&[
        vec![0, 2, 1, 0],
        vec![0, 0, 0, 2],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 0],
    ]);
    (cap, cost, 0, 3)
}

///
/// The first (cheapest) path uses the cross edge a -> b,
/// the second path must cancel it.
///
/// ```text
///      1       5
///   s ---> a ---> t
///   |      | 1    ^
///   +----> b -----+
///      5       1
/// ```
pub fn mock_flow_network_cross() -> MockNetwork {
    let cap = Matrix::from_rows(&[
        vec![0, 1, 1, 0],
        vec![0, 0, 1, 1],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 0],
    ]);
    let cost = Matrix::from_rows(&[
        vec![0, 1, 5, 0],
        vec![0, 0, 1, 5],
        vec![0, 0, 0, 1],
        vec![0, 0, 0, 0],
    ]);
    (cap, cost, 0, 3)
}

///
/// Network containing the cycle a -> b -> c -> a with finite capacities.
///
/// ```text
/// s -> a -> b -> c -> t
///      ^         |
///      +---------+
/// ```
pub fn mock_flow_network_cycle() -> MockNetwork {
    let cap = Matrix::from_rows(&[
        vec![0, 3, 0, 0, 0],
        vec![0, 0, 2, 0, 0],
        vec![0, 0, 0, 2, 0],
        vec![0, 2, 0, 0, 1],
        vec![0, 0, 0, 0, 0],
    ]);
    let cost = Matrix::from_rows(&[
        vec![0, 1, 0, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 0, 1, 0],
        vec![0, 1, 0, 0, 1],
        vec![0, 0, 0, 0, 0],
    ]);
    (cap, cost, 0, 4)
}

///
/// Bipartite assignment of 3 workers to 3 jobs, unit capacities.
/// Node 0 is the source, 1..=3 workers, 4..=6 jobs, 7 the sink.
///
/// cost table (worker x job)
/// ```text
///      j1 j2 j3
/// w1 [  4, 1, 3 ]
/// w2 [  2, 0, 5 ]
/// w3 [  3, 2, 2 ]
/// ```
/// The optimum is w1-j2, w2-j1, w3-j3 with cost 5.
pub fn mock_assignment_network() -> MockNetwork {
    let table = [[4, 1, 3], [2, 0, 5], [3, 2, 2]];
    let mut cap = Matrix::zeros(8);
    let mut cost = Matrix::zeros(8);
    for w in 0..3 {
        cap[(0, 1 + w)] = 1;
        cap[(4 + w, 7)] = 1;
        for j in 0..3 {
            cap[(1 + w, 4 + j)] = 1;
            cost[(1 + w, 4 + j)] = table[w][j];
        }
    }
    (cap, cost, 0, 7)
}
