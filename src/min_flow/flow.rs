//! Flow network definitions on dense matrices
//! - Matrix
//! - CapacityMatrix, CostMatrix, Flow
//! - flow validity checks
use std::ops::{Index, IndexMut};

/// Dense square matrix of `i64`, addressed by `(row, col)`.
///
/// Cell `(i, j)` describes the directed arc `i -> j`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Matrix {
    n: usize,
    cells: Vec<i64>,
}

/// `capacity[(i, j)]` is the upper limit of flow on `i -> j`. Zero means no arc.
pub type CapacityMatrix = Matrix;
/// `cost[(i, j)]` is the cost per unit flow on `i -> j`.
pub type CostMatrix = Matrix;
/// `flow[(i, j)]` is the amount pushed along `i -> j`.
pub type Flow = Matrix;

impl Matrix {
    /// `n x n` matrix filled with zero
    pub fn zeros(n: usize) -> Matrix {
        Matrix {
            n,
            cells: vec![0; n * n],
        }
    }
    ///
    /// Create from a list of rows. Every row must have as many entries as there are rows.
    ///
    pub fn from_rows(rows: &[Vec<i64>]) -> Matrix {
        let n = rows.len();
        let mut m = Matrix::zeros(n);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), n, "row {} has {} columns, expected {}", i, row.len(), n);
            m.cells[i * n..(i + 1) * n].copy_from_slice(row);
        }
        m
    }
    /// number of rows (= number of columns)
    pub fn size(&self) -> usize {
        self.n
    }
    pub fn row(&self, i: usize) -> &[i64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
    pub fn column(&self, j: usize) -> impl Iterator<Item = i64> + '_ {
        (0..self.n).map(move |i| self[(i, j)])
    }
    /// Iterate over `(i, j, value)` of the non-zero cells in row-major order
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(move |(k, &v)| (k / self.n, k % self.n, v))
    }
    pub fn row_sum(&self, i: usize) -> i64 {
        self.row(i).iter().sum()
    }
    pub fn column_sum(&self, j: usize) -> i64 {
        self.column(j).sum()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = i64;
    fn index(&self, (i, j): (usize, usize)) -> &i64 {
        assert!(i < self.n && j < self.n, "({}, {}) out of {}x{}", i, j, self.n, self.n);
        &self.cells[i * self.n + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut i64 {
        assert!(i < self.n && j < self.n, "({}, {}) out of {}x{}", i, j, self.n, self.n);
        &mut self.cells[i * self.n + j]
    }
}

///
/// Check if the flow is valid, i.e. it satisfies
/// - capacity constraint `0 <= f <= u` on every cell
/// - flow constraint on every node other than `source` and `sink`
///
pub fn is_valid_flow(flow: &Flow, capacity: &CapacityMatrix, source: usize, sink: usize) -> bool {
    flow.size() == capacity.size()
        && is_in_capacity(flow, capacity)
        && is_satisfying_flow_constraint(flow, source, sink)
}

///
/// For each cell, the flow must satisfy `0 <= flow <= capacity`.
///
pub fn is_in_capacity(flow: &Flow, capacity: &CapacityMatrix) -> bool {
    let n = flow.size();
    (0..n).all(|i| {
        (0..n).all(|j| {
            let f = flow[(i, j)];
            0 <= f && f <= capacity[(i, j)]
        })
    })
}

///
/// For each node except the source and the sink,
/// (the sum of out-going flows) should be equal to (the sum of in-coming flows).
///
pub fn is_satisfying_flow_constraint(flow: &Flow, source: usize, sink: usize) -> bool {
    (0..flow.size())
        .filter(|&v| v != source && v != sink)
        .all(|v| flow.column_sum(v) == flow.row_sum(v))
}
