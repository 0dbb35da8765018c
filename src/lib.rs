// Exact and heuristic cut/partition algorithms over one weighted undirected graph model:
// Stoer-Wagner global min-cut, Dinic s-t min-cut, KL-style bisection, recursive and
// multilevel k-way partitioning and bisection-derived vertex separators.

mod bisection;
mod error;
mod kway;
mod min_cut;
mod multilevel;
mod partition_util;
mod separator;
mod solver;
mod st_cut;

pub use bisection::{BisectionConfig, MinimumBisectionSolver};
pub use error::{GraphError, Result};
pub use kway::{KWayConfig, KWayPartitionSolver};
pub use min_cut::GlobalMinCutSolver;
pub use multilevel::{MultilevelConfig, MultilevelKWayPartitionSolver};
pub use partition_util::{
    block_sizes, calculate_edge_cut, order_by_internal_degree, PartitionResult,
};
pub use separator::VertexSeparatorSolver;
pub use solver::{PartitionSolver, Solver};
pub use st_cut::STMinCutSolver;

/// Edge weights are non-negative, but gains computed from them may not be.
pub type Weight = i64;

/// Upper bound on the total edge weight of a graph. Every sum the solvers form stays within
/// a small multiple of the total, so this keeps all of them clear of overflow.
pub const MAX_TOTAL_WEIGHT: Weight = Weight::MAX / 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GraphEdge {
    pub dst: u32,
    pub weight: Weight,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct GraphVertex {
    pub edges: Vec<GraphEdge>,
}

/// An undirected graph with non-negative integer edge weights.
///
/// Every undirected edge is stored in the edge lists of both of its endpoints, in insertion
/// order. The graph only grows during construction; solvers borrow it immutably.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) vertices: Vec<GraphVertex>,
    total_weight: Weight,
}

impl Graph {
    /// Creates a graph with `n` isolated vertices.
    pub fn new(n: usize) -> Self {
        Self {
            vertices: vec![GraphVertex::default(); n],
            total_weight: 0,
        }
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds the undirected edge `{u, v}` with weight `w`.
    ///
    /// Fails if an endpoint is out of range, if `w` is negative, or if the total edge weight
    /// would exceed [`MAX_TOTAL_WEIGHT`]. The graph is unchanged on failure.
    pub fn add_undirected(&mut self, u: u32, v: u32, w: Weight) -> Result<()> {
        for vx in [u, v] {
            if vx as usize >= self.vertices.len() {
                return Err(GraphError::OutOfRange {
                    vertex: vx,
                    len: self.vertices.len(),
                });
            }
        }
        if w < 0 {
            return Err(GraphError::InvalidArgument(format!(
                "weight must be nonnegative, got {w}"
            )));
        }
        let total = self.total_weight.checked_add(w);
        if !total.is_some_and(|total| total <= MAX_TOTAL_WEIGHT) {
            return Err(GraphError::InvalidArgument(format!(
                "total edge weight would exceed {MAX_TOTAL_WEIGHT}"
            )));
        }
        self.push_undirected(u, v, w);
        Ok(())
    }

    /// Appends `{u, v}` to both edge lists without validation.
    pub(crate) fn push_undirected(&mut self, u: u32, v: u32, w: Weight) {
        self.vertices[u as usize].edges.push(GraphEdge { dst: v, weight: w });
        self.vertices[v as usize].edges.push(GraphEdge { dst: u, weight: w });
        self.total_weight += w;
    }

    /// The sum of all edge weights, each undirected edge counted once.
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// The edges incident to the given vertex, in insertion order.
    pub fn edges(&self, vx: u32) -> &[GraphEdge] {
        &self.vertices[vx as usize].edges
    }

    /// The number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|v| v.edges.len()).sum::<usize>() / 2
    }

    /// Returns the total incident edge weight of every vertex.
    pub fn degrees(&self) -> Vec<Weight> {
        self.vertices
            .iter()
            .map(|v| v.edges.iter().map(|e| e.weight).sum())
            .collect()
    }
}

pub(crate) fn divide_round_up(dividend: u32, divisor: u32) -> u32 {
    (dividend + divisor - 1) / divisor
}
