use crate::{
    BisectionConfig, Graph, MinimumBisectionSolver, PartitionResult, PartitionSolver, Result,
};

/// Balanced vertex separator derived from the boundary of a minimum bisection.
#[derive(Clone, Debug)]
pub struct VertexSeparatorSolver {
    config: BisectionConfig,
    result: PartitionResult,
}

impl Default for VertexSeparatorSolver {
    /// Runs the underlying bisection with 15 improvement passes.
    fn default() -> Self {
        Self::new(BisectionConfig { max_passes: 15 })
    }
}

impl VertexSeparatorSolver {
    pub fn new(config: BisectionConfig) -> Self {
        Self {
            config,
            result: PartitionResult::default(),
        }
    }
}

impl Graph {
    /// Returns, in ascending order, every vertex incident to an edge whose endpoints carry
    /// different labels.
    pub fn boundary_vertices(&self, part: &[u32]) -> Vec<u32> {
        let mut is_separator = vec![false; self.len()];
        for (u, v) in self.vertices.iter().enumerate() {
            for e in v.edges.iter() {
                if part[u] != part[e.dst as usize] {
                    is_separator[u] = true;
                    is_separator[e.dst as usize] = true;
                }
            }
        }
        (0..self.len() as u32)
            .filter(|&vx| is_separator[vx as usize])
            .collect()
    }
}

impl PartitionSolver for VertexSeparatorSolver {
    fn name(&self) -> &'static str {
        "Balanced Vertex Separator (Heuristic from bisection boundary)"
    }

    fn statement(&self) -> &'static str {
        "Input: undirected graph G=(V,E,w).\n\
         Goal: find a vertex separator S subset of V and two nonempty sets A,B \
         subset of V\\S such that:\n  \
         - A and B are disjoint\n  \
         - there is NO edge between A and B (removing S disconnects A from B)\n  \
         - balance: A and B should both be large (often max(|A|,|B|) <= alpha*|V| \
         with alpha<1, e.g. 2/3)\n\
         Objective: minimize |S| (or weight(S)).\n\
         Output: separator[] stores S; part[] is the 2-way labeling used to derive S."
    }

    fn complexity(&self) -> &'static str {
        "Optimization is NP-hard. This heuristic: bisection heuristic + boundary scan, \
         ~O(p*n^2 + m)."
    }

    fn solve(&mut self, graph: &Graph) -> Result<()> {
        self.result = PartitionResult::default();
        if graph.is_empty() {
            return Ok(());
        }

        let mut bisection = MinimumBisectionSolver::new(self.config);
        bisection.solve(graph)?;
        let bisection = bisection.result();

        let separator = graph.boundary_vertices(&bisection.part);
        log::debug!(
            "separator of {} vertices, boundary cut {}",
            separator.len(),
            bisection.cut_weight
        );
        self.result = PartitionResult {
            score: separator.len() as f64,
            part: bisection.part,
            separator,
            cut_weight: bisection.cut_weight,
        };
        Ok(())
    }

    fn result(&self) -> PartitionResult {
        self.result.clone()
    }

    fn summary(&self) -> Option<String> {
        if self.result.part.is_empty() {
            return None;
        }
        let (a, b) = self.result.side_sizes();
        Some(format!(
            "|A|={a} |B|={b} |S|={} boundary-cut={}",
            self.result.separator.len(),
            self.result.cut_weight
        ))
    }
}
