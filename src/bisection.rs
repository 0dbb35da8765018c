use crate::partition_util::subset_mask;
use crate::{
    calculate_edge_cut, divide_round_up, order_by_internal_degree, Graph, PartitionResult,
    PartitionSolver, Result, Weight,
};

#[derive(Copy, Clone, Debug)]
pub struct BisectionConfig {
    /// The maximum number of improvement passes. Every pass swaps at most one pair.
    pub max_passes: u32,
}

impl Default for BisectionConfig {
    fn default() -> Self {
        Self { max_passes: 20 }
    }
}

/// Balanced two-way cut heuristic based on Kernighan-Lin swaps.
#[derive(Clone, Debug, Default)]
pub struct MinimumBisectionSolver {
    config: BisectionConfig,
    result: PartitionResult,
}

impl MinimumBisectionSolver {
    pub fn new(config: BisectionConfig) -> Self {
        Self {
            config,
            result: PartitionResult::default(),
        }
    }
}

impl Graph {
    /// Splits the given vertices into two halves while minimizing the edge cut between them.
    ///
    /// Returns a label for every vertex of the graph. The `ceil(len / 2)` subset vertices
    /// with the highest internal degree start on side 0, the rest on side 1. Every pass then
    /// swaps the single cross pair with the largest positive gain, until no such pair is
    /// left or the passes run out. Swapping keeps the side sizes, so the halves never
    /// differ by more than one. Vertices outside the subset are labeled 0.
    pub fn bisect_subset(&self, vertices: &[u32], max_passes: u32) -> Vec<u32> {
        let members = subset_mask(self, vertices);
        let target_a = divide_round_up(vertices.len() as u32, 2) as usize;

        let mut part = vec![0u32; self.len()];
        for (rank, vx) in order_by_internal_degree(self, vertices).into_iter().enumerate() {
            part[vx as usize] = if rank < target_a { 0 } else { 1 };
        }

        for pass in 0..max_passes {
            let d = self.swap_potentials(&members, &part);

            let mut best_gain = 0;
            let mut best_pair = None;
            for &u in vertices.iter().filter(|&&u| part[u as usize] == 0) {
                for &v in vertices.iter().filter(|&&v| part[v as usize] == 1) {
                    let gain = d[u as usize] + d[v as usize] - 2 * self.first_edge_weight(u, v);
                    if gain > best_gain {
                        best_gain = gain;
                        best_pair = Some((u, v));
                    }
                }
            }

            match best_pair {
                Some((u, v)) => {
                    log::trace!("pass {pass}: swapping {u} and {v}, gain {best_gain}");
                    part.swap(u as usize, v as usize);
                }
                None => break,
            }
        }

        part
    }

    /// `D(u)` = external minus internal weight of every subset vertex, ignoring edges that
    /// leave the subset.
    fn swap_potentials(&self, members: &[bool], part: &[u32]) -> Vec<Weight> {
        let mut d = vec![0; self.len()];
        for (u, v) in self.vertices.iter().enumerate() {
            if !members[u] {
                continue;
            }
            let (mut internal, mut external) = (0, 0);
            for e in v.edges.iter().filter(|e| members[e.dst as usize]) {
                if part[u] == part[e.dst as usize] {
                    internal += e.weight;
                } else {
                    external += e.weight;
                }
            }
            d[u] = external - internal;
        }
        d
    }

    /// Weight of the first `u`-`v` edge in `u`'s edge list, 0 if they are not adjacent.
    fn first_edge_weight(&self, u: u32, v: u32) -> Weight {
        self.edges(u)
            .iter()
            .find(|e| e.dst == v)
            .map_or(0, |e| e.weight)
    }
}

impl PartitionSolver for MinimumBisectionSolver {
    fn name(&self) -> &'static str {
        "Minimum Bisection (Heuristic KL-style swaps)"
    }

    fn statement(&self) -> &'static str {
        "Input: undirected weighted graph G=(V,E,w) with w(e) >= 0.\n\
         Goal: split vertex set into two blocks A and B such that:\n  \
         - A and B are disjoint and A U B = V\n  \
         - balance: abs(|A| - |B|) <= 1\n\
         Objective: minimize cut(A,B) = sum of w(u,v) over edges {u,v} with u in A and v in B.\n\
         Output: part[v]=0 means v in A, part[v]=1 means v in B."
    }

    fn complexity(&self) -> &'static str {
        "Optimization is NP-hard. This heuristic is typically O(p*n^2 + p*m) where p=passes."
    }

    fn solve(&mut self, graph: &Graph) -> Result<()> {
        self.result = PartitionResult::default();
        if graph.is_empty() {
            return Ok(());
        }

        let all = (0..graph.len() as u32).collect::<Vec<_>>();
        let part = graph.bisect_subset(&all, self.config.max_passes);
        self.result.cut_weight = calculate_edge_cut(graph, &part);
        self.result.part = part;
        log::debug!("bisection cut {}", self.result.cut_weight);
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
        Some(format!("|A|={a} |B|={b} cut={}", self.result.cut_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder(rungs: u32) -> Graph {
        // Two heavy rails joined by light rungs.
        let mut graph = Graph::new(2 * rungs as usize);
        for i in 0..rungs {
            if i + 1 < rungs {
                graph.add_undirected(i, i + 1, 5).unwrap();
                graph.add_undirected(rungs + i, rungs + i + 1, 5).unwrap();
            }
            graph.add_undirected(i, rungs + i, 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_swap_fixes_bad_start() {
        // Arrange
        // Two triangles joined by the bridge 2-3. The start puts {0, 2, 3} on side 0.
        let mut graph = Graph::new(6);
        for (u, v, w) in [
            (0, 1, 2),
            (1, 2, 2),
            (2, 0, 2),
            (3, 4, 2),
            (4, 5, 2),
            (5, 3, 2),
            (2, 3, 1),
        ] {
            graph.add_undirected(u, v, w).unwrap();
        }

        // Act
        let no_passes = graph.bisect_subset(&[0, 1, 2, 3, 4, 5], 0);
        let part = graph.bisect_subset(&[0, 1, 2, 3, 4, 5], 20);

        // Assert
        assert_eq!(no_passes, vec![0, 1, 0, 0, 1, 1]);
        assert_eq!(calculate_edge_cut(&graph, &no_passes), 8);
        assert_eq!(part, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(calculate_edge_cut(&graph, &part), 1);
    }

    #[test]
    fn test_subset_leaves_outsiders_on_side_zero() {
        let graph = ladder(4);
        let subset = [4, 5, 6, 7, 0];

        let part = graph.bisect_subset(&subset, 10);

        assert_eq!(part[1], 0);
        assert_eq!(part[2], 0);
        assert_eq!(part[3], 0);
        let ones = subset.iter().filter(|&&vx| part[vx as usize] == 1).count();
        assert_eq!(ones, 2);
    }

    #[test]
    fn test_solver_balance() {
        let graph = ladder(5);
        let mut solver = MinimumBisectionSolver::new(BisectionConfig::default());

        solver.solve(&graph).unwrap();

        let result = solver.result();
        let (a, b) = result.side_sizes();
        assert_eq!((a, b), (5, 5));
        assert_eq!(result.cut_weight, calculate_edge_cut(&graph, &result.part));
    }

    #[test]
    fn test_single_vertex() {
        let mut solver = MinimumBisectionSolver::default();

        solver.solve(&Graph::new(1)).unwrap();

        assert_eq!(solver.result().part, vec![0]);
        assert_eq!(solver.result().cut_weight, 0);
    }
}
