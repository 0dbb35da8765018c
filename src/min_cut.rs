use crate::{Graph, PartitionResult, PartitionSolver, Result, Weight};

/// Exact global minimum cut via the Stoer-Wagner algorithm.
#[derive(Clone, Debug, Default)]
pub struct GlobalMinCutSolver {
    result: PartitionResult,
}

impl GlobalMinCutSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Graph {
    /// Returns the global minimum cut value and the vertices of one of its sides.
    ///
    /// Works on a dense matrix of super-vertices. Every phase orders the remaining
    /// super-vertices by maximum adjacency; the weight gathered by the last one is the cut
    /// separating it from the rest. The last vertex is then merged into the one before it.
    /// The lightest of these cuts of the phase is a global minimum cut.
    pub(crate) fn stoer_wagner(&self) -> (Weight, Vec<u32>) {
        let n = self.len();
        debug_assert!(n >= 2);

        let mut w = vec![vec![0 as Weight; n]; n];
        for (u, v) in self.vertices.iter().enumerate() {
            for e in v.edges.iter() {
                let dst = e.dst as usize;
                if u < dst {
                    w[u][dst] += e.weight;
                    w[dst][u] += e.weight;
                }
            }
        }

        // Active super-vertices and the original vertices merged into each of them.
        let mut active = (0..n).collect::<Vec<usize>>();
        let mut clusters = (0..n as u32).map(|vx| vec![vx]).collect::<Vec<_>>();

        let mut best = Weight::MAX;
        let mut best_side = Vec::new();

        let mut phase = 0;
        while active.len() > 1 {
            let cur_n = active.len();
            let mut dist = vec![0 as Weight; cur_n];
            let mut added = vec![false; cur_n];
            let mut prev = 0;
            let mut last = 0;

            for _ in 0..cur_n {
                let mut sel = None;
                for i in 0..cur_n {
                    if !added[i] && sel.map_or(true, |s| dist[i] > dist[s]) {
                        sel = Some(i);
                    }
                }
                let Some(sel) = sel else { break };
                added[sel] = true;
                prev = last;
                last = sel;

                for i in 0..cur_n {
                    if !added[i] {
                        dist[i] += w[active[sel]][active[i]];
                    }
                }
            }

            let (s, t) = (prev, last);
            let cut_of_phase = dist[t];
            log::trace!("phase {phase}: cut of the phase {cut_of_phase}");
            if cut_of_phase < best {
                best = cut_of_phase;
                best_side = clusters[active[t]].clone();
            }

            let (vs, vt) = (active[s], active[t]);
            for &vi in active.iter() {
                if vi == vs || vi == vt {
                    continue;
                }
                w[vs][vi] += w[vt][vi];
                w[vi][vs] += w[vi][vt];
            }
            let merged = std::mem::take(&mut clusters[vt]);
            clusters[vs].extend(merged);

            active.remove(t);
            phase += 1;
        }

        (best, best_side)
    }
}

impl PartitionSolver for GlobalMinCutSolver {
    fn name(&self) -> &'static str {
        "Global Minimum Cut (Stoer-Wagner)"
    }

    fn statement(&self) -> &'static str {
        "Input: undirected weighted graph G=(V,E,w).\n\
         Goal: find a nontrivial cut (A,B) where A is nonempty and A != V, and B = V\\A.\n\
         Objective: minimize cut(A,B) = sum of w(u,v) over edges {u,v} with u in A and v in B.\n\
         Output: part[v] indicates which side of the minimum cut each vertex belongs to."
    }

    fn complexity(&self) -> &'static str {
        "Polynomial: O(n^3) time (dense form), O(nm + n^2 log n) variants exist."
    }

    fn solve(&mut self, graph: &Graph) -> Result<()> {
        self.result = PartitionResult::default();
        match graph.len() {
            0 => return Ok(()),
            1 => {
                self.result.part = vec![0];
                return Ok(());
            }
            _ => {}
        }

        let (cut, side) = graph.stoer_wagner();
        let mut part = vec![1; graph.len()];
        for vx in side {
            part[vx as usize] = 0;
        }
        log::debug!("global minimum cut {cut}");
        self.result.part = part;
        self.result.cut_weight = cut;
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
        Some(format!("|A|={a} |B|={b} mincut={}", self.result.cut_weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate_edge_cut;

    #[test]
    fn test_trivial_graphs() {
        let mut solver = GlobalMinCutSolver::new();

        solver.solve(&Graph::new(0)).unwrap();
        assert_eq!(solver.result(), PartitionResult::default());

        solver.solve(&Graph::new(1)).unwrap();
        assert_eq!(solver.result().part, vec![0]);
        assert_eq!(solver.result().cut_weight, 0);
    }

    #[test]
    fn test_disconnected_graph_has_zero_cut() {
        // Arrange
        let mut graph = Graph::new(4);
        graph.add_undirected(0, 1, 5).unwrap();
        graph.add_undirected(2, 3, 5).unwrap();
        let mut solver = GlobalMinCutSolver::new();

        // Act
        solver.solve(&graph).unwrap();

        // Assert
        let result = solver.result();
        assert_eq!(result.cut_weight, 0);
        assert_eq!(calculate_edge_cut(&graph, &result.part), 0);
        assert!(result.part.contains(&0) && result.part.contains(&1));
    }

    #[test]
    fn test_stoer_wagner_paper_example() {
        // The 8-vertex example from Stoer and Wagner's paper, minimum cut 4.
        let mut graph = Graph::new(8);
        for (u, v, w) in [
            (0, 1, 2),
            (0, 4, 3),
            (1, 2, 3),
            (1, 4, 2),
            (1, 5, 2),
            (2, 3, 4),
            (2, 6, 2),
            (3, 6, 2),
            (3, 7, 2),
            (4, 5, 3),
            (5, 6, 1),
            (6, 7, 3),
        ] {
            graph.add_undirected(u, v, w).unwrap();
        }
        let mut solver = GlobalMinCutSolver::new();

        solver.solve(&graph).unwrap();

        let result = solver.result();
        assert_eq!(result.cut_weight, 4);
        assert_eq!(calculate_edge_cut(&graph, &result.part), 4);
        let side = result.part[2];
        assert!([2, 3, 6, 7].iter().all(|&vx| result.part[vx] == side));
        assert!([0, 1, 4, 5].iter().all(|&vx| result.part[vx] != side));
    }

    #[test]
    fn test_parallel_edges_are_summed() {
        let mut graph = Graph::new(3);
        graph.add_undirected(0, 1, 1).unwrap();
        graph.add_undirected(0, 1, 1).unwrap();
        graph.add_undirected(1, 2, 3).unwrap();
        let mut solver = GlobalMinCutSolver::new();

        solver.solve(&graph).unwrap();

        assert_eq!(solver.result().cut_weight, 2);
        // The last phase merges {1, 2} and finds the lighter cut around it.
        assert_eq!(solver.result().part, vec![1, 0, 0]);
    }
}
