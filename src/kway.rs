use crate::solver::kway_summary;
use crate::{calculate_edge_cut, Graph, PartitionResult, PartitionSolver, Result};

#[derive(Copy, Clone, Debug)]
pub struct KWayConfig {
    /// The number of blocks to produce. 0 is treated as 1.
    pub parts: u32,
    /// Improvement passes for every bisection.
    pub bisection_passes: u32,
}

impl Default for KWayConfig {
    fn default() -> Self {
        Self {
            parts: 2,
            bisection_passes: 20,
        }
    }
}

/// k-way partitioning by repeatedly bisecting the largest block.
#[derive(Clone, Debug, Default)]
pub struct KWayPartitionSolver {
    config: KWayConfig,
    result: PartitionResult,
}

impl KWayPartitionSolver {
    pub fn new(config: KWayConfig) -> Self {
        Self {
            config,
            result: PartitionResult::default(),
        }
    }
}

impl Graph {
    /// Splits the graph into at most `parts` blocks by recursive bisection.
    ///
    /// The largest block (lowest index on ties) is bisected; its first half keeps the block
    /// index and the second half is appended as a new block. Splitting stops early once the
    /// largest block has a single vertex or a bisection leaves one half empty.
    pub fn partition_recursive_bisection(&self, parts: u32, bisection_passes: u32) -> Vec<u32> {
        let parts = parts.max(1) as usize;
        let mut blocks = vec![(0..self.len() as u32).collect::<Vec<_>>()];

        while blocks.len() < parts {
            let mut idx = 0;
            for i in 1..blocks.len() {
                if blocks[i].len() > blocks[idx].len() {
                    idx = i;
                }
            }
            if blocks[idx].len() <= 1 {
                break;
            }

            let bisection = self.bisect_subset(&blocks[idx], bisection_passes);
            let (a, b): (Vec<u32>, Vec<u32>) = blocks[idx]
                .iter()
                .partition(|&&vx| bisection[vx as usize] == 0);
            if a.is_empty() || b.is_empty() {
                break;
            }
            log::trace!(
                "split block {idx} into {} + {} vertices",
                a.len(),
                b.len()
            );
            blocks[idx] = a;
            blocks.push(b);
        }

        let mut part = vec![0; self.len()];
        for (label, block) in blocks.iter().enumerate() {
            for &vx in block {
                part[vx as usize] = label as u32;
            }
        }
        part
    }
}

impl PartitionSolver for KWayPartitionSolver {
    fn name(&self) -> &'static str {
        "k-Way Balanced Partition (Recursive bisection heuristic)"
    }

    fn statement(&self) -> &'static str {
        "Input: undirected weighted graph G=(V,E,w) and integer k >= 2.\n\
         Goal: assign each vertex a label part[v] in {0..k-1} defining k disjoint \
         blocks V0..Vk-1:\n  \
         - blocks are disjoint and their union is V\n  \
         - balance (typical): block sizes are as equal as possible\n\
         Objective: minimize total inter-block cut weight:\n  \
         Cut_k = sum of w(u,v) over edges {u,v} with part[u] != part[v]."
    }

    fn complexity(&self) -> &'static str {
        "Optimization is NP-hard. Recursive bisection heuristic: ~O((k-1)*p*n^2) on splits \
         (varies by split sizes)."
    }

    fn solve(&mut self, graph: &Graph) -> Result<()> {
        self.result = PartitionResult::default();
        if graph.is_empty() {
            return Ok(());
        }

        let part =
            graph.partition_recursive_bisection(self.config.parts, self.config.bisection_passes);
        self.result.cut_weight = calculate_edge_cut(graph, &part);
        self.result.part = part;
        log::debug!(
            "{}-way recursive bisection cut {}",
            self.config.parts,
            self.result.cut_weight
        );
        Ok(())
    }

    fn result(&self) -> PartitionResult {
        self.result.clone()
    }

    fn summary(&self) -> Option<String> {
        kway_summary(&self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_sizes;

    fn cycle(n: u32) -> Graph {
        let mut graph = Graph::new(n as usize);
        for i in 0..n {
            graph.add_undirected(i, (i + 1) % n, 1).unwrap();
        }
        graph
    }

    #[test]
    fn test_one_part() {
        let graph = cycle(5);
        let mut solver = KWayPartitionSolver::new(KWayConfig { parts: 1, ..Default::default() });

        solver.solve(&graph).unwrap();

        assert_eq!(solver.result().part, vec![0; 5]);
        assert_eq!(solver.result().cut_weight, 0);
    }

    #[test]
    fn test_zero_parts_means_one() {
        let graph = cycle(4);

        assert_eq!(graph.partition_recursive_bisection(0, 20), vec![0; 4]);
    }

    #[test]
    fn test_four_parts_of_cycle() {
        // Arrange
        let graph = cycle(8);
        let mut solver = KWayPartitionSolver::new(KWayConfig { parts: 4, ..Default::default() });

        // Act
        solver.solve(&graph).unwrap();

        // Assert
        let result = solver.result();
        assert_eq!(block_sizes(&result.part), vec![2, 2, 2, 2]);
        assert_eq!(result.cut_weight, calculate_edge_cut(&graph, &result.part));
        assert!(result.part.iter().all(|&p| p < 4));
    }

    #[test]
    fn test_more_parts_than_vertices() {
        let graph = cycle(3);

        let part = graph.partition_recursive_bisection(10, 20);

        let mut labels = part.clone();
        labels.sort();
        assert_eq!(labels, vec![0, 1, 2]);
    }
}
