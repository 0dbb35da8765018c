use crate::solver::kway_summary;
use crate::{
    calculate_edge_cut, divide_round_up, Graph, PartitionResult, PartitionSolver, Result,
    Weight,
};
use std::collections::BTreeMap;

#[derive(Copy, Clone, Debug)]
pub struct MultilevelConfig {
    /// The number of blocks to produce. Clamped to the number of vertices.
    pub parts: u32,
    /// Improvement passes for every bisection of the coarsest graph.
    pub bisection_passes: u32,
    /// The maximum number of refinement passes on every level.
    pub refine_passes: u32,
    /// The maximum number of coarsening levels.
    pub max_levels: u32,
}

impl Default for MultilevelConfig {
    fn default() -> Self {
        Self {
            parts: 2,
            bisection_passes: 8,
            refine_passes: 4,
            max_levels: 10,
        }
    }
}

/// k-way partitioning by coarsening, partitioning the coarsest graph and refining while
/// projecting back.
#[derive(Clone, Debug, Default)]
pub struct MultilevelKWayPartitionSolver {
    config: MultilevelConfig,
    result: PartitionResult,
}

impl MultilevelKWayPartitionSolver {
    pub fn new(config: MultilevelConfig) -> Self {
        Self {
            config,
            result: PartitionResult::default(),
        }
    }
}

impl Graph {
    /// Coarsens the graph using heavy edge matching.
    ///
    /// Vertices are visited by descending weighted degree (ascending index on ties). An
    /// unmatched vertex is merged with its heaviest unmatched neighbour, or stays alone.
    /// Edges between merged vertices vanish, parallel coarse edges are summed.
    ///
    /// Returns the coarse graph and the coarse vertex of every fine vertex.
    pub(crate) fn heavy_edge_matching_coarse(&self) -> (Graph, Vec<u32>) {
        let n = self.len();
        let degrees = self.degrees();
        let mut order = (0..n as u32).collect::<Vec<_>>();
        order.sort_by(|&a, &b| degrees[b as usize].cmp(&degrees[a as usize]).then(a.cmp(&b)));

        let mut matched = vec![false; n];
        let mut fine_vertex_to_coarse_vertex = vec![0u32; n];
        let mut super_vertex = 0u32;

        for vx in order {
            if matched[vx as usize] {
                continue;
            }
            matched[vx as usize] = true;

            // Zero-weight edges still beat the -1 sentinel and get matched.
            let mut heaviest_edge_weight: Weight = -1;
            let mut heaviest_neighbour = None;
            for e in self.edges(vx) {
                if !matched[e.dst as usize] && e.weight > heaviest_edge_weight {
                    heaviest_edge_weight = e.weight;
                    heaviest_neighbour = Some(e.dst);
                }
            }

            fine_vertex_to_coarse_vertex[vx as usize] = super_vertex;
            if let Some(neighbour) = heaviest_neighbour {
                matched[neighbour as usize] = true;
                fine_vertex_to_coarse_vertex[neighbour as usize] = super_vertex;
            }
            super_vertex += 1;
        }

        // Coarse adjacency keyed by neighbour so the coarse edge lists come out sorted.
        let mut coarse_edges = vec![BTreeMap::<u32, Weight>::new(); super_vertex as usize];
        for (u, v) in self.vertices.iter().enumerate() {
            let cu = fine_vertex_to_coarse_vertex[u];
            for e in v.edges.iter().filter(|e| u < e.dst as usize) {
                let cv = fine_vertex_to_coarse_vertex[e.dst as usize];
                if cu == cv {
                    continue;
                }
                *coarse_edges[cu as usize].entry(cv).or_insert(0) += e.weight;
                *coarse_edges[cv as usize].entry(cu).or_insert(0) += e.weight;
            }
        }

        let mut coarse_graph = Graph::new(super_vertex as usize);
        for (cu, neighbours) in coarse_edges.iter().enumerate() {
            let cu = cu as u32;
            for (&cv, &weight) in neighbours.range(cu + 1..) {
                coarse_graph.push_undirected(cu, cv, weight);
            }
        }

        (coarse_graph, fine_vertex_to_coarse_vertex)
    }

    /// Greedily moves vertices to the neighbouring block they are most connected to.
    ///
    /// A vertex may only leave a block above the floor size `n / parts` and only enter a
    /// block below the ceiling size `ceil(n / parts)`, and only if its connection to the
    /// target block strictly exceeds its connection to its own block. Stops after a pass
    /// without moves.
    pub(crate) fn refine_partition(&self, part: &mut [u32], parts: u32, max_passes: u32) {
        if parts <= 1 {
            return;
        }
        let n = self.len() as u32;
        let k = parts as usize;
        let min_size = (n / parts) as usize;
        let max_size = divide_round_up(n, parts) as usize;
        let mut connection = vec![0 as Weight; k];

        for pass in 0..max_passes {
            let mut sizes = vec![0usize; k];
            for &p in part.iter() {
                if (p as usize) < k {
                    sizes[p as usize] += 1;
                }
            }

            let mut moves = 0;
            for vx in 0..self.vertices.len() {
                let p = part[vx] as usize;
                if p >= k || sizes[p] <= min_size {
                    continue;
                }

                connection.fill(0);
                for e in self.vertices[vx].edges.iter() {
                    let q = part[e.dst as usize] as usize;
                    if q < k {
                        connection[q] += e.weight;
                    }
                }

                let mut best = p;
                let mut best_gain = 0;
                for q in 0..k {
                    if q == p || sizes[q] >= max_size {
                        continue;
                    }
                    let gain = connection[q] - connection[p];
                    if gain > best_gain {
                        best_gain = gain;
                        best = q;
                    }
                }

                if best != p {
                    part[vx] = best as u32;
                    sizes[p] -= 1;
                    sizes[best] += 1;
                    moves += 1;
                }
            }

            log::trace!("refinement pass {pass}: {moves} moves");
            if moves == 0 {
                break;
            }
        }
    }

    /// Partitions the graph into `config.parts` blocks with the multilevel scheme.
    pub fn partition_multilevel(&self, config: &MultilevelConfig) -> Vec<u32> {
        let n = self.len();
        let parts = config.parts.clamp(1, (n as u32).max(1));
        if n == 0 || parts == 1 {
            return vec![0; n];
        }

        // Coarsening
        let min_coarse = (2 * parts as usize).max(20);
        let mut coarse_graphs: Vec<Graph> = Vec::new();
        let mut fine_vertex_to_coarse_vertex_mappings = Vec::new();
        for level in 0..config.max_levels {
            let finer = coarse_graphs.last().unwrap_or(self);
            if finer.len() <= min_coarse {
                break;
            }
            let (coarse_graph, mapping) = finer.heavy_edge_matching_coarse();
            if coarse_graph.len() >= finer.len() {
                break;
            }
            log::trace!(
                "coarsening level {level}: {} -> {} vertices",
                finer.len(),
                coarse_graph.len()
            );
            coarse_graphs.push(coarse_graph);
            fine_vertex_to_coarse_vertex_mappings.push(mapping);
        }

        // Initial partition of the coarsest graph
        let coarsest = coarse_graphs.last().unwrap_or(self);
        let mut partition =
            coarsest.partition_recursive_bisection(parts, config.bisection_passes);

        // Uncoarsening, refining on every finer level
        for level in (0..coarse_graphs.len()).rev() {
            let finer = if level == 0 { self } else { &coarse_graphs[level - 1] };
            partition =
                partition_uncoarse(&partition, &fine_vertex_to_coarse_vertex_mappings[level]);
            finer.refine_partition(&mut partition, parts, config.refine_passes);
        }

        partition
    }
}

/// Projects the labels of coarse vertices onto the fine vertices merged into them.
fn partition_uncoarse(partition: &[u32], fine_vertex_to_coarse_vertex_mapping: &[u32]) -> Vec<u32> {
    fine_vertex_to_coarse_vertex_mapping
        .iter()
        .map(|&coarse| partition[coarse as usize])
        .collect()
}

impl PartitionSolver for MultilevelKWayPartitionSolver {
    fn name(&self) -> &'static str {
        "k-Way Balanced Partition (Multilevel coarsen-refine heuristic)"
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
        "Optimization is NP-hard. Multilevel heuristic: O(L*m) coarsening + coarse \
         partitioning + O(L*(m + n*k)) refinement (varies by level)."
    }

    fn solve(&mut self, graph: &Graph) -> Result<()> {
        self.result = PartitionResult::default();
        if graph.is_empty() {
            return Ok(());
        }

        let part = graph.partition_multilevel(&self.config);
        self.result.cut_weight = calculate_edge_cut(graph, &part);
        self.result.part = part;
        log::debug!(
            "{}-way multilevel cut {}",
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
