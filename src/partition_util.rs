use crate::{Graph, Weight};

/// The labeling produced by a solver.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PartitionResult {
    /// Block label of every vertex.
    pub part: Vec<u32>,
    /// Separator vertices in ascending order. Only filled by the vertex separator solver.
    pub separator: Vec<u32>,
    /// Total weight of the edges whose endpoints carry different labels.
    pub cut_weight: Weight,
    /// Auxiliary objective, e.g. the separator size.
    pub score: f64,
}

impl PartitionResult {
    /// Number of vertices labeled 0 and labeled anything else.
    pub(crate) fn side_sizes(&self) -> (usize, usize) {
        let a = self.part.iter().filter(|&&p| p == 0).count();
        (a, self.part.len() - a)
    }
}

/// Sums the weight of every edge whose endpoints carry different labels, counting each
/// undirected edge once.
pub fn calculate_edge_cut(graph: &Graph, part: &[u32]) -> Weight {
    debug_assert_eq!(graph.len(), part.len());

    let mut edge_cut = 0;
    for (vx, v) in graph.vertices.iter().enumerate() {
        for e in v.edges.iter() {
            if (vx as u32) < e.dst && part[vx] != part[e.dst as usize] {
                edge_cut += e.weight;
            }
        }
    }
    edge_cut
}

/// Sorts the given vertices by descending weight of their edges into the same subset, ties
/// broken by ascending vertex index.
pub fn order_by_internal_degree(graph: &Graph, vertices: &[u32]) -> Vec<u32> {
    let members = subset_mask(graph, vertices);

    let mut degrees = vertices
        .iter()
        .map(|&vx| (internal_degree(graph, &members, vx), vx))
        .collect::<Vec<_>>();
    degrees.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    degrees.into_iter().map(|(_, vx)| vx).collect()
}

/// Returns the number of vertices carrying each label, indexed by label.
pub fn block_sizes(part: &[u32]) -> Vec<usize> {
    let blocks = part.iter().max().map_or(0, |&p| p as usize + 1);
    let mut sizes = vec![0; blocks];
    for &p in part {
        sizes[p as usize] += 1;
    }
    sizes
}

/// Marks the members of `vertices` in a mask over the whole graph.
pub(crate) fn subset_mask(graph: &Graph, vertices: &[u32]) -> Vec<bool> {
    let mut members = vec![false; graph.len()];
    for &vx in vertices {
        members[vx as usize] = true;
    }
    members
}

/// Returns the sum of edge weights from `vx` to members of the subset.
pub(crate) fn internal_degree(graph: &Graph, members: &[bool], vx: u32) -> Weight {
    graph
        .edges(vx)
        .iter()
        .filter(|e| members[e.dst as usize])
        .map(|e| e.weight)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> Graph {
        // 0 -5- 1 -1- 2 -4- 3
        let mut graph = Graph::new(4);
        graph.add_undirected(0, 1, 5).unwrap();
        graph.add_undirected(1, 2, 1).unwrap();
        graph.add_undirected(2, 3, 4).unwrap();
        graph
    }

    #[test]
    fn test_calculate_edge_cut() {
        // Arrange
        let graph = path_graph();

        // Act & Assert
        assert_eq!(calculate_edge_cut(&graph, &[0, 0, 1, 1]), 1);
        assert_eq!(calculate_edge_cut(&graph, &[0, 1, 0, 1]), 10);
        assert_eq!(calculate_edge_cut(&graph, &[2, 2, 2, 2]), 0);
    }

    #[test]
    fn test_calculate_edge_cut_ignores_self_loops() {
        let mut graph = Graph::new(2);
        graph.add_undirected(0, 0, 9).unwrap();
        graph.add_undirected(0, 1, 2).unwrap();

        assert_eq!(calculate_edge_cut(&graph, &[0, 1]), 2);
    }

    #[test]
    fn test_order_by_internal_degree() {
        let graph = path_graph();

        // Degrees inside the full graph: 5, 6, 5, 4.
        assert_eq!(order_by_internal_degree(&graph, &[0, 1, 2, 3]), vec![1, 0, 2, 3]);
        // Restricted to {0, 2, 3}: 0, 4, 4. Ties go to the lower index.
        assert_eq!(order_by_internal_degree(&graph, &[3, 0, 2]), vec![2, 3, 0]);
    }

    #[test]
    fn test_block_sizes() {
        assert_eq!(block_sizes(&[0, 2, 2, 0, 2]), vec![2, 0, 3]);
        assert!(block_sizes(&[]).is_empty());
    }
}
