use crate::{
    GlobalMinCutSolver, Graph, KWayPartitionSolver, MinimumBisectionSolver,
    MultilevelKWayPartitionSolver, PartitionResult, Result, STMinCutSolver,
    VertexSeparatorSolver,
};
use std::io::{self, Write};

/// The capability shared by every cut and partition solver.
///
/// A solver owns the result of its last `solve` call. Solvers only borrow the graph, so one
/// graph may be fed to any number of them.
pub trait PartitionSolver {
    /// Short human-readable name of the algorithm.
    fn name(&self) -> &'static str;

    /// Formal statement of the problem being solved.
    fn statement(&self) -> &'static str;

    /// Time complexity of the algorithm.
    fn complexity(&self) -> &'static str;

    /// Computes a fresh result for the given graph, replacing any previous one.
    fn solve(&mut self, graph: &Graph) -> Result<()>;

    /// Returns a copy of the last result, or an empty result if nothing was solved yet.
    fn result(&self) -> PartitionResult;

    /// One line describing the computed result, `None` while the result is empty.
    fn summary(&self) -> Option<String>;

    /// Writes a human-readable report of the problem and the computed result.
    fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "=== {} ===", self.name())?;
        writeln!(out, "Problem: {}", self.statement())?;
        writeln!(out, "Complexity: {}", self.complexity())?;
        if let Some(summary) = self.summary() {
            writeln!(out, "Result: {summary}")?;
        }
        writeln!(out)
    }
}

/// The closed set of solvers, dispatching uniformly to the wrapped implementation.
#[derive(Clone, Debug)]
pub enum Solver {
    GlobalMinCut(GlobalMinCutSolver),
    STMinCut(STMinCutSolver),
    MinimumBisection(MinimumBisectionSolver),
    KWay(KWayPartitionSolver),
    MultilevelKWay(MultilevelKWayPartitionSolver),
    VertexSeparator(VertexSeparatorSolver),
}

impl Solver {
    fn inner(&self) -> &dyn PartitionSolver {
        match self {
            Solver::GlobalMinCut(s) => s,
            Solver::STMinCut(s) => s,
            Solver::MinimumBisection(s) => s,
            Solver::KWay(s) => s,
            Solver::MultilevelKWay(s) => s,
            Solver::VertexSeparator(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn PartitionSolver {
        match self {
            Solver::GlobalMinCut(s) => s,
            Solver::STMinCut(s) => s,
            Solver::MinimumBisection(s) => s,
            Solver::KWay(s) => s,
            Solver::MultilevelKWay(s) => s,
            Solver::VertexSeparator(s) => s,
        }
    }
}

impl PartitionSolver for Solver {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn statement(&self) -> &'static str {
        self.inner().statement()
    }

    fn complexity(&self) -> &'static str {
        self.inner().complexity()
    }

    fn solve(&mut self, graph: &Graph) -> Result<()> {
        self.inner_mut().solve(graph)
    }

    fn result(&self) -> PartitionResult {
        self.inner().result()
    }

    fn summary(&self) -> Option<String> {
        self.inner().summary()
    }

    fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        self.inner().print(out)
    }
}

macro_rules! impl_from_solver {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Solver {
                fn from(solver: $ty) -> Self {
                    Solver::$variant(solver)
                }
            }
        )*
    };
}

impl_from_solver!(
    GlobalMinCut(GlobalMinCutSolver),
    STMinCut(STMinCutSolver),
    MinimumBisection(MinimumBisectionSolver),
    KWay(KWayPartitionSolver),
    MultilevelKWay(MultilevelKWayPartitionSolver),
    VertexSeparator(VertexSeparatorSolver),
);

/// Formats the label counts of a k-way result, e.g. `k=3 cut=4 sizes=[3,3,2]`.
pub(crate) fn kway_summary(result: &PartitionResult) -> Option<String> {
    if result.part.is_empty() {
        return None;
    }
    let sizes = crate::block_sizes(&result.part);
    let sizes_list = sizes
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",");
    Some(format!(
        "k={} cut={} sizes=[{}]",
        sizes.len(),
        result.cut_weight,
        sizes_list
    ))
}
