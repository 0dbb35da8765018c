use graph_cut_suite::{
    BisectionConfig, GlobalMinCutSolver, Graph, KWayConfig, KWayPartitionSolver,
    MinimumBisectionSolver, MultilevelConfig, MultilevelKWayPartitionSolver, PartitionSolver,
    STMinCutSolver, Solver, VertexSeparatorSolver,
};
use std::io;
use std::time;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Two dense 4-cycles joined by the light edges 3-4 and 2-5.
    let mut graph = Graph::new(8);
    for (u, v, w) in [
        (0, 1, 3),
        (1, 2, 2),
        (2, 3, 4),
        (3, 0, 1),
        (4, 5, 3),
        (5, 6, 2),
        (6, 7, 4),
        (7, 4, 1),
        (3, 4, 1),
        (2, 5, 1),
    ] {
        graph.add_undirected(u, v, w)?;
    }

    let mut solvers: Vec<Solver> = vec![
        MinimumBisectionSolver::new(BisectionConfig::default()).into(),
        KWayPartitionSolver::new(KWayConfig {
            parts: 3,
            ..Default::default()
        })
        .into(),
        MultilevelKWayPartitionSolver::new(MultilevelConfig {
            parts: 3,
            ..Default::default()
        })
        .into(),
        VertexSeparatorSolver::new(BisectionConfig::default()).into(),
        GlobalMinCutSolver::new().into(),
        STMinCutSolver::new(0, 6).into(),
    ];

    let mut stdout = io::stdout().lock();
    for solver in solvers.iter_mut() {
        let t1 = time::Instant::now();
        solver.solve(&graph)?;
        log::info!("{}: {}us", solver.name(), t1.elapsed().as_micros());
        solver.print(&mut stdout)?;
    }
    Ok(())
}
