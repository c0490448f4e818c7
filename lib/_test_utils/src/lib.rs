use std::fmt::Display;

use rand::prelude::*;

use chromatic::coloring::graph::Graph;
use chromatic::core::solver::*;

pub fn run_solver_smoke_test<S>(mut solver: S) -> color_eyre::Result<()>
where
    S: Solver + Display,
{
    println!("Solver signature: {}", solver.signature());
    println!("solver = {}", solver);

    solver.add_clause([1, 2]);
    solver.add_clause(vec![3, 4]);
    solver.add_clause([-1, -2]);
    solver.add_clause(vec![-3, -4]);
    solver.add_unit(5);
    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert!(matches!(response, SolveResponse::Sat));

    solver.assume(1);
    solver.assume(2);
    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert!(matches!(response, SolveResponse::Unsat));

    let response = solver.solve();
    println!("Solver returned: {:?}", response);
    assert!(matches!(response, SolveResponse::Sat));

    for i in 1..=5 {
        println!("solver.val({}) = {:?}", i, solver.value(i));
    }
    assert_eq!(solver.value(5), LitValue::True);

    Ok(())
}

pub fn complete(n: usize) -> Graph {
    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            graph.add_edge(u, v).unwrap();
        }
    }
    graph
}

pub fn cycle(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
}

pub fn petersen() -> Graph {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    let inner = (0..5).map(|i| (i + 5, (i + 2) % 5 + 5));
    Graph::from_edges(10, outer.chain(spokes).chain(inner)).unwrap()
}

/// Erdős–Rényi graph `G(n, p)`, reproducible from `seed`.
pub fn random_graph(n: usize, p: f64, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new(n);
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(p) {
                graph.add_edge(u, v).unwrap();
            }
        }
    }
    graph
}

/// Chromatic number by exhaustive backtracking. Only for small graphs.
pub fn brute_force_chromatic_number(graph: &Graph) -> usize {
    let n = graph.num_vertices();
    (0..=n)
        .find(|&k| {
            let mut colors = vec![usize::MAX; n];
            try_color(graph, k, 0, &mut colors)
        })
        .unwrap_or(n)
}

fn try_color(graph: &Graph, k: usize, v: usize, colors: &mut [usize]) -> bool {
    if v == graph.num_vertices() {
        return true;
    }
    // Symmetry breaking: vertex v may use at most one color above those already used
    let max_used = colors[..v].iter().copied().max().map_or(0, |c| c + 1);
    for c in 0..k.min(max_used + 1) {
        if graph.neighbors(v).iter().all(|&u| colors[u] != c) {
            colors[v] = c;
            if try_color(graph, k, v + 1, colors) {
                return true;
            }
        }
    }
    colors[v] = usize::MAX;
    false
}
