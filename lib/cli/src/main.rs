use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use elapsed::measure_time;
use itertools::Itertools;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use chromatic_coloring::dot::{write_coloring_dot, write_graph_dot};
use chromatic_coloring::elimination::GraphModel;
use chromatic_coloring::options::{BoundMode, Options, DEFAULT_OPTIONS};
use chromatic_coloring::parsing::{parse_graph, read_graph};
use chromatic_coloring::search::{Outcome, SearchDriver};
use chromatic_coloring::wcnf::write_wcnf;
use chromatic_core::solver::Solver;
use chromatic_wrappers::varisat::VarisatSolver;

// Run this example:
// cargo run -p chromatic-cli -- data/myciel3.col --triangulate

#[derive(Parser, Debug)]
#[command(author, version)]
struct Cli {
    /// Graph in DIMACS format (read from stdin if omitted).
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Restrict transitivity clauses to the triangles of a min-fill elimination.
    #[arg(short, long)]
    triangulate: bool,

    /// Print the optimal coloring in DOT format to stderr.
    #[arg(long)]
    print: bool,

    /// Print the graph in DOT format to stderr and exit.
    #[arg(long)]
    dot: bool,

    /// Print the encoding as weighted MaxSAT (WCNF) to stdout and exit.
    #[arg(long)]
    maxsat: bool,

    /// Commit color bounds as clauses instead of passing them as assumptions.
    #[arg(long)]
    hard_bounds: bool,

    /// Log level.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    TermLogger::init(args.log_level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto)?;
    info!("args = {:?}", args);

    let (elapsed, res) = measure_time(|| run(&args));
    info!("All done in {}", elapsed);
    res
}

fn run(args: &Cli) -> color_eyre::Result<()> {
    let (elapsed, graph) = measure_time(|| match &args.input {
        Some(path) => read_graph(path),
        None => parse_graph(io::stdin().lock()),
    });
    let graph = graph?;
    info!(
        "Parsed {} vertices and {} edges in {}",
        graph.num_vertices(),
        graph.num_edges(),
        elapsed
    );

    if args.dot {
        write_graph_dot(io::stderr().lock(), &graph)?;
        return Ok(());
    }

    let options = Options {
        triangulate: args.triangulate,
        bound_mode: if args.hard_bounds {
            BoundMode::Clause
        } else {
            BoundMode::Assumption
        },
        ..DEFAULT_OPTIONS
    };
    info!("options = {:?}", options);

    let time_model = Instant::now();
    let model = GraphModel::new(graph, &options);
    info!("Elimination done in {:.3} s", time_model.elapsed().as_secs_f64());

    if args.maxsat {
        write_wcnf(io::stdout().lock(), &model)?;
        return Ok(());
    }

    let solver = VarisatSolver::new();
    info!("solver = {}", solver);
    let mut driver = SearchDriver::new(solver, &model, &options);
    info!(
        "Encoding has {} variables and {} clauses",
        driver.solver().num_vars(),
        driver.solver().num_clauses()
    );

    let (elapsed, report) = measure_time(|| driver.run());
    let report = report?;
    info!("Search done in {}", elapsed);
    info!(
        "Solver calls: {}, bounds: [{}], refinements: {}, solve time: {:.3} s",
        report.solver_calls,
        report.bounds.iter().join(", "),
        report.refinements,
        report.solve_time.as_secs_f64()
    );

    match &report.outcome {
        Outcome::Optimal(coloring) => {
            println!("s OPTIMUM FOUND");
            println!("o {} colors", coloring.num_colors());
        }
        Outcome::OutOfResource { best } => {
            println!("s UNKNOWN");
            if let Some(coloring) = best {
                println!("o {} colors", coloring.num_colors());
            }
        }
    }

    if args.print {
        if let Some(coloring) = report.best() {
            write_coloring_dot(io::stderr().lock(), model.graph(), coloring)?;
        }
    }

    Ok(())
}
