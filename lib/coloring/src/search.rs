use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use log::{debug, info};

use chromatic_core::solver::{SolveResponse, Solver, SolverExt};

use crate::decoder::{decode, find_violation, Coloring};
use crate::elimination::GraphModel;
use crate::encoding::{ColorBound, ColoringEncoding};
use crate::error::{Result, TrivialBoundUnsatSnafu};
use crate::options::Options;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    /// The coloring uses the chromatic number of colors.
    Optimal(Coloring),
    /// The solver gave up; `best` is the best coloring seen before that.
    OutOfResource { best: Option<Coloring> },
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Optimal(coloring) => write!(f, "OPTIMUM ({} colors)", coloring.num_colors()),
            Outcome::OutOfResource { best: Some(coloring) } => {
                write!(f, "UNKNOWN (at most {} colors)", coloring.num_colors())
            }
            Outcome::OutOfResource { best: None } => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub solver_calls: usize,
    /// Color bounds in the order they were imposed.
    pub bounds: Vec<usize>,
    pub refinements: usize,
    pub solve_time: Duration,
}

impl SearchReport {
    pub fn chromatic_number(&self) -> Option<usize> {
        match &self.outcome {
            Outcome::Optimal(coloring) => Some(coloring.num_colors()),
            Outcome::OutOfResource { .. } => None,
        }
    }

    pub fn best(&self) -> Option<&Coloring> {
        match &self.outcome {
            Outcome::Optimal(coloring) => Some(coloring),
            Outcome::OutOfResource { best } => best.as_ref(),
        }
    }
}

/// Incremental minimization of the number of colors on a single solver.
///
/// Every satisfiable call lowers the bound to one below the number of colors
/// the decoded model actually uses; the first unsatisfiable call proves optimality.
#[derive(Debug)]
pub struct SearchDriver<'m, S> {
    solver: S,
    model: &'m GraphModel,
    encoding: ColoringEncoding,
    bound: ColorBound,
}

impl<'m, S> SearchDriver<'m, S>
where
    S: Solver,
{
    pub fn new(mut solver: S, model: &'m GraphModel, options: &Options) -> Self {
        let encoding = ColoringEncoding::new(&mut solver, model);
        let bound = ColorBound::new(&mut solver, &encoding, options.bound_mode);
        Self {
            solver,
            model,
            encoding,
            bound,
        }
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Run the search to completion. The bound only ever decreases, so a driver
    /// is good for a single run.
    pub fn run(&mut self) -> Result<SearchReport> {
        let mut report = SearchReport {
            outcome: Outcome::OutOfResource { best: None },
            solver_calls: 0,
            bounds: Vec::new(),
            refinements: 0,
            solve_time: Duration::ZERO,
        };

        if self.model.num_vertices() == 0 {
            info!("Empty graph needs no colors");
            report.outcome = Outcome::Optimal(Coloring::from_colors(Vec::new()));
            return Ok(report);
        }

        let model: &'m GraphModel = self.model;
        let graph = model.graph();
        let mut best: Option<Coloring> = None;

        let optimal = loop {
            let k = self.bound.max_colors();
            let assumption = self.bound.assumption();
            self.solver.assume_all(assumption);

            let time_solve = Instant::now();
            let response = self.solver.solve();
            let time_solve = time_solve.elapsed();
            report.solver_calls += 1;
            report.solve_time += time_solve;
            info!(
                "Solving for k = {:5}: {} in {:.3} s | p cnf {} {} | assumptions: {}",
                k,
                response,
                time_solve.as_secs_f64(),
                self.solver.num_vars(),
                self.solver.num_clauses(),
                assumption.iter().count()
            );

            match response {
                SolveResponse::Sat => {
                    let model = self.solver.model();
                    let coloring = decode(&model, &self.encoding);

                    if let Some(violation) = find_violation(&model, &self.encoding, &coloring, graph) {
                        debug!("Refining: {}", violation);
                        self.encoding
                            .add_same_color_transitivity(&mut self.solver, violation.x, violation.y, violation.z);
                        report.refinements += 1;
                        continue;
                    }
                    debug_assert!(coloring.is_proper(graph));

                    let used = coloring.num_colors();
                    assert!(used <= k, "Model uses {} colors under the bound {}", used, k);
                    if used < k {
                        debug!("Jump: model uses {} colors, bound was {}", used, k);
                    } else {
                        debug!("Step: model uses exactly {} colors", used);
                    }

                    let next = used - 1;
                    if next == 0 {
                        break coloring;
                    }
                    best = Some(coloring);
                    self.bound.tighten(&mut self.solver, next);
                    report.bounds.push(next);
                }
                SolveResponse::Unsat => match best.take() {
                    Some(coloring) => break coloring,
                    None => return TrivialBoundUnsatSnafu.fail(),
                },
                SolveResponse::Unknown => {
                    report.outcome = Outcome::OutOfResource { best };
                    info!("Search stopped: {}", report.outcome);
                    return Ok(report);
                }
            }
        };

        report.outcome = Outcome::Optimal(optimal);
        info!(
            "Search finished: {} after {} calls and {} refinements",
            report.outcome, report.solver_calls, report.refinements
        );
        Ok(report)
    }
}
