use itertools::Itertools;
use log::info;

use chromatic_core::card::totalizer::Totalizer;
use chromatic_core::card::Cardinality;
use chromatic_core::lit::Lit;
use chromatic_core::op::ops::Ops;
use chromatic_core::solver::{Solver, SolverExt};

use crate::elimination::GraphModel;
use crate::graph::Vertex;
use crate::options::BoundMode;

/// Variables of the coloring CNF.
///
/// `s(i, j)` is true iff `i` and `j` get *different* colors.
/// `n(k)` is true iff `k` gets a color not used by any `i < k`.
#[derive(Debug)]
pub struct ColoringEncoding {
    num_vertices: usize,
    n: Vec<Lit>,
    // s[i][j - i - 1] for i < j
    s: Vec<Vec<Lit>>,
}

impl ColoringEncoding {
    /// Allocate the variables and emit the edge, transitivity and color-counting clauses.
    pub fn new<S>(solver: &mut S, model: &GraphModel) -> Self
    where
        S: Solver,
    {
        let num_vertices = model.num_vertices();
        let n = solver.new_var_vec(num_vertices);
        let s = (0..num_vertices)
            .map(|i| solver.new_var_vec(num_vertices - i - 1))
            .collect_vec();
        let encoding = Self { num_vertices, n, s };

        // Adjacent vertices differ
        for edge in model.graph().edges() {
            solver.add_unit(encoding.s(edge.a(), edge.b()));
        }

        // Transitivity of "same color"
        let triangles = model.triangles();
        let num_triples = if triangles.is_empty() {
            let mut count = 0;
            for (a, b, c) in (0..num_vertices).tuple_combinations() {
                encoding.add_transitivity(solver, a, b, c);
                count += 1;
            }
            count
        } else {
            for [a, b, c] in triangles.iter() {
                encoding.add_transitivity(solver, a, b, c);
            }
            triangles.len()
        };

        // n(k) <=> k differs from every i < k
        if let Some(&n0) = encoding.n.first() {
            solver.add_unit(n0);
        }
        for k in 1..num_vertices {
            for i in 0..k {
                solver.imply(encoding.n[k], encoding.s(i, k));
            }
            solver.imply_or(-encoding.n[k], (0..k).map(|i| -encoding.s(i, k)));
        }

        info!(
            "Encoded {} vertices with {} transitivity triples: {} variables, {} clauses",
            num_vertices,
            num_triples,
            solver.num_vars(),
            solver.num_clauses()
        );
        encoding
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn n(&self, k: Vertex) -> Lit {
        self.n[k]
    }

    pub fn color_count_vars(&self) -> &[Lit] {
        &self.n
    }

    /// "Different colors" literal of an unordered pair.
    pub fn s(&self, u: Vertex, v: Vertex) -> Lit {
        assert_ne!(u, v, "No color variable for the pair ({}, {})", u, v);
        let (i, j) = if u < v { (u, v) } else { (v, u) };
        self.s[i][j - i - 1]
    }

    /// Both transitivity clauses of the sorted triple `a < b < c`.
    fn add_transitivity<S>(&self, solver: &mut S, a: Vertex, b: Vertex, c: Vertex)
    where
        S: Solver,
    {
        self.add_same_color_transitivity(solver, a, b, c);
        self.add_same_color_transitivity(solver, b, a, c);
    }

    /// `x ~ y  &  y ~ z  =>  x ~ z`, where `~` is "same color".
    pub fn add_same_color_transitivity<S>(&self, solver: &mut S, x: Vertex, y: Vertex, z: Vertex)
    where
        S: Solver,
    {
        solver.imply_imply(-self.s(x, y), -self.s(y, z), -self.s(x, z));
    }
}

/// Incrementally tightened upper bound on the number of colors.
///
/// Wraps a totalizer over `n(1)..n(N-1)`: at most `k` colors means at most `k - 1`
/// of those are true, since `n(0)` always holds.
#[derive(Debug)]
pub struct ColorBound {
    totalizer: Option<Totalizer>,
    mode: BoundMode,
    max_colors: usize,
}

impl ColorBound {
    pub fn new<S>(solver: &mut S, encoding: &ColoringEncoding, mode: BoundMode) -> Self
    where
        S: Solver,
    {
        let inputs = encoding.color_count_vars().get(1..).unwrap_or_default();
        let totalizer = if inputs.is_empty() {
            None
        } else {
            Some(solver.declare_totalizer(inputs))
        };
        Self {
            totalizer,
            mode,
            max_colors: encoding.num_vertices(),
        }
    }

    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    /// Allow at most `max_colors` colors from now on.
    pub fn tighten<S>(&mut self, solver: &mut S, max_colors: usize)
    where
        S: Solver,
    {
        assert!(max_colors >= 1, "At least one color is always needed");
        assert!(
            max_colors < self.max_colors,
            "New color bound must be less than the current one (new = {}, cur = {})",
            max_colors,
            self.max_colors
        );
        self.max_colors = max_colors;

        if let Some(totalizer) = &mut self.totalizer {
            match self.mode {
                BoundMode::Assumption => {
                    totalizer.assume_upper_bound_less_than_or_equal(max_colors - 1);
                }
                BoundMode::Clause => {
                    totalizer.declare_upper_bound_less_than_or_equal(solver, max_colors - 1);
                }
            }
        }
    }

    /// Literal to assume before the next solve, if the bound is passed by assumption.
    pub fn assumption(&self) -> Option<Lit> {
        match self.mode {
            BoundMode::Assumption => self.totalizer.as_ref()?.upper_bound_assumption(),
            BoundMode::Clause => None,
        }
    }
}
