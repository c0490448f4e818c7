use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

use itertools::Itertools;
use log::warn;
use tap::Pipe;

use ::varisat::{ExtendFormula, Lit as VarisatLit, Solver as Varisat};
use chromatic_core::lit::Lit;
use chromatic_core::solver::{LitValue, SolveResponse, Solver};

pub struct VarisatSolver {
    inner: Varisat<'static>,
    nvars: usize,
    nclauses: usize,
    assumptions: Vec<VarisatLit>,
    model: Option<Vec<bool>>,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self::new_custom(Varisat::new())
    }

    pub fn new_custom(inner: Varisat<'static>) -> Self {
        Self {
            inner,
            nvars: 0,
            nclauses: 0,
            assumptions: Vec::new(),
            model: None,
        }
    }

    /// Variables are allocated in varisat in order, so literals map one-to-one (1-based).
    fn ensure_vars(&mut self, num_vars: usize) {
        while self.nvars < num_vars {
            let var = self.inner.new_var();
            self.nvars += 1;
            debug_assert_eq!(var.to_dimacs() as usize, self.nvars);
        }
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        VarisatSolver::new()
    }
}

impl From<Varisat<'static>> for VarisatSolver {
    fn from(inner: Varisat<'static>) -> Self {
        VarisatSolver::new_custom(inner)
    }
}

impl Debug for VarisatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarisatSolver")
            .field("nvars", &self.nvars)
            .field("nclauses", &self.nclauses)
            .finish()
    }
}

impl Display for VarisatSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Solver for VarisatSolver {
    fn signature(&self) -> Cow<str> {
        "varisat".into()
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.nclauses
    }

    fn new_var(&mut self) -> Lit {
        self.ensure_vars(self.nvars + 1);
        Lit::new(self.nvars as i32)
    }

    fn assume<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        self.ensure_vars(lit.var() as usize);
        self.assumptions.push(lit.pipe(to_vs));
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits = lits.into_iter().map_into::<Lit>().collect_vec();
        if let Some(max_var) = lits.iter().map(|lit| lit.var() as usize).max() {
            self.ensure_vars(max_var);
        }
        let lits = lits.into_iter().map(to_vs).collect_vec();
        self.inner.add_clause(&lits);
        self.nclauses += 1;
    }

    fn solve(&mut self) -> SolveResponse {
        let assumptions = std::mem::take(&mut self.assumptions);
        self.inner.assume(&assumptions);
        self.model = None;
        match self.inner.solve() {
            Ok(true) => {
                let mut values = vec![false; self.nvars];
                for lit in self.inner.model().unwrap_or_default() {
                    if let Some(slot) = values.get_mut(lit.var().index()) {
                        *slot = lit.is_positive();
                    }
                }
                self.model = Some(values);
                SolveResponse::Sat
            }
            Ok(false) => SolveResponse::Unsat,
            Err(e) => {
                warn!("varisat gave up: {}", e);
                SolveResponse::Unknown
            }
        }
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        let value = self
            .model
            .as_ref()
            .and_then(|model| model.get(lit.var() as usize - 1));
        match value {
            Some(&value) if value == lit.polarity() => LitValue::True,
            Some(_) => LitValue::False,
            None => LitValue::DontCare,
        }
    }
}

fn to_vs(lit: Lit) -> VarisatLit {
    let lit = lit.get();
    debug_assert_ne!(lit, 0, "Literal must be non-zero");
    VarisatLit::from_dimacs(lit as isize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_varisat() -> color_eyre::Result<()> {
        let mut solver = VarisatSolver::new();
        assert!(solver.signature().contains("varisat"));

        // Initializing variables
        let a = solver.new_var();
        let b = solver.new_var();
        let c = solver.new_var();
        let d = solver.new_var();
        assert_eq!(solver.num_vars(), 4);
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(c.get(), 3);
        assert_eq!(d.get(), 4);

        // Adding [(a or b) and (c or d) and not(a and b) and not(c and d)]
        solver.add_clause([a, b]);
        solver.add_clause(&[c, d]);
        solver.add_clause(vec![-a, -b]);
        solver.add_clause(&vec![-c, -d]);
        assert_eq!(solver.num_clauses(), 4);

        // Problem is satisfiable
        let response = solver.solve();
        assert_eq!(response, SolveResponse::Sat);
        assert_ne!(solver.value(a), solver.value(b));
        assert_ne!(solver.value(c), solver.value(d));

        // Assuming both a and b to be true
        solver.assume(a);
        solver.assume(b);
        // Problem is unsatisfiable under assumptions
        let response = solver.solve();
        assert_eq!(response, SolveResponse::Unsat);
        assert_eq!(solver.value(a), LitValue::DontCare);

        // `solve` resets assumptions, so calling it again should produce SAT
        let response = solver.solve();
        assert_eq!(response, SolveResponse::Sat);

        // Assumptions pin the model
        solver.assume(-a);
        solver.assume(d);
        let response = solver.solve();
        assert_eq!(response, SolveResponse::Sat);
        assert_eq!(solver.value(b), LitValue::True);
        assert_eq!(solver.value(-c), LitValue::True);

        Ok(())
    }
}
