use std::borrow::Cow;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::lit::Lit;

use super::types::*;
use super::Solver;

/// Scripted solver for tests: records everything it is given and answers
/// `solve` calls from a queue of canned responses (`Unknown` once exhausted).
#[derive(Debug, Default)]
pub struct MockSolver {
    nvars: usize,
    clauses: Vec<Vec<Lit>>,
    assumptions: Vec<Lit>,
    assumption_log: Vec<Vec<Lit>>,
    responses: VecDeque<SolveResponse>,
    model: Vec<bool>,
}

impl MockSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = SolveResponse>,
    {
        Self {
            responses: responses.into_iter().collect(),
            ..Self::default()
        }
    }

    /// `values[i]` is reported as the value of variable `i + 1`.
    pub fn set_model(&mut self, values: Vec<bool>) {
        self.model = values;
    }

    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    /// Assumptions that were in effect for each `solve` call, in call order.
    pub fn assumption_log(&self) -> &[Vec<Lit>] {
        &self.assumption_log
    }
}

impl Display for MockSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Solver for MockSolver {
    fn signature(&self) -> Cow<str> {
        "mock".into()
    }

    fn num_vars(&self) -> usize {
        self.nvars
    }
    fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    fn new_var(&mut self) -> Lit {
        self.nvars += 1;
        Lit::new(self.nvars as i32)
    }

    fn assume<L>(&mut self, lit: L)
    where
        L: Into<Lit>,
    {
        self.assumptions.push(lit.into());
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        let lits = lits.into_iter().map_into::<Lit>().collect_vec();
        self.clauses.push(lits);
    }

    fn solve(&mut self) -> SolveResponse {
        let assumptions = std::mem::take(&mut self.assumptions);
        self.assumption_log.push(assumptions);
        self.responses.pop_front().unwrap_or(SolveResponse::Unknown)
    }

    fn value<L>(&self, lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        let lit = lit.into();
        match self.model.get(lit.var() as usize - 1) {
            Some(&value) if value == lit.polarity() => LitValue::True,
            Some(_) => LitValue::False,
            None => LitValue::DontCare,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_solver() -> color_eyre::Result<()> {
        let mut solver = MockSolver::with_responses([SolveResponse::Sat, SolveResponse::Unsat]);
        assert_eq!(solver.signature(), "mock");

        let a = solver.new_var();
        let b = solver.new_var();
        let c = solver.new_var();
        let d = solver.new_var();
        assert_eq!(solver.num_vars(), 4);

        solver.add_clause([a, b]);
        solver.add_clause(&[c, d]);
        solver.add_clause(vec![-a, -b]);
        solver.add_unit(-c);
        assert_eq!(solver.num_clauses(), 4);

        solver.set_model(vec![true, false, false, true]);
        solver.assume(a);
        assert_eq!(solver.solve(), SolveResponse::Sat);
        assert_eq!(solver.value(a), LitValue::True);
        assert_eq!(solver.value(-b), LitValue::True);
        assert_eq!(solver.value(c), LitValue::False);

        assert_eq!(solver.solve(), SolveResponse::Unsat);
        assert_eq!(solver.solve(), SolveResponse::Unknown);
        assert_eq!(solver.assumption_log(), &[vec![a], vec![], vec![]]);

        let e = solver.new_var();
        assert_eq!(solver.value(e), LitValue::DontCare);

        Ok(())
    }
}
