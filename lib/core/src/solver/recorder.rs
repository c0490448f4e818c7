use std::borrow::Cow;
use std::fmt::{Display, Formatter};

use crate::cnf::clause::Clause;
use crate::cnf::Cnf;
use crate::lit::Lit;

use super::types::*;
use super::Solver;

/// Solver front-end that only collects the formula into a [Cnf].
///
/// Assumptions are dropped and `solve` always answers `Unknown`.
#[derive(Debug, Default)]
pub struct RecordingSolver {
    cnf: Cnf,
}

impl RecordingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_cnf(self) -> Cnf {
        self.cnf
    }
}

impl Display for RecordingSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.signature())
    }
}

impl Solver for RecordingSolver {
    fn signature(&self) -> Cow<str> {
        "recorder".into()
    }

    fn num_vars(&self) -> usize {
        self.cnf.max_var
    }
    fn num_clauses(&self) -> usize {
        self.cnf.clauses.len()
    }

    fn new_var(&mut self) -> Lit {
        self.cnf.max_var += 1;
        Lit::new(self.cnf.max_var as i32)
    }

    fn assume<L>(&mut self, _lit: L)
    where
        L: Into<Lit>,
    {
        /* do nothing */
    }

    fn add_clause<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        self.cnf.add_clause(Clause::from(lits));
    }

    fn solve(&mut self) -> SolveResponse {
        SolveResponse::Unknown
    }

    fn value<L>(&self, _lit: L) -> LitValue
    where
        L: Into<Lit>,
    {
        LitValue::DontCare
    }
}
