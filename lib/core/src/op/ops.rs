use crate::lit::Lit;
use crate::solver::Solver;

impl<S> Ops for S where S: Solver {}

/// Clause-level combinators on top of [`Solver::add_clause`].
pub trait Ops: Solver {
    /// `lhs => rhs`
    fn imply(&mut self, lhs: Lit, rhs: Lit) {
        self.add_clause([-lhs, rhs]);
    }

    /// `lhs => OR(rhs)`
    fn imply_or<I>(&mut self, lhs: Lit, rhs: I)
    where
        I: IntoIterator<Item = Lit>,
    {
        let rhs = rhs.into_iter();
        let mut v = Vec::with_capacity(1 + rhs.size_hint().0);
        v.push(-lhs);
        v.extend(rhs);
        self.add_clause(v);
    }

    /// `x1 => (x2 => x3)`
    fn imply_imply(&mut self, x1: Lit, x2: Lit, x3: Lit) {
        self.add_clause([-x1, -x2, x3]);
    }
}
