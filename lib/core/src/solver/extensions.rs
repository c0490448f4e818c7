use crate::lit::Lit;
use crate::model::Model;

use super::Solver;

impl<S> SolverExt for S where S: Solver {}

pub trait SolverExt: Solver {
    fn new_var_vec(&mut self, len: usize) -> Vec<Lit> {
        (0..len).map(|_| self.new_var()).collect()
    }

    fn new_var_array<const N: usize>(&mut self) -> [Lit; N] {
        std::array::from_fn(|_| self.new_var())
    }

    /// Register all `lits` as assumptions for the next call to `solve`.
    fn assume_all<I>(&mut self, lits: I)
    where
        I: IntoIterator,
        I::Item: Into<Lit>,
    {
        for lit in lits {
            self.assume(lit);
        }
    }

    /// Snapshot the current model. Must only be called right after a `Sat` response.
    fn model(&self) -> Model {
        Model::from_solver(self)
    }
}
