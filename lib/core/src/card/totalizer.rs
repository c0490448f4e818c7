//! Totalizer from [[`1`]].
//!
//! [[`1`]] O. Bailleux and Y. Boufkhad, _"Efficient CNF encoding of Boolean cardinality constraints,"_ in Principles and Practice of Constraint Programming, 2003, pp. 108–122.
//!
//! [`1`]: https://doi.org/10.1007/978-3-540-45193-8_8

use std::collections::VecDeque;

use itertools::Itertools;
use log::debug;

use crate::lit::Lit;
use crate::solver::Solver;

/// Unary counter over a set of input literals.
///
/// `output_vars[i]` is true iff at least `i + 1` inputs are true.
/// Upper bounds can be tightened incrementally, either permanently (unit clauses)
/// or per call (a single assumption literal), but never loosened.
#[derive(Debug)]
pub struct Totalizer {
    pub output_vars: Vec<Lit>,
    declared_upper_bound: Option<usize>,
    assumed_upper_bound: Option<usize>,
}

impl Totalizer {
    pub fn new<S>(solver: &mut S, input_vars: &[Lit]) -> Self
    where
        S: Solver,
    {
        assert!(!input_vars.is_empty());

        let output_vars = (0..input_vars.len()).map(|_| solver.new_var()).collect_vec();
        let mut queue = VecDeque::from([(input_vars, output_vars.clone())]);

        while let Some((leaves, r)) = queue.pop_front() {
            let m = leaves.len();
            if m == 1 {
                // Single leaf: its output is the input literal itself.
                solver.add_clause([-leaves[0], r[0]]);
                solver.add_clause([leaves[0], -r[0]]);
                continue;
            }
            assert!(m > 1);

            let (left, right) = leaves.split_at(m / 2);
            let m1 = left.len();
            let m2 = right.len();
            assert_eq!(m1 + m2, m);

            let a = if m1 > 1 {
                (0..m1).map(|_| solver.new_var()).collect_vec()
            } else {
                vec![left[0]]
            };
            let b = if m2 > 1 {
                (0..m2).map(|_| solver.new_var()).collect_vec()
            } else {
                vec![right[0]]
            };

            for alpha in 0..=m1 {
                for beta in 0..=m2 {
                    let sigma = alpha + beta;

                    let c1 = if sigma == 0 {
                        None
                    } else if alpha == 0 {
                        Some(vec![-b[beta - 1], r[sigma - 1]])
                    } else if beta == 0 {
                        Some(vec![-a[alpha - 1], r[sigma - 1]])
                    } else {
                        Some(vec![-a[alpha - 1], -b[beta - 1], r[sigma - 1]])
                    };
                    let c2 = if sigma == m {
                        None
                    } else if alpha == m1 {
                        Some(vec![b[beta], -r[sigma]])
                    } else if beta == m2 {
                        Some(vec![a[alpha], -r[sigma]])
                    } else {
                        Some(vec![a[alpha], b[beta], -r[sigma]])
                    };

                    if let Some(c) = c1 {
                        solver.add_clause(c);
                    }
                    if let Some(c) = c2 {
                        solver.add_clause(c);
                    }
                }
            }

            if m2 > 1 {
                queue.push_front((right, b));
            }
            if m1 > 1 {
                queue.push_front((left, a));
            }
        }

        debug!(
            "Declared totalizer over {} inputs, solver has {} variables and {} clauses",
            input_vars.len(),
            solver.num_vars(),
            solver.num_clauses()
        );
        Self {
            output_vars,
            declared_upper_bound: None,
            assumed_upper_bound: None,
        }
    }

    /// Permanently enforce `sum < new_ub`.
    pub fn declare_upper_bound_less_than<S>(&mut self, solver: &mut S, new_ub: usize)
    where
        S: Solver,
    {
        assert!(new_ub >= 1, "Upper bound 'sum < 0' is unsatisfiable by construction");
        assert!(new_ub <= self.output_vars.len());
        if let Some(cur_ub) = self.declared_upper_bound {
            assert!(
                new_ub < cur_ub,
                "New upper bound must be less than the current one (new_ub = {}, cur_ub = {})",
                new_ub,
                cur_ub
            );
        }

        let end = self
            .declared_upper_bound
            .replace(new_ub)
            .unwrap_or(self.output_vars.len() + 1);
        for i in (new_ub..end).rev() {
            // Note: totalizer is 0-based, but all params are naturally 1-based
            solver.add_clause([-self.output_vars[i - 1]]);
        }
    }

    /// Permanently enforce `sum <= new_ub`.
    pub fn declare_upper_bound_less_than_or_equal<S>(&mut self, solver: &mut S, new_ub: usize)
    where
        S: Solver,
    {
        self.declare_upper_bound_less_than(solver, new_ub + 1);
    }

    /// Tighten the per-call bound to `sum <= new_ub` and return the literal to assume,
    /// or `None` if the bound is trivially satisfied.
    pub fn assume_upper_bound_less_than_or_equal(&mut self, new_ub: usize) -> Option<Lit> {
        if let Some(cur_ub) = self.assumed_upper_bound {
            assert!(
                new_ub < cur_ub,
                "New upper bound must be less than the current one (new_ub = {}, cur_ub = {})",
                new_ub,
                cur_ub
            );
        }
        self.assumed_upper_bound = Some(new_ub);
        self.upper_bound_assumption()
    }

    /// The assumption literal for the current per-call bound, if any.
    pub fn upper_bound_assumption(&self) -> Option<Lit> {
        let ub = self.assumed_upper_bound?;
        self.output_vars.get(ub).map(|&r| -r)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::card::Cardinality;
    use crate::solver::mock::MockSolver;
    use crate::solver::SolverExt;

    #[test_log::test]
    fn test_totalizer_output() {
        let mut s = MockSolver::new();
        let n = 11;
        let lits = s.new_var_vec(n);
        let t = s.declare_totalizer(&lits);
        assert_eq!(t.output_vars.len(), lits.len());
        assert_eq!(
            t.output_vars.iter().map(|lit| lit.get()).collect_vec(),
            ((n + 1) as i32..=(n + n) as i32).collect_vec()
        );
    }

    #[test_log::test]
    fn test_declared_bounds_add_only_new_units() {
        let mut s = MockSolver::new();
        let lits = s.new_var_vec(4);
        let mut t = s.declare_totalizer(&lits);
        let r = t.output_vars.clone();

        let before = s.clauses().len();
        t.declare_upper_bound_less_than_or_equal(&mut s, 2);
        assert_eq!(&s.clauses()[before..], &[vec![-r[3]], vec![-r[2]]]);

        let before = s.clauses().len();
        t.declare_upper_bound_less_than_or_equal(&mut s, 1);
        assert_eq!(&s.clauses()[before..], &[vec![-r[1]]]);
    }

    #[test]
    fn test_assumed_bounds() {
        let mut s = MockSolver::new();
        let lits = s.new_var_vec(3);
        let mut t = s.declare_totalizer(&lits);
        let r = t.output_vars.clone();

        assert_eq!(t.upper_bound_assumption(), None);
        assert_eq!(t.assume_upper_bound_less_than_or_equal(3), None);
        assert_eq!(t.assume_upper_bound_less_than_or_equal(2), Some(-r[2]));
        assert_eq!(t.assume_upper_bound_less_than_or_equal(0), Some(-r[0]));
        assert_eq!(t.upper_bound_assumption(), Some(-r[0]));
    }

    #[test]
    #[should_panic(expected = "New upper bound must be less than the current one")]
    fn test_assumed_bound_cannot_be_loosened() {
        let mut s = MockSolver::new();
        let lits = s.new_var_vec(3);
        let mut t = s.declare_totalizer(&lits);
        t.assume_upper_bound_less_than_or_equal(1);
        t.assume_upper_bound_less_than_or_equal(1);
    }
}
