use crate::lit::Lit;
use crate::solver::{LitValue, Solver};

/// Total assignment captured from a solver after a `Sat` response.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Model {
    // Index 0 is unused, variables are 1-based.
    data: Vec<bool>,
}

impl Model {
    /// `values[i]` is the value of variable `i + 1`.
    pub fn new(values: Vec<bool>) -> Self {
        let mut data = Vec::with_capacity(values.len() + 1);
        data.push(false);
        data.extend(values);
        Self { data }
    }

    /// Unassigned variables are read as `false`.
    pub fn from_solver<S>(solver: &S) -> Self
    where
        S: Solver,
    {
        let values = (1..=solver.num_vars())
            .map(|v| solver.value(Lit::from_var(v as u32, true)) == LitValue::True)
            .collect();
        Self::new(values)
    }

    pub fn num_vars(&self) -> usize {
        self.data.len() - 1
    }

    /// Value of the literal under this model.
    pub fn get(&self, lit: Lit) -> bool {
        let value = self.data[lit.var() as usize];
        value == lit.polarity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_respects_polarity() {
        let model = Model::new(vec![true, false]);
        assert_eq!(model.num_vars(), 2);
        assert!(model.get(Lit::new(1)));
        assert!(!model.get(Lit::new(-1)));
        assert!(!model.get(Lit::new(2)));
        assert!(model.get(Lit::new(-2)));
    }
}
