use std::fmt::{Debug, Display, Formatter};
use std::io::{self, Write};
use std::slice::Iter;

use clause::Clause;

pub mod clause;

#[derive(Debug, Default, Clone)]
pub struct Cnf {
    pub max_var: usize,
    pub clauses: Vec<Clause>,
}

impl Cnf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> Iter<'_, Clause> {
        self.clauses.iter()
    }

    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        let max_var = clause.iter().map(|lit| lit.var() as usize).max().unwrap_or(0);
        self.max_var = self.max_var.max(max_var);
        self.clauses.push(clause);
    }

    /// Write the formula as weighted partial MaxSAT (`p wcnf`): every clause of
    /// `self` becomes hard with weight `top`, followed by the weighted `soft` clauses.
    pub fn write_wcnf<W>(&self, mut w: W, top: u64, soft: &[(u64, Clause)]) -> io::Result<()>
    where
        W: Write,
    {
        let max_var = soft
            .iter()
            .flat_map(|(_, clause)| clause.iter())
            .map(|lit| lit.var() as usize)
            .fold(self.max_var, usize::max);
        writeln!(w, "p wcnf {} {} {}", max_var, self.clauses.len() + soft.len(), top)?;
        for clause in self.clauses.iter() {
            write_weighted(&mut w, top, clause)?;
        }
        for (weight, clause) in soft.iter() {
            write_weighted(&mut w, *weight, clause)?;
        }
        Ok(())
    }
}

fn write_weighted<W>(w: &mut W, weight: u64, clause: &Clause) -> io::Result<()>
where
    W: Write,
{
    write!(w, "{}", weight)?;
    for lit in clause.iter() {
        write!(w, " {}", lit)?;
    }
    writeln!(w, " 0")
}

impl<I> From<I> for Cnf
where
    I: IntoIterator,
    I::Item: Into<Clause>,
{
    fn from(iter: I) -> Self {
        let mut cnf = Self::new();
        for clause in iter.into_iter() {
            cnf.add_clause(clause)
        }
        cnf
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_list();
        for clause in self.clauses.iter() {
            list.entry(&format_args!("{}", clause));
        }
        list.finish()
    }
}
