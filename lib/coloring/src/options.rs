/// How the color bound is imposed on the solver.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BoundMode {
    /// Pass the bound as a single assumption literal on every call.
    Assumption,
    /// Commit the bound as unit clauses.
    Clause,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Options {
    /// Restrict transitivity clauses to the triangles found by min-fill elimination.
    pub triangulate: bool,
    pub bound_mode: BoundMode,
}

pub const DEFAULT_OPTIONS: Options = Options {
    triangulate: false,
    bound_mode: BoundMode::Assumption,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}
