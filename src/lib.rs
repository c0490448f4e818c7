pub use chromatic_coloring as coloring;
pub use chromatic_core as core;
pub use chromatic_wrappers as wrappers;
