pub mod card;
pub mod cnf;
pub mod lit;
pub mod model;
pub mod op;
pub mod solver;
