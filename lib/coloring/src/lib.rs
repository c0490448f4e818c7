pub mod decoder;
pub mod dot;
pub mod elimination;
pub mod encoding;
pub mod error;
pub mod graph;
pub mod options;
pub mod parsing;
pub mod search;
pub mod wcnf;
