#[path = "wrap_varisat.rs"]
pub mod varisat;
