//! Weighted partial MaxSAT export of the coloring encoding.

use std::io::{self, Write};

use itertools::Itertools;

use chromatic_core::cnf::clause::Clause;
use chromatic_core::cnf::Cnf;
use chromatic_core::solver::recorder::RecordingSolver;

use crate::elimination::GraphModel;
use crate::encoding::ColoringEncoding;

/// Hard clauses of the encoding plus one unit soft clause `-n(k)` per vertex `k >= 1`.
pub fn encode_maxsat(model: &GraphModel) -> (Cnf, Vec<(u64, Clause)>) {
    let mut recorder = RecordingSolver::new();
    let encoding = ColoringEncoding::new(&mut recorder, model);
    let soft = encoding
        .color_count_vars()
        .iter()
        .skip(1)
        .map(|&n| (1, Clause::from([-n])))
        .collect_vec();
    (recorder.into_cnf(), soft)
}

/// Write `p wcnf` with hard weight equal to the number of vertices,
/// which exceeds the total soft weight.
pub fn write_wcnf<W>(w: W, model: &GraphModel) -> io::Result<()>
where
    W: Write,
{
    let (cnf, soft) = encode_maxsat(model);
    cnf.write_wcnf(w, model.num_vertices() as u64, &soft)
}
