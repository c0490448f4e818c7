//! DIMACS graph format.
//!
//! ```text
//! c comment
//! p edge <vertices> <edges>
//! e <u> <v>
//! ```
//!
//! Vertices are 1-based in the file and 0-based in [Graph].
//! `p col` is accepted as a synonym of `p edge`.

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use itertools::Itertools;
use log::{debug, warn};
use snafu::{ensure, OptionExt, ResultExt};

use crate::error::*;
use crate::graph::Graph;

pub fn read_graph<P>(path: P) -> Result<Graph>
where
    P: AsRef<Path>,
{
    let file = File::open(path).context(IoSnafu)?;
    parse_graph(io::BufReader::new(file))
}

pub fn parse_graph<R>(reader: R) -> Result<Graph>
where
    R: BufRead,
{
    let mut graph: Option<Graph> = None;
    let mut declared_edges = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context(IoSnafu)?;
        let line_no = index + 1;
        let tokens = line.split_whitespace().collect_vec();

        match tokens.first() {
            None => continue,
            Some(&"c") => continue,
            Some(&"p") => {
                ensure!(graph.is_none(), DuplicateHeaderSnafu { line: line_no });
                let (num_vertices, num_edges) = parse_header(&tokens).context(BadHeaderSnafu {
                    line: line_no,
                    text: line.as_str(),
                })?;
                debug!("Problem line: {} vertices, {} edges", num_vertices, num_edges);
                declared_edges = num_edges;
                graph = Some(Graph::new(num_vertices));
            }
            Some(&"e") => {
                let graph = graph.as_mut().context(EdgeBeforeHeaderSnafu { line: line_no })?;
                let (u, v) = parse_edge(&tokens).context(BadEdgeSnafu {
                    line: line_no,
                    text: line.as_str(),
                })?;
                let n = graph.num_vertices();
                for w in [u, v] {
                    ensure!(
                        (1..=n).contains(&w),
                        BadVertexSnafu {
                            line: line_no,
                            vertex: w,
                            num_vertices: n
                        }
                    );
                }
                ensure!(u != v, BadLoopSnafu { line: line_no, vertex: u });
                graph.add_edge(u - 1, v - 1)?;
            }
            Some(_) => {
                warn!("Line {}: skipping unknown record '{}'", line_no, line);
            }
        }
    }

    let graph = graph.context(MissingHeaderSnafu)?;
    if graph.num_edges() != declared_edges {
        warn!(
            "Problem line declares {} edges, but {} distinct edges were read",
            declared_edges,
            graph.num_edges()
        );
    }
    Ok(graph)
}

fn parse_header(tokens: &[&str]) -> Option<(usize, usize)> {
    match tokens {
        ["p", "edge" | "col", n, m] => Some((n.parse().ok()?, m.parse().ok()?)),
        _ => None,
    }
}

fn parse_edge(tokens: &[&str]) -> Option<(usize, usize)> {
    match tokens {
        ["e", u, v] => Some((u.parse().ok()?, v.parse().ok()?)),
        _ => None,
    }
}
