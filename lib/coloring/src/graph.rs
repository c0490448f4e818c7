use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use snafu::ensure;

use crate::error::{Result, SelfLoopSnafu, VertexOutOfRangeSnafu, ZeroCardinalitySnafu};

/// Vertex id in `0..num_vertices`.
pub type Vertex = usize;

/// Default vertex cardinality used for weighted treewidth.
pub const DEFAULT_CARDINALITY: u32 = 2;

/// Undirected edge, stored with `a < b`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Edge {
    a: Vertex,
    b: Vertex,
}

impl Edge {
    pub fn new(u: Vertex, v: Vertex) -> Self {
        debug_assert_ne!(u, v);
        Self {
            a: u.min(v),
            b: u.max(v),
        }
    }

    pub fn a(&self) -> Vertex {
        self.a
    }

    pub fn b(&self) -> Vertex {
        self.b
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Simple undirected graph.
///
/// Edges are kept both as an insertion-ordered list and as symmetric adjacency sets.
#[derive(Debug, Clone)]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<Edge>,
    adjacency: Vec<BTreeSet<Vertex>>,
    cardinality: Vec<u32>,
}

impl Graph {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            edges: Vec::new(),
            adjacency: vec![BTreeSet::new(); num_vertices],
            cardinality: vec![DEFAULT_CARDINALITY; num_vertices],
        }
    }

    pub fn from_edges<I>(num_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Vertex, Vertex)>,
    {
        let mut graph = Self::new(num_vertices);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// Connect `u` and `v`. Returns `false` if they were already connected.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        ensure!(u != v, SelfLoopSnafu { vertex: u });

        if self.adjacency[u].contains(&v) {
            return Ok(false);
        }
        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
        self.edges.push(Edge::new(u, v));
        Ok(true)
    }

    fn check_vertex(&self, v: Vertex) -> Result<()> {
        ensure!(
            v < self.num_vertices,
            VertexOutOfRangeSnafu {
                vertex: v,
                num_vertices: self.num_vertices
            }
        );
        Ok(())
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertices(&self) -> std::ops::Range<Vertex> {
        0..self.num_vertices
    }

    pub fn neighbors(&self, v: Vertex) -> &BTreeSet<Vertex> {
        &self.adjacency[v]
    }

    pub fn degree(&self, v: Vertex) -> usize {
        self.adjacency[v].len()
    }

    pub fn are_adjacent(&self, u: Vertex, v: Vertex) -> bool {
        self.adjacency[u].contains(&v)
    }

    pub fn cardinality(&self, v: Vertex) -> u32 {
        self.cardinality[v]
    }

    /// Cardinalities are positive, so their `log2` weights are never negative.
    pub fn set_cardinality(&mut self, v: Vertex, cardinality: u32) -> Result<()> {
        self.check_vertex(v)?;
        ensure!(cardinality > 0, ZeroCardinalitySnafu { vertex: v });
        self.cardinality[v] = cardinality;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ColoringError;

    #[test]
    fn test_duplicate_edge_is_idempotent() -> color_eyre::Result<()> {
        let mut graph = Graph::new(3);
        assert!(graph.add_edge(0, 1)?);
        assert!(!graph.add_edge(0, 1)?);
        assert!(!graph.add_edge(1, 0)?);
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.edges(), &[Edge::new(1, 0)]);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 1);
        Ok(())
    }

    #[test]
    fn test_adjacency_is_symmetric() -> color_eyre::Result<()> {
        let graph = Graph::from_edges(4, [(0, 1), (2, 1), (3, 0)])?;
        for u in graph.vertices() {
            for &v in graph.neighbors(u) {
                assert!(graph.are_adjacent(v, u));
            }
        }
        assert!(!graph.are_adjacent(2, 3));
        Ok(())
    }

    #[test]
    fn test_bad_edges_are_rejected() {
        let mut graph = Graph::new(2);
        assert!(matches!(
            graph.add_edge(0, 2),
            Err(ColoringError::VertexOutOfRange {
                vertex: 2,
                num_vertices: 2
            })
        ));
        assert!(matches!(graph.add_edge(1, 1), Err(ColoringError::SelfLoop { vertex: 1 })));
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_default_cardinality() -> color_eyre::Result<()> {
        let mut graph = Graph::new(2);
        assert_eq!(graph.cardinality(0), DEFAULT_CARDINALITY);
        graph.set_cardinality(1, 8)?;
        assert_eq!(graph.cardinality(1), 8);
        Ok(())
    }

    #[test]
    fn test_zero_cardinality_is_rejected() {
        let mut graph = Graph::new(2);
        assert!(matches!(
            graph.set_cardinality(0, 0),
            Err(ColoringError::ZeroCardinality { vertex: 0 })
        ));
        assert_eq!(graph.cardinality(0), DEFAULT_CARDINALITY);
    }
}
