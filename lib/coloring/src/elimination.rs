//! Greedy vertex elimination: min-degree and min-fill orders, treewidth bounds,
//! and the triangles used to restrict the transitivity clauses.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use log::{debug, info};

use crate::graph::{Graph, Vertex};
use crate::options::Options;

/// A `[lower, upper]` interval that can only shrink.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds<T> {
    pub lower: T,
    pub upper: T,
}

impl<T> Bounds<T>
where
    T: PartialOrd + Copy + Display,
{
    pub fn new(lower: T, upper: T) -> Self {
        assert!(lower <= upper, "Empty bounds [{}, {}]", lower, upper);
        Self { lower, upper }
    }

    /// Raise the lower bound to `value` if it is larger.
    pub fn raise_lower(&mut self, value: T) {
        if value > self.lower {
            assert!(
                value <= self.upper,
                "Lower bound {} exceeds the upper bound {}",
                value,
                self.upper
            );
            self.lower = value;
        }
    }

    /// Lower the upper bound to `value` if it is smaller.
    pub fn lower_upper(&mut self, value: T) {
        if value < self.upper {
            assert!(
                value >= self.lower,
                "Upper bound {} is below the lower bound {}",
                value,
                self.lower
            );
            self.upper = value;
        }
    }
}

impl<T> Display for Bounds<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Transient bookkeeping of a single elimination pass.
///
/// Ties between equally scored vertices go to the lowest id.
#[derive(Debug)]
pub struct Elimination<'g> {
    graph: &'g Graph,
    processed: Vec<bool>,
    order: Vec<Vertex>,
}

impl<'g> Elimination<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            processed: vec![false; graph.num_vertices()],
            order: Vec::with_capacity(graph.num_vertices()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.order.len() == self.graph.num_vertices()
    }

    /// Elimination order so far.
    pub fn order(&self) -> &[Vertex] {
        &self.order
    }

    pub fn into_order(self) -> Vec<Vertex> {
        self.order
    }

    pub fn unprocessed_neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + Clone + '_ {
        self.graph.neighbors(v).iter().copied().filter(move |&x| !self.processed[x])
    }

    fn unprocessed(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.graph.vertices().filter(move |&v| !self.processed[v])
    }

    /// Pairs of unprocessed neighbors of `v` that are not adjacent.
    fn missing_edges(&self, v: Vertex) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.unprocessed_neighbors(v)
            .tuple_combinations()
            .filter(move |&(x, y)| !self.graph.are_adjacent(x, y))
    }

    /// Unprocessed vertex with the fewest unprocessed neighbors, and that count.
    pub fn min_degree(&self) -> Option<(Vertex, usize)> {
        self.unprocessed()
            .map(|v| (v, self.unprocessed_neighbors(v).count()))
            .min_by_key(|&(_, degree)| degree)
    }

    /// Unprocessed vertex whose elimination needs the fewest fill-in edges, and that count.
    pub fn min_fill(&self) -> Option<(Vertex, usize)> {
        self.unprocessed()
            .map(|v| (v, self.missing_edges(v).count()))
            .min_by_key(|&(_, fill)| fill)
    }

    /// Mark `v` as processed and append it to the order.
    pub fn eliminate(&mut self, v: Vertex) {
        assert!(!self.processed[v], "Vertex {} is already eliminated", v);
        self.processed[v] = true;
        self.order.push(v);
    }

    /// First vertex of the order whose unprocessed neighborhood is a clique.
    pub fn find_simplicial(&self) -> Option<Vertex> {
        self.order
            .iter()
            .copied()
            .find(|&v| self.missing_edges(v).next().is_none())
    }
}

/// Deduplicated vertex triples, each stored sorted.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TriangleSet {
    triangles: BTreeSet<[Vertex; 3]>,
}

impl TriangleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the triangle was already present.
    pub fn insert(&mut self, a: Vertex, b: Vertex, c: Vertex) -> bool {
        let mut t = [a, b, c];
        t.sort_unstable();
        assert!(t[0] < t[1] && t[1] < t[2], "Degenerate triangle {:?}", t);
        self.triangles.insert(t)
    }

    pub fn contains(&self, a: Vertex, b: Vertex, c: Vertex) -> bool {
        let mut t = [a, b, c];
        t.sort_unstable();
        self.triangles.contains(&t)
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.triangles.iter().copied()
    }
}

/// Input graph plus the results of the elimination heuristics.
#[derive(Debug)]
pub struct GraphModel {
    graph: Graph,
    order: Vec<Vertex>,
    treewidth: Bounds<usize>,
    weighted_treewidth: Bounds<f64>,
    triangles: TriangleSet,
}

impl GraphModel {
    pub fn new(graph: Graph, options: &Options) -> Self {
        let n = graph.num_vertices();
        let max_card = graph.vertices().map(|v| graph.cardinality(v)).max().unwrap_or(1);

        // Trivial upper bounds
        let mut treewidth = Bounds::new(0, n);
        let mut weighted_treewidth = Bounds::new(0.0, (n as f64 + 1.0) * f64::from(max_card).log2());

        // Min-degree pass for the lower bounds
        let mut elimination = Elimination::new(&graph);
        while let Some((v, degree)) = elimination.min_degree() {
            let weight = f64::from(graph.cardinality(v)).log2()
                + elimination
                    .unprocessed_neighbors(v)
                    .map(|x| f64::from(graph.cardinality(x)).log2())
                    .sum::<f64>();
            elimination.eliminate(v);
            treewidth.raise_lower(degree);
            weighted_treewidth.raise_lower(weight);
        }
        debug_assert!(elimination.is_complete());
        let mut order = elimination.into_order();
        info!(
            "Treewidth in {}, weighted treewidth in [{:.3}, {:.3}]",
            treewidth, weighted_treewidth.lower, weighted_treewidth.upper
        );

        let mut triangles = TriangleSet::new();
        if options.triangulate {
            order = triangulate(&graph, &mut triangles);
            let num_triples = n * n.saturating_sub(1) * n.saturating_sub(2) / 6;
            info!("Number of triangles: {} out of {} triples", triangles.len(), num_triples);
        }

        Self {
            graph,
            order,
            treewidth,
            weighted_treewidth,
            triangles,
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.num_vertices()
    }

    /// Elimination order: min-fill when triangulated, min-degree otherwise.
    pub fn ordering(&self) -> &[Vertex] {
        &self.order
    }

    pub fn treewidth(&self) -> Bounds<usize> {
        self.treewidth
    }

    pub fn weighted_treewidth(&self) -> Bounds<f64> {
        self.weighted_treewidth
    }

    /// Empty unless triangulation was requested.
    pub fn triangles(&self) -> &TriangleSet {
        &self.triangles
    }
}

/// Min-fill elimination. For each eliminated vertex `v`, every pair `x, y` of its
/// unprocessed neighbors that are not adjacent yields the triangle `{v, x, y}`.
/// The graph itself is left unchanged.
pub fn triangulate(graph: &Graph, triangles: &mut TriangleSet) -> Vec<Vertex> {
    let mut elimination = Elimination::new(graph);
    while let Some((v, fill)) = elimination.min_fill() {
        let missing = elimination.missing_edges(v).collect_vec();
        debug_assert_eq!(missing.len(), fill);
        debug!("Eliminating {} with {} fill-in edges", v, fill);
        elimination.eliminate(v);
        for (x, y) in missing {
            triangles.insert(v, x, y);
        }
    }
    elimination.into_order()
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn path(n: usize) -> Graph {
        Graph::from_edges(n, (1..n).map(|i| (i - 1, i))).unwrap()
    }

    fn cycle(n: usize) -> Graph {
        Graph::from_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
    }

    #[test]
    fn test_min_degree_prefers_lowest_id() {
        let graph = path(4);
        let mut elimination = Elimination::new(&graph);
        assert_eq!(elimination.min_degree(), Some((0, 1)));
        elimination.eliminate(0);
        assert_eq!(elimination.min_degree(), Some((1, 1)));
        elimination.eliminate(1);
        elimination.eliminate(2);
        elimination.eliminate(3);
        assert_eq!(elimination.min_degree(), None);
        assert_eq!(elimination.order(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_min_fill_on_cycle() {
        let graph = cycle(4);
        let elimination = Elimination::new(&graph);
        // Every vertex of C4 has two non-adjacent neighbors.
        assert_eq!(elimination.min_fill(), Some((0, 1)));
    }

    #[test]
    fn test_find_simplicial() {
        let graph = cycle(4);
        let mut elimination = Elimination::new(&graph);
        assert_eq!(elimination.find_simplicial(), None);
        elimination.eliminate(0);
        assert_eq!(elimination.find_simplicial(), None);
        elimination.eliminate(1);
        // Only vertex 3 is left around vertex 0.
        assert_eq!(elimination.find_simplicial(), Some(0));
    }

    #[test]
    fn test_treewidth_bounds() {
        let model = GraphModel::new(cycle(5), &Options::default());
        assert_eq!(model.treewidth(), Bounds { lower: 2, upper: 5 });
        let wtw = model.weighted_treewidth();
        assert!((wtw.lower - 3.0).abs() < 1e-9);
        assert!((wtw.upper - 6.0).abs() < 1e-9);
        assert!(model.triangles().is_empty());
        assert_eq!(model.ordering().len(), 5);
    }

    #[test]
    fn test_empty_graph_is_trivial() {
        let model = GraphModel::new(Graph::new(3), &Options { triangulate: true, ..Options::default() });
        assert_eq!(model.treewidth().lower, 0);
        assert_eq!(model.ordering(), &[0, 1, 2]);
        assert!(model.triangles().is_empty());
    }

    #[test]
    fn test_triangulate_cycle() {
        let graph = cycle(5);
        let mut triangles = TriangleSet::new();
        let order = triangulate(&graph, &mut triangles);
        assert_eq!(order.iter().copied().sorted().collect_vec(), (0..5).collect_vec());
        // Eliminating 0 adds the chord 1-4, but it is not put into the graph,
        // so the following eliminations see fill-in again.
        assert!(triangles.contains(0, 1, 4));
        assert!(!triangles.is_empty());
        assert_eq!(graph.num_edges(), 5);
    }

    #[test]
    fn test_triangle_set_dedup() {
        let mut triangles = TriangleSet::new();
        assert!(triangles.insert(2, 0, 1));
        assert!(!triangles.insert(1, 2, 0));
        assert_eq!(triangles.iter().collect_vec(), vec![[0, 1, 2]]);
    }

    #[test]
    #[should_panic(expected = "exceeds the upper bound")]
    fn test_bounds_do_not_cross() {
        let mut bounds = Bounds::new(0, 2);
        bounds.raise_lower(1);
        bounds.lower_upper(1);
        bounds.raise_lower(3);
    }

    #[test]
    fn test_unit_cardinalities_give_zero_weights() -> color_eyre::Result<()> {
        let mut graph = Graph::from_edges(3, [(0, 1), (1, 2)])?;
        for v in 0..3 {
            graph.set_cardinality(v, 1)?;
        }
        assert!(graph.set_cardinality(2, 0).is_err());
        let model = GraphModel::new(graph, &Options::default());
        assert_eq!(model.weighted_treewidth().lower, 0.0);
        assert_eq!(model.weighted_treewidth().upper, 0.0);
        assert_eq!(model.treewidth().lower, 1);
        Ok(())
    }

    #[quickcheck]
    fn prop_elimination_orders_are_permutations(edges: Vec<(u8, u8)>) -> bool {
        let n = 12;
        let mut graph = Graph::new(n);
        for (u, v) in edges {
            let (u, v) = (u as usize % n, v as usize % n);
            if u != v {
                graph.add_edge(u, v).unwrap();
            }
        }
        let model = GraphModel::new(graph, &Options { triangulate: true, ..Options::default() });
        let order = model.ordering().iter().copied().sorted().collect_vec();
        order == (0..n).collect_vec()
            && model.treewidth().lower < n
            && model.triangles().iter().all(|[a, b, c]| a < b && b < c)
    }
}
