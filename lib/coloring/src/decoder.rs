use std::fmt::{Display, Formatter};

use itertools::Itertools;

use chromatic_core::model::Model;

use crate::encoding::ColoringEncoding;
use crate::graph::{Edge, Graph, Vertex};

/// Assignment of a color `0..num_colors` to every vertex.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Coloring {
    colors: Vec<usize>,
    num_colors: usize,
}

impl Coloring {
    /// Colors must be dense: every color below the maximum is used.
    pub fn from_colors(colors: Vec<usize>) -> Self {
        let num_colors = colors.iter().max().map_or(0, |&c| c + 1);
        debug_assert!((0..num_colors).all(|c| colors.contains(&c)));
        Self { colors, num_colors }
    }

    pub fn num_vertices(&self) -> usize {
        self.colors.len()
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn color(&self, v: Vertex) -> usize {
        self.colors[v]
    }

    pub fn colors(&self) -> &[usize] {
        &self.colors
    }

    /// Color classes, each sorted by vertex id.
    pub fn classes(&self) -> Vec<Vec<Vertex>> {
        let mut classes = vec![Vec::new(); self.num_colors];
        for (v, &c) in self.colors.iter().enumerate() {
            classes[c].push(v);
        }
        classes
    }

    /// Edges whose endpoints share a color.
    pub fn conflicts<'a>(&'a self, graph: &'a Graph) -> impl Iterator<Item = Edge> + 'a {
        graph
            .edges()
            .iter()
            .copied()
            .filter(move |e| self.colors[e.a()] == self.colors[e.b()])
    }

    pub fn is_proper(&self, graph: &Graph) -> bool {
        self.colors.len() == graph.num_vertices() && self.conflicts(graph).next().is_none()
    }
}

impl Display for Coloring {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let classes = self.classes();
        write!(f, "{} colors: ", self.num_colors)?;
        write!(f, "{}", classes.iter().map(|class| format!("{{{}}}", class.iter().join(", "))).join(" "))
    }
}

fn same_color(model: &Model, encoding: &ColoringEncoding, u: Vertex, v: Vertex) -> bool {
    !model.get(encoding.s(u, v))
}

/// Greedy reading of a model: each vertex not yet folded into an earlier class
/// opens a new color and absorbs every later vertex it shares a color with.
pub fn decode(model: &Model, encoding: &ColoringEncoding) -> Coloring {
    let n = encoding.num_vertices();
    let mut colors: Vec<Option<usize>> = vec![None; n];
    let mut num_colors = 0;

    for i in 0..n {
        if colors[i].is_some() {
            continue;
        }
        let color = num_colors;
        num_colors += 1;
        colors[i] = Some(color);
        for j in (i + 1)..n {
            if colors[j].is_none() && same_color(model, encoding, i, j) {
                colors[j] = Some(color);
            }
        }
    }

    let colors = colors.into_iter().map(|c| c.unwrap_or_default()).collect();
    Coloring { colors, num_colors }
}

/// Transitivity violated by a model: `x ~ y` and `y ~ z`, but not `x ~ z`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Violation {
    pub x: Vertex,
    pub y: Vertex,
    pub z: Vertex,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {} ~ {} but {} !~ {}", self.x, self.y, self.z, self.x, self.z)
    }
}

/// Check a decoded coloring against the model it came from.
///
/// Returns `None` iff the coloring is proper and every class opener `k` has `n(k)` set,
/// so that the coloring respects the cardinality bound the model satisfies.
/// Only encodings with a reduced set of transitivity clauses can produce a violation.
pub fn find_violation(
    model: &Model,
    encoding: &ColoringEncoding,
    coloring: &Coloring,
    graph: &Graph,
) -> Option<Violation> {
    let classes = coloring.classes();
    let root = |v: Vertex| classes[coloring.color(v)][0];

    // Both endpoints were absorbed by the same opener.
    if let Some(edge) = coloring.conflicts(graph).next() {
        let r = root(edge.a());
        debug_assert!(r != edge.a() && r != edge.b());
        return Some(Violation {
            x: edge.a(),
            y: r,
            z: edge.b(),
        });
    }

    // An opener whose n(k) is unset shares a color with some earlier absorbed vertex.
    for class in classes.iter() {
        let k = class[0];
        if k == 0 || model.get(encoding.n(k)) {
            continue;
        }
        if let Some(i) = (0..k).find(|&i| same_color(model, encoding, i, k)) {
            return Some(Violation { x: root(i), y: i, z: k });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use chromatic_core::solver::mock::MockSolver;

    use super::*;
    use crate::elimination::GraphModel;
    use crate::options::Options;

    /// Model where only the `same` pairs share a color and only the `openers` have `n` set.
    fn model_with(encoding: &ColoringEncoding, same: &[(Vertex, Vertex)], openers: &[Vertex]) -> Model {
        let n = encoding.num_vertices();
        let num_vars = n + n * (n - 1) / 2;
        let mut values = vec![true; num_vars];
        for k in 0..n {
            values[encoding.n(k).var() as usize - 1] = openers.contains(&k);
        }
        for &(u, v) in same {
            values[encoding.s(u, v).var() as usize - 1] = false;
        }
        Model::new(values)
    }

    fn setup(graph: Graph) -> (GraphModel, ColoringEncoding) {
        let model = GraphModel::new(graph, &Options::default());
        let mut solver = MockSolver::new();
        let encoding = ColoringEncoding::new(&mut solver, &model);
        (model, encoding)
    }

    #[test]
    fn test_decode_folds_into_first_class() {
        let (graph_model, encoding) = setup(Graph::from_edges(4, [(0, 1), (1, 2)]).unwrap());
        let model = model_with(&encoding, &[(0, 2), (1, 3)], &[0, 1]);
        let coloring = decode(&model, &encoding);
        assert_eq!(coloring.colors(), &[0, 1, 0, 1]);
        assert_eq!(coloring.num_colors(), 2);
        assert_eq!(coloring.classes(), vec![vec![0, 2], vec![1, 3]]);
        assert!(coloring.is_proper(graph_model.graph()));
        assert_eq!(find_violation(&model, &encoding, &coloring, graph_model.graph()), None);
        assert_eq!(format!("{}", coloring), "2 colors: {0, 2} {1, 3}");
    }

    #[test]
    fn test_all_different() {
        let (_, encoding) = setup(Graph::new(3));
        let model = model_with(&encoding, &[], &[0, 1, 2]);
        let coloring = decode(&model, &encoding);
        assert_eq!(coloring.num_colors(), 3);
    }

    #[test]
    fn test_edge_conflict_is_refuted_through_root() {
        let (graph_model, encoding) = setup(Graph::from_edges(3, [(1, 2)]).unwrap());
        // 0 ~ 1 and 0 ~ 2, but 1 and 2 are adjacent
        let model = model_with(&encoding, &[(0, 1), (0, 2)], &[0]);
        let coloring = decode(&model, &encoding);
        assert_eq!(coloring.num_colors(), 1);
        assert!(!coloring.is_proper(graph_model.graph()));
        assert_eq!(
            find_violation(&model, &encoding, &coloring, graph_model.graph()),
            Some(Violation { x: 1, y: 0, z: 2 })
        );
    }

    #[test]
    fn test_uncounted_opener_is_refuted() {
        let (graph_model, encoding) = setup(Graph::new(3));
        // 0 ~ 1 and 1 ~ 2, but 0 !~ 2: vertex 2 opens a class without n(2)
        let model = model_with(&encoding, &[(0, 1), (1, 2)], &[0]);
        let coloring = decode(&model, &encoding);
        assert_eq!(coloring.colors(), &[0, 0, 1]);
        assert_eq!(
            find_violation(&model, &encoding, &coloring, graph_model.graph()),
            Some(Violation { x: 0, y: 1, z: 2 })
        );
    }

    #[test]
    fn test_from_colors() {
        let coloring = Coloring::from_colors(vec![1, 0, 1]);
        assert_eq!(coloring.num_colors(), 2);
        assert_eq!(Coloring::from_colors(vec![]).num_colors(), 0);
    }
}
