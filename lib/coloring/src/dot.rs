//! Graphviz output.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::decoder::Coloring;
use crate::graph::Graph;

/// X11 color names used for the first color classes.
pub const PALETTE: [&str; 28] = [
    "red",
    "blue",
    "green",
    "purple",
    "orange",
    "yellow",
    "salmon",
    "paleturquoise",
    "lightsteelblue",
    "palegreen",
    "palegoldenrod",
    "aliceblue",
    "crimson",
    "darksalmon",
    "pink",
    "deeppink",
    "gold",
    "firebrick",
    "dimgrey",
    "darkorange",
    "cyan",
    "beige",
    "darkgreen",
    "orchid",
    "turquoise",
    "tomato",
    "tan",
    "royalblue",
];

/// Fill color of the class `color`: a palette name, or a quoted HSV triple past the palette.
pub fn fill_color(color: usize) -> Cow<'static, str> {
    match PALETTE.get(color) {
        Some(&name) => Cow::Borrowed(name),
        None => {
            let hue = (color as f64 * 0.618_033_988_749_895).fract();
            Cow::Owned(format!("\"{:.3} 0.700 0.900\"", hue))
        }
    }
}

fn write_edges<W>(w: &mut W, graph: &Graph) -> io::Result<()>
where
    W: Write,
{
    for edge in graph.edges() {
        writeln!(w, "{} -- {};", edge.a() + 1, edge.b() + 1)?;
    }
    Ok(())
}

/// Plain graph, vertices numbered from 1.
pub fn write_graph_dot<W>(mut w: W, graph: &Graph) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "graph g {{")?;
    write_edges(&mut w, graph)?;
    writeln!(w, "}}")
}

/// Graph with every vertex filled with the color of its class.
pub fn write_coloring_dot<W>(mut w: W, graph: &Graph, coloring: &Coloring) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "graph g {{")?;
    for (v, &color) in coloring.colors().iter().enumerate() {
        writeln!(w, "{} [style=filled, fillcolor={}];", v + 1, fill_color(color))?;
    }
    write_edges(&mut w, graph)?;
    writeln!(w, "}}")
}
