use snafu::Snafu;

pub type Result<T, E = ColoringError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ColoringError {
    #[snafu(display("Could not read the graph: {}", source))]
    Io { source: std::io::Error },

    #[snafu(display("Missing problem line 'p edge <vertices> <edges>'"))]
    MissingHeader,

    #[snafu(display("Line {}: duplicate problem line", line))]
    DuplicateHeader { line: usize },

    #[snafu(display("Line {}: malformed problem line '{}'", line, text))]
    BadHeader { line: usize, text: String },

    #[snafu(display("Line {}: malformed edge '{}'", line, text))]
    BadEdge { line: usize, text: String },

    #[snafu(display("Line {}: edge before the problem line", line))]
    EdgeBeforeHeader { line: usize },

    #[snafu(display("Line {}: vertex {} is not in 1..={}", line, vertex, num_vertices))]
    BadVertex {
        line: usize,
        vertex: usize,
        num_vertices: usize,
    },

    #[snafu(display("Line {}: self-loop on vertex {}", line, vertex))]
    BadLoop { line: usize, vertex: usize },

    #[snafu(display("Vertex {} is out of range for a graph with {} vertices", vertex, num_vertices))]
    VertexOutOfRange { vertex: usize, num_vertices: usize },

    #[snafu(display("Self-loop on vertex {}", vertex))]
    SelfLoop { vertex: usize },

    #[snafu(display("Vertex {} must have a positive cardinality", vertex))]
    ZeroCardinality { vertex: usize },

    #[snafu(display("Encoding is unsatisfiable even with one color per vertex"))]
    TrivialBoundUnsat,
}
