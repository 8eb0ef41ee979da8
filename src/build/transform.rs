//! Conversion between the source and compiled encodings of a build graph.
//!
//! Both directions are pure: they take the graph by value and hand back the
//! transformed graph without any I/O.

use crate::build::BuildGraph;
use crate::util::text::normalize_line_endings;

/// Encode a graph for packaging.
///
/// The assembled graph already is the compiled encoding, so this is the
/// identity for now. Compiled-only normalization belongs here.
pub fn to_compiled(graph: BuildGraph) -> BuildGraph {
    graph
}

/// Encode a graph for editing: every line boundary in every component
/// becomes `\r\n`. Names, kinds, order and references are untouched.
pub fn to_src(mut graph: BuildGraph) -> BuildGraph {
    for component in &mut graph.components {
        component.code = normalize_line_endings(&component.code);
    }
    tracing::debug!(
        "normalized line endings for {} components of `{}`",
        graph.components.len(),
        graph.name
    );
    graph
}
