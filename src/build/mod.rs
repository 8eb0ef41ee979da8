//! Build graph - the components a package is built from.
//!
//! A [`BuildGraph`] is assembled per build from the files a manifest lists
//! and moved between its source and compiled encodings by [`transform`].

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

pub mod transform;

pub use transform::{to_compiled, to_src};

/// The kind of VBA component, from its exported file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// Standard module (.bas)
    Module,
    /// Class module (.cls)
    Class,
    /// UserForm (.frm)
    Form,
    /// Anything else, e.g. document modules (ThisWorkbook, Sheet1)
    Document,
}

impl ComponentKind {
    /// Classify by file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bas" => ComponentKind::Module,
            "cls" => ComponentKind::Class,
            "frm" => ComponentKind::Form,
            _ => ComponentKind::Document,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentKind::Module => write!(f, "module"),
            ComponentKind::Class => write!(f, "class"),
            ComponentKind::Form => write!(f, "form"),
            ComponentKind::Document => write!(f, "document"),
        }
    }
}

/// A single named unit of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub name: String,
    pub code: String,
}

impl Component {
    pub fn new(kind: ComponentKind, name: impl Into<String>, code: impl Into<String>) -> Self {
        Component {
            kind,
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Named, ordered collection of components plus the references they need.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BuildGraph {
    pub name: String,

    /// Components in insertion order
    pub components: Vec<Component>,

    /// Names of the type-library references the components use
    pub references: BTreeSet<String>,
}

impl BuildGraph {
    pub fn new(name: impl Into<String>) -> Self {
        BuildGraph {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append a component, keeping insertion order.
    pub fn add_component(&mut self, component: Component) {
        self.components.push(component);
    }

    /// Get a component by name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_kind_from_extension() {
        assert_eq!(ComponentKind::from_extension("bas"), ComponentKind::Module);
        assert_eq!(ComponentKind::from_extension("CLS"), ComponentKind::Class);
        assert_eq!(ComponentKind::from_extension("frm"), ComponentKind::Form);
        assert_eq!(ComponentKind::from_extension("doccls"), ComponentKind::Document);
    }

    #[test]
    fn test_components_keep_insertion_order() {
        let mut graph = BuildGraph::new("book");
        graph.add_component(Component::new(ComponentKind::Module, "Zeta", ""));
        graph.add_component(Component::new(ComponentKind::Class, "Alpha", ""));

        let names: Vec<_> = graph.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(graph.component("Alpha").unwrap().kind, ComponentKind::Class);
    }
}
