//! vba-blocks - a package manager for VBA projects
//!
//! This crate provides the manifest model (parsing and validating
//! `vba-block.toml`) and the build graph with its source/compiled
//! transforms.

pub mod build;
pub mod core;
pub mod ops;
pub mod util;

pub use build::{to_compiled, to_src, BuildGraph, Component, ComponentKind};
pub use core::{
    load_manifest, parse_manifest, Dependency, DependencyKind, ManifestError, Manifest,
    Reference, SourceEntry, Target, TargetType,
};
pub use util::context::GlobalContext;
