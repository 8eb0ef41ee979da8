//! Core data structures.
//!
//! This module contains the validated manifest model:
//! - Manifest and package metadata
//! - Sources, dependencies, references and the build target
//! - Manifest errors

pub mod dependency;
pub mod errors;
pub mod manifest;
pub(crate) mod raw;
pub mod reference;
pub mod source;
pub mod target;

pub use dependency::{Dependency, DependencyKind, GitReference};
pub use errors::{DocumentError, ManifestError, ValidationError};
pub use manifest::{load_manifest, parse_manifest, parse_manifest_with, Manifest, MANIFEST_NAME};
pub use reference::{Reference, ReferenceVersion};
pub use source::SourceEntry;
pub use target::{Target, TargetType};
