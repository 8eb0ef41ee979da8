//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;
pub mod paths;
pub mod text;

pub use config::Config;
pub use context::GlobalContext;
pub use diagnostic::Diagnostic;
pub use paths::{LexicalResolver, PathResolver};
