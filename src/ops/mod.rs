//! High-level operations.
//!
//! This module contains the implementation of vba-blocks commands.

pub mod assemble;
pub mod vba_new;

pub use assemble::{assemble, write_components};
pub use vba_new::{init_project, NewOptions};
