//! Common types, traits, and error definitions for pathbench
//!
//! This module provides the foundational building blocks shared by
//! every environment and planner in this crate.

pub mod error;
pub mod traits;
pub mod types;

pub use error::*;
pub use traits::*;
pub use types::*;
