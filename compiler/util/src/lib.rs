//! Shared utilities for the compiler.

mod info;
pub use info::*;
