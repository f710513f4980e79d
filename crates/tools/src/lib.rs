//! Developer tooling: read-only queries against the automaton for
//! debugging, CLI output, and development UI.
//!
//! # Invariants
//! - Inspection never mutates the engine or grid.

pub mod inspector;

pub use inspector::{GridInspector, RunSummary};
