//! Ray-voxel resolution: maps pointer-driven rays and hit points in the
//! automaton's rotated physical frame to integer lattice coordinates.
//!
//! # Invariants
//! - A miss is `None`, never an error; callers treat it as "do nothing".
//! - Resolvers never touch grid state; they only produce coordinates for
//!   the mutation operators.

mod layer;
mod resolver;

pub use layer::LayerCursor;
pub use resolver::{GridFrame, LayerAxis, resolve_hit_point, resolve_layer_march};
