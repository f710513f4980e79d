//! Render-side derivations over the automaton's grid.
//!
//! # Invariants
//! - Nothing here mutates grid truth; every output is a fresh derivation.
//! - The alive mask is recomputed per frame from a full snapshot, never
//!   cached across steps.

mod mask;
mod renderer;

pub use mask::alive_mask;
pub use renderer::{
    ALPHA_CUTOFF, DebugTextRenderer, RenderView, Renderer, VoxelInstance, extract_instances,
};
