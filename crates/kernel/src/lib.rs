//! Automaton kernel: authoritative voxel grid state, the tensor boundary
//! mapping, mutation operators, and step orchestration.
//!
//! # Invariants
//! - The grid buffer is always exactly N³·C long; operators write whole
//!   channel slices or documented subranges, never torn subsets.
//! - Voxel-major, channel-minor ordering with z-major voxel indexing; the
//!   pack/unpack mapping depends on it.
//! - The `Automaton` owns the grid exclusively; renderers and tools read
//!   through it, mutation flows through explicit operations.

pub mod engine;
pub mod grid;
pub mod mutate;
pub mod pack;

pub use engine::{Automaton, StepError};
pub use grid::VoxelGrid;
pub use mutate::{DEFAULT_DAMAGE_RADIUS, MutationRequest, damage_ray, damage_sphere, grow};
pub use pack::{UnpackError, pack, unpack};
