//! Shared types for the cellspace voxel automaton.
//!
//! # Invariants
//! - Channel layout is fixed: 0..=2 color, 3 alpha/alive, 3.. latent.
//! - A `GridConfig` that constructs successfully is valid everywhere else;
//!   downstream crates never re-validate.

pub mod types;

pub use types::{
    ALIVE_THRESHOLD, CH_ALPHA, CH_B, CH_G, CH_R, ConfigError, GridConfig, LATENT_START, PickRay,
    VoxelCoord,
};
