use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Channel index of the red color component.
pub const CH_R: usize = 0;
/// Channel index of the green color component.
pub const CH_G: usize = 1;
/// Channel index of the blue color component.
pub const CH_B: usize = 2;
/// Channel index of the alpha/alive scalar.
pub const CH_ALPHA: usize = 3;
/// First channel of the latent state consumed by the update model.
/// Alpha is part of the latent range: the model reads and writes it.
pub const LATENT_START: usize = 3;

/// A voxel counts as alive when its alpha channel exceeds this.
pub const ALIVE_THRESHOLD: f32 = 0.05;

/// Errors from grid configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size must be nonzero")]
    ZeroSize,
    #[error("need at least 4 channels (rgb + alpha), got {0}")]
    ChannelsTooFew(usize),
}

/// Dimensions of the voxel lattice: a cube of edge `size`, each voxel
/// holding `channels` scalars.
///
/// The reference configuration is 16×16×16 with 16 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub size: usize,
    pub channels: usize,
}

impl GridConfig {
    /// Create a validated configuration.
    pub fn new(size: usize, channels: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::ZeroSize);
        }
        if channels < 4 {
            return Err(ConfigError::ChannelsTooFew(channels));
        }
        Ok(Self { size, channels })
    }

    /// Number of voxels in the lattice.
    pub fn voxel_count(&self) -> usize {
        self.size * self.size * self.size
    }

    /// Length of the flat state buffer (voxels × channels).
    pub fn buffer_len(&self) -> usize {
        self.voxel_count() * self.channels
    }

    /// The grid's geometric center, where the seed voxel lives.
    pub fn center(&self) -> VoxelCoord {
        let mid = (self.size / 2) as i32;
        VoxelCoord::new(mid, mid, mid)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 16,
            channels: 16,
        }
    }
}

/// An integer lattice coordinate. Signed so that out-of-bounds targets
/// (e.g. a grow request just outside the cube) are representable; bounds
/// are the consumer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether all three axes lie in [0, size).
    pub fn in_bounds(&self, size: usize) -> bool {
        let n = size as i32;
        self.x >= 0 && self.x < n && self.y >= 0 && self.y < n && self.z >= 0 && self.z < n
    }

    /// Clamp each axis independently into [0, size-1].
    pub fn clamped(&self, size: usize) -> Self {
        let max = size as i32 - 1;
        Self {
            x: self.x.clamp(0, max),
            y: self.y.clamp(0, max),
            z: self.z.clamp(0, max),
        }
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A pick ray in the automaton's rotated local frame: what the external
/// renderer hands us when the pointer is over the cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickRay {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl PickRay {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}
