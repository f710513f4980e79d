use cellspace_common::{CH_ALPHA, GridConfig, LATENT_START, VoxelCoord};

/// The dense voxel channel buffer: one flat `Vec<f32>` of length N³·C,
/// voxel-major, channel-minor (channel index varies fastest).
///
/// No logic beyond indexing lives here. Bounds are the caller's duty:
/// `index` is valid only for coordinates in [0, N) on every axis (asserted
/// in debug builds); callers that cannot guarantee that use the checked
/// `voxel`/`voxel_mut`/`alpha` accessors instead.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    config: GridConfig,
    cells: Vec<f32>,
}

impl VoxelGrid {
    /// An all-zero grid.
    pub fn empty(config: GridConfig) -> Self {
        Self {
            config,
            cells: vec![0.0; config.buffer_len()],
        }
    }

    /// The seed state: every channel zero except the center voxel's latent
    /// channels [3..C), which are 1.0.
    pub fn seeded(config: GridConfig) -> Self {
        let mut grid = Self::empty(config);
        grid.plant_seed();
        grid
    }

    /// Restore the seed state in place.
    pub fn reset(&mut self) {
        self.cells.fill(0.0);
        self.plant_seed();
    }

    fn plant_seed(&mut self) {
        let center = self.config.center();
        let channels = self.config.channels;
        let base = self.index(center.z as usize, center.y as usize, center.x as usize);
        for c in LATENT_START..channels {
            self.cells[base + c] = 1.0;
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Edge length N.
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Channels per voxel C.
    pub fn channels(&self) -> usize {
        self.config.channels
    }

    /// Linear offset of voxel (z, y, x)'s channel slice: `C * (z*N*N + y*N + x)`.
    ///
    /// z-major, then y, then x. The pack/unpack mapping and every operator
    /// in this crate depend on this ordering.
    #[inline]
    pub fn index(&self, z: usize, y: usize, x: usize) -> usize {
        let n = self.config.size;
        debug_assert!(z < n && y < n && x < n, "voxel ({z}, {y}, {x}) out of bounds");
        self.config.channels * (z * n * n + y * n + x)
    }

    /// The full channel slice of a voxel, or `None` if out of bounds.
    pub fn voxel(&self, coord: VoxelCoord) -> Option<&[f32]> {
        if !coord.in_bounds(self.config.size) {
            return None;
        }
        let base = self.index(coord.z as usize, coord.y as usize, coord.x as usize);
        Some(&self.cells[base..base + self.config.channels])
    }

    /// Mutable variant of [`voxel`](Self::voxel).
    pub fn voxel_mut(&mut self, coord: VoxelCoord) -> Option<&mut [f32]> {
        if !coord.in_bounds(self.config.size) {
            return None;
        }
        let base = self.index(coord.z as usize, coord.y as usize, coord.x as usize);
        let channels = self.config.channels;
        Some(&mut self.cells[base..base + channels])
    }

    /// The alpha/alive channel of a voxel, or `None` if out of bounds.
    pub fn alpha(&self, coord: VoxelCoord) -> Option<f32> {
        self.voxel(coord).map(|v| v[CH_ALPHA])
    }

    /// The whole flat buffer, voxel-major.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Deterministic FNV-1a hash over the buffer's bit patterns. Lets tests
    /// assert byte-identity without cloning the whole grid.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for v in &self.cells {
            for b in v.to_bits().to_le_bytes() {
                h ^= b as u64;
                h = h.wrapping_mul(0x0100_0000_01b3);
            }
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_sets_exactly_one_voxel() {
        let grid = VoxelGrid::seeded(GridConfig::default());
        let n = grid.size() as i32;
        let center = grid.config().center();
        let mut nonzero_voxels = 0;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let coord = VoxelCoord::new(x, y, z);
                    let v = grid.voxel(coord).unwrap();
                    if v.iter().any(|&c| c != 0.0) {
                        nonzero_voxels += 1;
                        assert_eq!(coord, center);
                        // colors zero, latent channels one
                        assert_eq!(&v[..LATENT_START], &[0.0, 0.0, 0.0]);
                        assert!(v[LATENT_START..].iter().all(|&c| c == 1.0));
                    }
                }
            }
        }
        assert_eq!(nonzero_voxels, 1);
    }

    #[test]
    fn index_is_z_major() {
        let grid = VoxelGrid::empty(GridConfig::default());
        assert_eq!(grid.index(0, 0, 0), 0);
        assert_eq!(grid.index(0, 0, 1), 16);
        assert_eq!(grid.index(0, 1, 0), 16 * 16);
        assert_eq!(grid.index(1, 0, 0), 16 * 16 * 16);
    }

    #[test]
    fn index_is_bijective_and_in_range() {
        let cfg = GridConfig::new(8, 4).unwrap();
        let grid = VoxelGrid::empty(cfg);
        let mut seen = std::collections::HashSet::new();
        for z in 0..8 {
            for y in 0..8 {
                for x in 0..8 {
                    let idx = grid.index(z, y, x);
                    assert!(idx < cfg.buffer_len());
                    assert!(seen.insert(idx), "duplicate index for ({z},{y},{x})");
                }
            }
        }
        assert_eq!(seen.len(), cfg.voxel_count());
    }

    #[test]
    fn checked_accessors_reject_out_of_bounds() {
        let mut grid = VoxelGrid::empty(GridConfig::default());
        assert!(grid.voxel(VoxelCoord::new(-1, 0, 0)).is_none());
        assert!(grid.voxel_mut(VoxelCoord::new(0, 16, 0)).is_none());
        assert!(grid.alpha(VoxelCoord::new(0, 0, 16)).is_none());
        assert!(grid.voxel(VoxelCoord::new(15, 15, 15)).is_some());
    }

    #[test]
    fn reset_restores_seed() {
        let mut grid = VoxelGrid::seeded(GridConfig::default());
        let pristine = grid.state_hash();
        grid.cells_mut()[0] = 0.9;
        grid.cells_mut()[100] = 0.4;
        assert_ne!(grid.state_hash(), pristine);
        grid.reset();
        assert_eq!(grid.state_hash(), pristine);
    }

    #[test]
    fn state_hash_detects_single_cell_change() {
        let a = VoxelGrid::seeded(GridConfig::default());
        let mut b = a.clone();
        let last = b.cells().len() - 1;
        b.cells_mut()[last] = 1.0e-7;
        assert_ne!(a.state_hash(), b.state_hash());
    }
}
