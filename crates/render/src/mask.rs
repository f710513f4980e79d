use cellspace_common::{ALIVE_THRESHOLD, CH_ALPHA, VoxelCoord};
use cellspace_kernel::VoxelGrid;

/// Derive a render-ready copy of the grid with isolated low-alpha noise
/// suppressed.
///
/// A voxel keeps its full channel vector iff at least one voxel in its
/// 3×3×3 neighborhood (itself included) has alpha strictly above the alive
/// threshold; everything else is zeroed. A 3D binary dilation over the
/// alive channel: dead voxels adjacent to living material survive, so
/// surfaces keep their rims, while isolated specks vanish. Neighbors
/// outside the grid are skipped, counting as dead.
pub fn alive_mask(grid: &VoxelGrid) -> VoxelGrid {
    let n = grid.size() as i32;
    let channels = grid.channels();
    let mut masked = VoxelGrid::empty(grid.config());

    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                if !has_alive_neighbor(grid, x, y, z) {
                    continue;
                }
                let base = grid.index(z as usize, y as usize, x as usize);
                masked.cells_mut()[base..base + channels]
                    .copy_from_slice(&grid.cells()[base..base + channels]);
            }
        }
    }

    masked
}

fn has_alive_neighbor(grid: &VoxelGrid, x: i32, y: i32, z: i32) -> bool {
    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let coord = VoxelCoord::new(x + dx, y + dy, z + dz);
                match grid.voxel(coord) {
                    Some(v) if v[CH_ALPHA] > ALIVE_THRESHOLD => return true,
                    _ => {}
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellspace_common::GridConfig;

    fn grid_with_alpha(at: VoxelCoord, alpha: f32) -> VoxelGrid {
        let mut grid = VoxelGrid::empty(GridConfig::default());
        let voxel = grid.voxel_mut(at).unwrap();
        voxel[CH_ALPHA] = alpha;
        voxel[0] = 0.9; // some color to verify full-vector retention
        grid
    }

    #[test]
    fn lone_alive_voxel_and_shell_survive() {
        let center = VoxelCoord::new(8, 8, 8);
        let grid = grid_with_alpha(center, 0.8);
        let masked = alive_mask(&grid);

        // the voxel itself keeps its whole channel vector
        assert_eq!(masked.voxel(center).unwrap(), grid.voxel(center).unwrap());
        // immediate neighbors are retained (all-zero here, but not masked out:
        // their channel vectors are copied verbatim)
        for dz in -1..=1i32 {
            for dy in -1..=1i32 {
                for dx in -1..=1i32 {
                    let coord = VoxelCoord::new(8 + dx, 8 + dy, 8 + dz);
                    assert_eq!(masked.voxel(coord).unwrap(), grid.voxel(coord).unwrap());
                }
            }
        }
    }

    #[test]
    fn voxels_two_cells_away_are_zeroed() {
        let mut grid = grid_with_alpha(VoxelCoord::new(8, 8, 8), 0.8);
        // stamp color on a voxel two cells out with sub-threshold alpha
        let far = VoxelCoord::new(10, 8, 8);
        grid.voxel_mut(far).unwrap()[0] = 0.7;
        grid.voxel_mut(far).unwrap()[CH_ALPHA] = 0.04;

        let masked = alive_mask(&grid);
        assert!(masked.voxel(far).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn threshold_is_strictly_greater() {
        let center = VoxelCoord::new(8, 8, 8);
        let grid = grid_with_alpha(center, ALIVE_THRESHOLD);
        let masked = alive_mask(&grid);
        // alpha exactly at the threshold does not count as alive
        assert!(masked.voxel(center).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn corner_voxel_mask_skips_out_of_bounds_neighbors() {
        let corner = VoxelCoord::new(0, 0, 0);
        let grid = grid_with_alpha(corner, 0.9);
        let masked = alive_mask(&grid);
        assert_eq!(masked.voxel(corner).unwrap(), grid.voxel(corner).unwrap());
        assert!(
            masked
                .voxel(VoxelCoord::new(2, 0, 0))
                .unwrap()
                .iter()
                .all(|&v| v == 0.0)
        );
    }

    #[test]
    fn empty_grid_masks_to_empty() {
        let grid = VoxelGrid::empty(GridConfig::default());
        let masked = alive_mask(&grid);
        assert!(masked.cells().iter().all(|&v| v == 0.0));
    }
}
