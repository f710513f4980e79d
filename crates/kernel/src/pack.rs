use crate::grid::VoxelGrid;
use cellspace_infer::PackedTensor;

/// Errors from unpacking a model output over the grid.
#[derive(Debug, thiserror::Error)]
pub enum UnpackError {
    #[error("tensor shape {got:?} does not match grid shape {expected:?}")]
    ShapeMismatch {
        expected: [usize; 5],
        got: [usize; 5],
    },
}

/// Pack the voxel-major grid into the channel-major tensor the model
/// expects: `tensor[c*N³ + i] = grid[i*C + c]` for every voxel index `i`
/// and channel `c`.
pub fn pack(grid: &VoxelGrid) -> PackedTensor {
    let voxels = grid.config().voxel_count();
    let channels = grid.channels();
    let mut tensor = PackedTensor::zeros(grid.config());
    let cells = grid.cells();
    let out = tensor.data_mut();
    for i in 0..voxels {
        for c in 0..channels {
            out[c * voxels + i] = cells[i * channels + c];
        }
    }
    tensor
}

/// Unpack a channel-major tensor back over the grid, overwriting every
/// channel of every voxel. Fails (leaving the grid untouched) if the
/// tensor's shape does not match the grid's.
pub fn unpack(tensor: &PackedTensor, grid: &mut VoxelGrid) -> Result<(), UnpackError> {
    if tensor.config() != grid.config() {
        return Err(UnpackError::ShapeMismatch {
            expected: {
                let n = grid.size();
                [1, grid.channels(), n, n, n]
            },
            got: tensor.shape(),
        });
    }
    let voxels = grid.config().voxel_count();
    let channels = grid.channels();
    let data = tensor.data();
    let cells = grid.cells_mut();
    for i in 0..voxels {
        for c in 0..channels {
            cells[i * channels + c] = data[c * voxels + i];
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellspace_common::GridConfig;

    fn patterned_grid(cfg: GridConfig) -> VoxelGrid {
        let mut grid = VoxelGrid::empty(cfg);
        for (i, v) in grid.cells_mut().iter_mut().enumerate() {
            *v = (i % 97) as f32 * 0.013;
        }
        grid
    }

    #[test]
    fn pack_transposes_to_channel_major() {
        let cfg = GridConfig::new(2, 4).unwrap();
        let mut grid = VoxelGrid::empty(cfg);
        // voxel 3, channel 2
        grid.cells_mut()[3 * 4 + 2] = 0.75;
        let tensor = pack(&grid);
        assert_eq!(tensor.at(2, 3), 0.75);
        assert_eq!(tensor.at(2, 2), 0.0);
    }

    #[test]
    fn pack_unpack_round_trips() {
        let grid = patterned_grid(GridConfig::default());
        let tensor = pack(&grid);
        let mut back = VoxelGrid::empty(grid.config());
        unpack(&tensor, &mut back).unwrap();
        assert_eq!(back.cells(), grid.cells());
    }

    #[test]
    fn round_trip_on_nonreference_dimensions() {
        let grid = patterned_grid(GridConfig::new(5, 7).unwrap());
        let tensor = pack(&grid);
        let mut back = VoxelGrid::empty(grid.config());
        unpack(&tensor, &mut back).unwrap();
        assert_eq!(back.cells(), grid.cells());
    }

    #[test]
    fn unpack_rejects_shape_mismatch() {
        let small = pack(&VoxelGrid::empty(GridConfig::new(8, 16).unwrap()));
        let mut grid = VoxelGrid::seeded(GridConfig::default());
        let before = grid.state_hash();
        assert!(matches!(
            unpack(&small, &mut grid),
            Err(UnpackError::ShapeMismatch { .. })
        ));
        assert_eq!(grid.state_hash(), before);
    }
}
