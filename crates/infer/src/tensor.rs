use cellspace_common::GridConfig;

/// A channel-major snapshot of grid state, shaped for the update model.
///
/// Conceptual shape is [1, C, N, N, N] (single batch, channel varies
/// slowest, voxel index fastest): `data[c * N³ + i]` where `i` is the
/// voxel-major linear index `z*N*N + y*N + x`. Derived at the step boundary
/// and discarded after unpacking; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PackedTensor {
    config: GridConfig,
    data: Vec<f32>,
}

impl PackedTensor {
    /// A zero-filled tensor for the given grid dimensions.
    pub fn zeros(config: GridConfig) -> Self {
        Self {
            config,
            data: vec![0.0; config.buffer_len()],
        }
    }

    /// Wrap an existing channel-major buffer. The caller guarantees the
    /// buffer length matches `config.buffer_len()`.
    pub fn from_data(config: GridConfig, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), config.buffer_len());
        Self { config, data }
    }

    /// Grid dimensions this tensor was packed from.
    pub fn config(&self) -> GridConfig {
        self.config
    }

    /// Conceptual shape [batch, channels, depth, height, width].
    pub fn shape(&self) -> [usize; 5] {
        let n = self.config.size;
        [1, self.config.channels, n, n, n]
    }

    /// The channel-major value at channel `c`, voxel-major index `i`.
    pub fn at(&self, c: usize, i: usize) -> f32 {
        self.data[c * self.config.voxel_count() + i]
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Whether another tensor has the same shape (the contract a backend's
    /// output must satisfy).
    pub fn same_shape(&self, other: &PackedTensor) -> bool {
        self.config == other.config && self.data.len() == other.data.len()
    }
}
