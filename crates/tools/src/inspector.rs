use cellspace_common::{ALIVE_THRESHOLD, CH_ALPHA, VoxelCoord};
use cellspace_kernel::Automaton;
use serde::{Deserialize, Serialize};

/// Read-only queries against an automaton.
pub struct GridInspector;

impl GridInspector {
    /// Summarize the run and grid state.
    pub fn summary(engine: &Automaton) -> RunSummary {
        let grid = engine.grid();
        let n = grid.size() as i32;
        let mut alive = 0usize;
        let mut alpha_sum = 0.0f64;
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    if let Some(a) = grid.alpha(VoxelCoord::new(x, y, z)) {
                        alpha_sum += a as f64;
                        if a > ALIVE_THRESHOLD {
                            alive += 1;
                        }
                    }
                }
            }
        }

        RunSummary {
            size: grid.size(),
            channels: grid.channels(),
            steps: engine.steps(),
            frames: engine.frames(),
            playing: engine.is_playing(),
            backend_attached: engine.backend_attached(),
            alive_voxels: alive,
            mean_alpha: (alpha_sum / grid.config().voxel_count() as f64) as f32,
        }
    }

    /// The alpha channel of one voxel, if in bounds.
    pub fn alpha_at(engine: &Automaton, coord: VoxelCoord) -> Option<f32> {
        engine.grid().voxel(coord).map(|v| v[CH_ALPHA])
    }
}

/// Snapshot of run state for logs and machine-readable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub size: usize,
    pub channels: usize,
    pub steps: u64,
    pub frames: u64,
    pub playing: bool,
    pub backend_attached: bool,
    pub alive_voxels: usize,
    pub mean_alpha: f32,
}

impl RunSummary {
    /// Serialize for `--json` style consumers.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "grid {0}x{0}x{0}/{1}ch steps={2} frames={3} playing={4} backend={5} alive={6} mean_alpha={7:.4}",
            self.size,
            self.channels,
            self.steps,
            self.frames,
            self.playing,
            self.backend_attached,
            self.alive_voxels,
            self.mean_alpha,
        )
    }
}
