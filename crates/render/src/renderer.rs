use cellspace_common::{CH_ALPHA, CH_B, CH_G, CH_R, VoxelCoord};
use cellspace_kernel::VoxelGrid;
use glam::Vec3;

/// Minimum alpha for a voxel to be drawn at all.
pub const ALPHA_CUTOFF: f32 = 0.1;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 2.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
        }
    }
}

/// One visible voxel, ready for instanced drawing: lattice position plus
/// clamped RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelInstance {
    pub coord: VoxelCoord,
    pub color: [f32; 3],
}

/// The per-frame render feed: every voxel whose alpha clears the draw
/// cutoff, with its color channels clamped into [0, 1]. Callers pass the
/// alive-masked grid here; the cutoff then hides the remaining faint
/// voxels that the mask's dilation kept.
pub fn extract_instances(grid: &VoxelGrid) -> Vec<VoxelInstance> {
    let n = grid.size() as i32;
    let mut instances = Vec::new();
    for z in 0..n {
        for y in 0..n {
            for x in 0..n {
                let coord = VoxelCoord::new(x, y, z);
                let Some(voxel) = grid.voxel(coord) else {
                    continue;
                };
                if voxel[CH_ALPHA] > ALPHA_CUTOFF {
                    instances.push(VoxelInstance {
                        coord,
                        color: [
                            voxel[CH_R].clamp(0.0, 1.0),
                            voxel[CH_G].clamp(0.0, 1.0),
                            voxel[CH_B].clamp(0.0, 1.0),
                        ],
                    });
                }
            }
        }
    }
    tracing::trace!(visible = instances.len(), "instances extracted");
    instances
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a (masked) grid snapshot and a view configuration and
/// produces output. It never mutates grid truth — that stays kernel-owned.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given grid snapshot and view.
    fn render(&self, grid: &VoxelGrid, view: &RenderView) -> Self::Output;
}

/// Debug text renderer: a human-readable frame for CLI output, logging,
/// and testing the render seam. Prints a summary plus an ASCII cut through
/// the lattice at a fixed z layer (`#` drawn, `.` empty).
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// The z layer to slice for the ASCII view.
    pub slice_z: usize,
}

impl DebugTextRenderer {
    pub fn new(slice_z: usize) -> Self {
        Self { slice_z }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, grid: &VoxelGrid, view: &RenderView) -> String {
        let instances = extract_instances(grid);
        let n = grid.size();
        let mut out = String::new();
        out.push_str(&format!(
            "=== Grid {n}x{n}x{n} ({} visible) ===\n",
            instances.len()
        ));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x, view.eye.y, view.eye.z, view.fov_degrees
        ));

        let z = self.slice_z.min(n - 1);
        out.push_str(&format!("--- slice z={z} ---\n"));
        for y in (0..n).rev() {
            for x in 0..n {
                let drawn = grid
                    .alpha(VoxelCoord::new(x as i32, y as i32, z as i32))
                    .is_some_and(|a| a > ALPHA_CUTOFF);
                out.push(if drawn { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellspace_common::GridConfig;

    fn grid_with_voxel(coord: VoxelCoord, rgb: [f32; 3], alpha: f32) -> VoxelGrid {
        let mut grid = VoxelGrid::empty(GridConfig::default());
        let voxel = grid.voxel_mut(coord).unwrap();
        voxel[CH_R] = rgb[0];
        voxel[CH_G] = rgb[1];
        voxel[CH_B] = rgb[2];
        voxel[CH_ALPHA] = alpha;
        grid
    }

    #[test]
    fn faint_voxels_are_not_extracted() {
        let grid = grid_with_voxel(VoxelCoord::new(1, 2, 3), [0.5, 0.5, 0.5], 0.1);
        // cutoff is strict
        assert!(extract_instances(&grid).is_empty());
    }

    #[test]
    fn extraction_clamps_color() {
        let coord = VoxelCoord::new(4, 4, 4);
        let grid = grid_with_voxel(coord, [1.7, -0.3, 0.25], 0.9);
        let instances = extract_instances(&grid);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].coord, coord);
        assert_eq!(instances[0].color, [1.0, 0.0, 0.25]);
    }

    #[test]
    fn seeded_grid_has_one_instance() {
        let grid = VoxelGrid::seeded(GridConfig::default());
        let instances = extract_instances(&grid);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].coord, VoxelCoord::new(8, 8, 8));
    }

    #[test]
    fn debug_renderer_marks_slice() {
        let grid = grid_with_voxel(VoxelCoord::new(0, 0, 3), [0.0, 0.0, 0.0], 0.8);
        let out = DebugTextRenderer::new(3).render(&grid, &RenderView::default());
        assert!(out.contains("slice z=3"));
        assert!(out.contains('#'));
        assert!(out.contains("(1 visible)"));
    }

    #[test]
    fn debug_renderer_empty_grid() {
        let grid = VoxelGrid::empty(GridConfig::default());
        let out = DebugTextRenderer::new(0).render(&grid, &RenderView::default());
        assert!(out.contains("(0 visible)"));
        assert!(!out.contains('#'));
    }
}
