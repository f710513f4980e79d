use crate::grid::VoxelGrid;
use cellspace_common::{LATENT_START, VoxelCoord};
use glam::Vec3;

/// Radius used by interactive damage when the caller does not pick one.
pub const DEFAULT_DAMAGE_RADIUS: f32 = 2.0;

/// A localized write against the grid, carrying all of its parameters.
///
/// Requests are ephemeral: produced by the pick resolver or direct caller
/// input, applied immediately — or queued by the engine while a step is in
/// flight and applied right after unpack.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationRequest {
    /// Ray-marched damage: clears the visible channels (color + alpha)
    /// along a ray.
    DamageRay {
        origin: Vec3,
        dir: Vec3,
        radius: f32,
    },
    /// Spherical damage: full erase of every channel around a center.
    DamageSphere { center: VoxelCoord, radius: f32 },
    /// Seed latent material in a 2×2×2 block.
    Grow { at: VoxelCoord },
}

impl MutationRequest {
    /// Apply this request to the grid.
    pub fn apply(&self, grid: &mut VoxelGrid) {
        match *self {
            Self::DamageRay {
                origin,
                dir,
                radius,
            } => damage_ray(grid, origin, dir, radius),
            Self::DamageSphere { center, radius } => damage_sphere(grid, center, radius),
            Self::Grow { at } => grow(grid, at),
        }
    }
}

/// Ray-marched damage: walk from `origin` along `dir` in unit-length steps,
/// zeroing the first four channels (color + alpha) of every voxel within
/// `radius` of the marched point. Latent channels beyond alpha survive, so
/// the model may regrow through the wound.
///
/// The walk stops the first time the marched point leaves [0, N) on any
/// axis; cells outside the grid near the point are skipped without
/// affecting the walk. A zero-length direction falls back to a unit step
/// along +x so the walk always terminates.
pub fn damage_ray(grid: &mut VoxelGrid, origin: Vec3, dir: Vec3, radius: f32) {
    let n = grid.size() as f32;
    let mag = dir.length();
    let step = if mag > 0.0 { dir / mag } else { Vec3::X };

    let erase = LATENT_START + 1; // channels 0..4: rgb + alpha
    let reach = radius.max(0.0);

    let mut t = 0.0f32;
    loop {
        let p = origin + step * t;
        if p.x < 0.0 || p.y < 0.0 || p.z < 0.0 || p.x >= n || p.y >= n || p.z >= n {
            break;
        }

        let lo = |v: f32| (v - reach).floor() as i32;
        let hi = |v: f32| (v + reach).ceil() as i32;
        for x in lo(p.x)..=hi(p.x) {
            for y in lo(p.y)..=hi(p.y) {
                for z in lo(p.z)..=hi(p.z) {
                    let coord = VoxelCoord::new(x, y, z);
                    let d2 = (x as f32 - p.x).powi(2)
                        + (y as f32 - p.y).powi(2)
                        + (z as f32 - p.z).powi(2);
                    if d2 <= reach * reach {
                        if let Some(voxel) = grid.voxel_mut(coord) {
                            voxel[..erase].fill(0.0);
                        }
                    }
                }
            }
        }

        t += 1.0;
    }
}

/// Spherical damage: fully erase (all C channels) every voxel whose squared
/// integer distance to `center` is at most `radius²`. This is the canonical
/// interactive erase; nothing survives inside the sphere, latent state
/// included.
pub fn damage_sphere(grid: &mut VoxelGrid, center: VoxelCoord, radius: f32) {
    let reach = radius.max(0.0);
    let rc = reach.ceil() as i32;
    let r2 = reach * reach;
    let max = grid.size() as i32 - 1;

    for z in (center.z - rc).max(0)..=(center.z + rc).min(max) {
        for y in (center.y - rc).max(0)..=(center.y + rc).min(max) {
            for x in (center.x - rc).max(0)..=(center.x + rc).min(max) {
                let dx = x - center.x;
                let dy = y - center.y;
                let dz = z - center.z;
                let d2 = (dx * dx + dy * dy + dz * dz) as f32;
                if d2 <= r2 {
                    // in-bounds by loop construction
                    if let Some(voxel) = grid.voxel_mut(VoxelCoord::new(x, y, z)) {
                        voxel.fill(0.0);
                    }
                }
            }
        }
    }
}

/// Seed new latent material: set channels [3..C) to 1.0 across the 2×2×2
/// block starting at `at`, each axis clamped independently into [0, N-1].
/// Colors stay untouched, mirroring the original seed's convention. The
/// coordinate need not be in bounds; a fully out-of-range request collapses
/// onto the nearest corner cells.
pub fn grow(grid: &mut VoxelGrid, at: VoxelCoord) {
    let size = grid.size();
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                let target = VoxelCoord::new(at.x + i, at.y + j, at.z + k).clamped(size);
                // clamped() guarantees in-bounds
                if let Some(voxel) = grid.voxel_mut(target) {
                    voxel[LATENT_START..].fill(1.0);
                }
            }
        }
    }
}
