use cellspace_common::{GridConfig, PickRay, VoxelCoord};
use glam::{Quat, Vec3};

/// March increment for the layer strategy, in voxel units.
const MARCH_INCREMENT: f32 = 0.25;

/// Travel cap, in voxel units past cube entry, for a march that never
/// hits its layer.
const MARCH_LIMIT: f32 = 8.0;

/// The grid's physical embedding: a cube of edge `size × voxel_size`
/// centered on the local origin, rotated by `rotation` in world space.
///
/// Axis convention (fixed by the reference renderer's instance placement):
/// the physical X axis carries the *logical y* index and the physical Y
/// axis carries the *logical x* index; Z maps straight through. All
/// resolvers go through this frame, so the swap lives in exactly one
/// place.
#[derive(Debug, Clone, Copy)]
pub struct GridFrame {
    pub config: GridConfig,
    pub voxel_size: f32,
    pub rotation: Quat,
}

impl GridFrame {
    pub fn new(config: GridConfig, voxel_size: f32, rotation: Quat) -> Self {
        Self {
            config,
            voxel_size,
            rotation,
        }
    }

    /// Physical edge length of the whole cube.
    pub fn extent(&self) -> f32 {
        self.config.size as f32 * self.voxel_size
    }

    /// A rotated world-space point → continuous lattice coordinates, where
    /// [0, N) on each component spans the cube.
    fn to_lattice_point(&self, world: Vec3) -> Vec3 {
        let half = self.config.size as f32 / 2.0;
        let local = self.rotation.inverse() * world;
        Vec3::new(
            local.y / self.voxel_size + half,
            local.x / self.voxel_size + half,
            local.z / self.voxel_size + half,
        )
    }

    /// A rotated world-space direction → lattice direction (axis swap only;
    /// scale cancels under normalization).
    fn to_lattice_dir(&self, world: Vec3) -> Vec3 {
        let local = self.rotation.inverse() * world;
        Vec3::new(local.y, local.x, local.z)
    }
}

impl Default for GridFrame {
    fn default() -> Self {
        Self {
            config: GridConfig::default(),
            voxel_size: 0.08,
            rotation: Quat::IDENTITY,
        }
    }
}

/// The axis whose layer index the march strategy matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerAxis {
    X,
    Y,
    Z,
}

/// Plane-intersection strategy: the external renderer intersects the pick
/// ray with the cube and hands back the world-space hit point; this maps
/// it to the voxel containing it. `None` when the point lies outside the
/// cube (a grazing hit on the far face, stale pointer data).
pub fn resolve_hit_point(frame: &GridFrame, world_point: Vec3) -> Option<VoxelCoord> {
    let p = frame.to_lattice_point(world_point);
    let coord = VoxelCoord::new(
        p.x.floor() as i32,
        p.y.floor() as i32,
        p.z.floor() as i32,
    );
    if coord.in_bounds(frame.config.size) {
        Some(coord)
    } else {
        tracing::trace!(point = ?world_point, "hit point outside lattice");
        None
    }
}

/// Ray-marching strategy: walk the ray in fixed quarter-voxel increments
/// from where it enters the cube and return the first in-cube point whose
/// floored coordinate along `axis` equals `layer`. `None` when the ray
/// leaves the cube (or never reaches it) without crossing the layer.
pub fn resolve_layer_march(
    frame: &GridFrame,
    ray: PickRay,
    axis: LayerAxis,
    layer: usize,
) -> Option<VoxelCoord> {
    let n = frame.config.size as f32;
    let origin = frame.to_lattice_point(ray.origin);
    let dir = frame.to_lattice_dir(ray.dir);
    if dir.length_squared() == 0.0 {
        return None;
    }
    let dir = dir.normalize();
    let entry = cube_entry(origin, dir, n)?;

    let mut entered = false;
    let mut t = entry;
    let limit = entry + MARCH_LIMIT * n;
    while t <= limit {
        let p = origin + dir * t;
        let inside =
            p.x >= 0.0 && p.y >= 0.0 && p.z >= 0.0 && p.x < n && p.y < n && p.z < n;
        if inside {
            entered = true;
            let along = match axis {
                LayerAxis::X => p.x,
                LayerAxis::Y => p.y,
                LayerAxis::Z => p.z,
            };
            if along.floor() as i32 == layer as i32 {
                return Some(VoxelCoord::new(
                    p.x.floor() as i32,
                    p.y.floor() as i32,
                    p.z.floor() as i32,
                ));
            }
        } else if entered {
            // exited the cube without crossing the layer
            return None;
        }
        t += MARCH_INCREMENT;
    }
    None
}

/// Slab intersection of a ray against the lattice cube `[0, n)³`. Returns
/// the parameter where the ray first meets the cube (0 for an origin
/// already inside), or `None` when it never does. Lets the march start at
/// the cube instead of spending its travel cap in open space.
fn cube_entry(origin: Vec3, dir: Vec3, n: f32) -> Option<f32> {
    let mut t_min = 0.0f32;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        if d.abs() < f32::EPSILON {
            if o < 0.0 || o >= n {
                return None;
            }
        } else {
            let mut t0 = -o / d;
            let mut t1 = (n - o) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
    }
    Some(t_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// World position of the center of logical voxel (x, y, z) under the
    /// frame's axis convention.
    fn voxel_center_world(frame: &GridFrame, x: i32, y: i32, z: i32) -> Vec3 {
        let half = frame.config.size as f32 / 2.0;
        let local = Vec3::new(
            (y as f32 + 0.5 - half) * frame.voxel_size,
            (x as f32 + 0.5 - half) * frame.voxel_size,
            (z as f32 + 0.5 - half) * frame.voxel_size,
        );
        frame.rotation * local
    }

    #[test]
    fn hit_point_at_cube_center_is_center_voxel() {
        let frame = GridFrame::default();
        let hit = resolve_hit_point(&frame, Vec3::new(0.001, 0.001, 0.001)).unwrap();
        assert_eq!(hit, VoxelCoord::new(8, 8, 8));
    }

    #[test]
    fn hit_point_respects_axis_swap() {
        let frame = GridFrame::default();
        let world = voxel_center_world(&frame, 5, 3, 9);
        assert_eq!(
            resolve_hit_point(&frame, world),
            Some(VoxelCoord::new(5, 3, 9))
        );
    }

    #[test]
    fn hit_point_outside_cube_is_none() {
        let frame = GridFrame::default();
        // just past the +X face
        assert_eq!(
            resolve_hit_point(&frame, Vec3::new(frame.extent(), 0.0, 0.0)),
            None
        );
    }

    #[test]
    fn hit_point_survives_rotation() {
        let mut frame = GridFrame::default();
        frame.rotation = Quat::from_rotation_y(1.1);
        let world = voxel_center_world(&frame, 2, 12, 7);
        assert_eq!(
            resolve_hit_point(&frame, world),
            Some(VoxelCoord::new(2, 12, 7))
        );
    }

    #[test]
    fn march_finds_layer_along_z() {
        let frame = GridFrame::default();
        // straight down the physical -Z axis from outside the cube
        let ray = PickRay::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = resolve_layer_march(&frame, ray, LayerAxis::Z, 5).unwrap();
        assert_eq!(hit, VoxelCoord::new(8, 8, 5));
    }

    #[test]
    fn march_misses_layer_behind_it() {
        let frame = GridFrame::default();
        // enters at z≈15 marching toward -z can reach layer 2; toward +z it
        // exits immediately and must miss
        let ray = PickRay::new(Vec3::new(0.0, 0.0, 0.6), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(resolve_layer_march(&frame, ray, LayerAxis::Z, 2), None);
    }

    #[test]
    fn march_parallel_to_layer_plane_terminates_with_none() {
        let frame = GridFrame::default();
        // travels inside the cube at constant z, looking for another layer
        let ray = PickRay::new(Vec3::new(-1.0, 0.0, 0.2), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(resolve_layer_march(&frame, ray, LayerAxis::Z, 0), None);
    }

    #[test]
    fn march_ray_that_never_reaches_cube_is_none() {
        let frame = GridFrame::default();
        let ray = PickRay::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(resolve_layer_march(&frame, ray, LayerAxis::Z, 8), None);
    }

    #[test]
    fn march_from_far_away_still_hits() {
        let frame = GridFrame::default();
        // hundreds of voxel lengths from the cube; the travel cap counts
        // from entry, not from the origin
        let ray = PickRay::new(Vec3::new(0.0, 0.0, 40.0), Vec3::new(0.0, 0.0, -1.0));
        let hit = resolve_layer_march(&frame, ray, LayerAxis::Z, 5).unwrap();
        assert_eq!(hit, VoxelCoord::new(8, 8, 5));
    }

    #[test]
    fn march_zero_direction_is_none() {
        let frame = GridFrame::default();
        let ray = PickRay::new(Vec3::ZERO, Vec3::ZERO);
        assert_eq!(resolve_layer_march(&frame, ray, LayerAxis::X, 8), None);
    }
}
