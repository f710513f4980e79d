use cellspace_common::VoxelCoord;
use cellspace_kernel::Automaton;
use cellspace_pick::LayerCursor;
use glam::Vec3;

/// Parameters for an interactive damage action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageParams {
    /// Spherical full erase around a resolved voxel (the canonical
    /// interactive erase).
    Sphere { center: VoxelCoord, radius: f32 },
    /// Ray-marched erase of the visible channels along a pick ray.
    Ray { origin: Vec3, dir: Vec3 },
}

/// A high-level action produced by any frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Start/stop the simulation loop.
    TogglePlay,
    /// Advance exactly one step, playing or not.
    StepOnce,
    /// Erase material.
    Damage(DamageParams),
    /// Seed latent material at a resolved voxel.
    Grow(VoxelCoord),
    /// Jump the active layer to an index.
    SetActiveLayer(usize),
    /// Nudge the active layer by a scroll delta.
    ScrollLayer(f32),
    /// Back to the seed state.
    Reset,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

/// Dispatch one action onto the engine and layer cursor.
pub fn apply_action(engine: &mut Automaton, cursor: &mut LayerCursor, action: &Action) {
    tracing::trace!(?action, "dispatching action");
    match *action {
        Action::TogglePlay => engine.toggle_play(),
        Action::StepOnce => {
            engine.step_once();
        }
        Action::Damage(DamageParams::Sphere { center, radius }) => engine.damage(center, radius),
        Action::Damage(DamageParams::Ray { origin, dir }) => engine.damage_along_ray(origin, dir),
        Action::Grow(at) => engine.grow(at),
        Action::SetActiveLayer(layer) => cursor.set(layer),
        Action::ScrollLayer(delta) => cursor.scroll(delta),
        Action::Reset => engine.reset(),
        Action::Noop => {}
    }
}
