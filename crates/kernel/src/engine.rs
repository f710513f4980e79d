use crate::grid::VoxelGrid;
use crate::mutate::{DEFAULT_DAMAGE_RADIUS, MutationRequest};
use crate::pack::{UnpackError, pack, unpack};
use cellspace_common::{GridConfig, VoxelCoord};
use cellspace_infer::{InferenceBackend, PackedTensor};
use glam::Vec3;

/// Errors from the split-phase step path.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// `complete_step` was called without a matching `begin_step`.
    #[error("no step in flight")]
    NoStepInFlight,
    /// The output tensor did not match the grid's shape; the grid is
    /// untouched and the step is abandoned.
    #[error(transparent)]
    Unpack(#[from] UnpackError),
}

/// The automaton engine: exclusive owner of the live grid, orchestrator of
/// the pack → infer → unpack cycle, and the single entry point for
/// interactive mutation.
///
/// Stepping is serialized: at most one step is in flight at a time, and a
/// mutation requested while one is outstanding is queued and applied right
/// after the step's result lands. That resolves the mutate-during-unpack
/// race in favor of the mutation (single-writer, last write is the queued
/// mutation).
pub struct Automaton {
    grid: VoxelGrid,
    backend: Option<Box<dyn InferenceBackend>>,
    in_flight: bool,
    queued: Vec<MutationRequest>,
    playing: bool,
    frame_skip: u64,
    frames: u64,
    steps: u64,
}

impl Automaton {
    /// A freshly seeded automaton with no backend attached. `frame_skip`
    /// defaults to 5 ticks per step, the reference cadence.
    pub fn new(config: GridConfig) -> Self {
        Self {
            grid: VoxelGrid::seeded(config),
            backend: None,
            in_flight: false,
            queued: Vec::new(),
            playing: false,
            frame_skip: 5,
            frames: 0,
            steps: 0,
        }
    }

    /// Attach the inference backend. Until this happens, `step()` is a
    /// logged no-op.
    pub fn attach_backend(&mut self, backend: Box<dyn InferenceBackend>) {
        tracing::info!(backend = backend.name(), "inference backend attached");
        self.backend = Some(backend);
    }

    pub fn backend_attached(&self) -> bool {
        self.backend.is_some()
    }

    /// Read access to the live grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn config(&self) -> GridConfig {
        self.grid.config()
    }

    /// Completed simulation steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Ticks observed (stepped or not).
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        tracing::debug!(playing = self.playing, "play toggled");
    }

    /// Steps per tick divisor; a step runs every `frame_skip`-th tick while
    /// playing. Zero is treated as 1.
    pub fn set_frame_skip(&mut self, frame_skip: u64) {
        self.frame_skip = frame_skip.max(1);
    }

    /// One cooperative tick of the loop. While playing, every
    /// `frame_skip`-th tick runs a step. Returns whether a step ran.
    pub fn tick(&mut self) -> bool {
        self.frames += 1;
        if self.playing && self.frames % self.frame_skip == 0 {
            self.step()
        } else {
            false
        }
    }

    /// Run one step regardless of the play state.
    pub fn step_once(&mut self) -> bool {
        self.step()
    }

    /// One full simulation step against the attached backend: pack, infer,
    /// unpack, overwriting every channel of every voxel.
    ///
    /// Degrades to a no-op (returning `false`, grid untouched) when no
    /// backend is attached, a step is already in flight, the backend
    /// errors, or the output shape is wrong. Never blocks the caller on
    /// anything but the backend call itself.
    pub fn step(&mut self) -> bool {
        if self.in_flight {
            tracing::debug!("step skipped: one already in flight");
            return false;
        }
        let Some(backend) = self.backend.as_mut() else {
            tracing::debug!("step skipped: no inference backend attached");
            return false;
        };

        let input = pack(&self.grid);
        match backend.infer(&input) {
            Ok(output) => match unpack(&output, &mut self.grid) {
                Ok(()) => {
                    self.steps += 1;
                    true
                }
                Err(e) => {
                    tracing::warn!(error = %e, "backend output rejected");
                    false
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "inference failed, step dropped");
                false
            }
        }
    }

    /// Begin a split-phase step: pack the grid and mark a step in flight.
    ///
    /// Returns `None` if a step is already outstanding — the driver waits
    /// for it rather than issuing another. The caller carries the tensor to
    /// whatever answers the inference contract and hands the result to
    /// [`complete_step`](Self::complete_step).
    pub fn begin_step(&mut self) -> Option<PackedTensor> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        Some(pack(&self.grid))
    }

    /// Land a split-phase step's output: unpack over the grid, then apply
    /// any mutations queued while the step was in flight (queued writes win
    /// over the step's output for the voxels they touch).
    pub fn complete_step(&mut self, output: PackedTensor) -> Result<(), StepError> {
        if !self.in_flight {
            return Err(StepError::NoStepInFlight);
        }
        self.in_flight = false;
        let unpacked = unpack(&output, &mut self.grid);
        self.drain_queue();
        unpacked?;
        self.steps += 1;
        Ok(())
    }

    /// Abandon an in-flight step (backend failed or was torn down). Queued
    /// mutations still apply; the grid keeps its pre-step value otherwise.
    pub fn abort_step(&mut self) {
        if self.in_flight {
            tracing::debug!("in-flight step aborted");
            self.in_flight = false;
            self.drain_queue();
        }
    }

    /// Whether a split-phase step is outstanding.
    pub fn step_in_flight(&self) -> bool {
        self.in_flight
    }

    fn drain_queue(&mut self) {
        for request in std::mem::take(&mut self.queued) {
            request.apply(&mut self.grid);
        }
    }

    /// Apply a mutation now, or queue it if a step is in flight.
    pub fn mutate(&mut self, request: MutationRequest) {
        if self.in_flight {
            tracing::debug!(?request, "mutation queued behind in-flight step");
            self.queued.push(request);
        } else {
            request.apply(&mut self.grid);
        }
    }

    /// Canonical interactive erase: spherical, full-channel.
    pub fn damage(&mut self, center: VoxelCoord, radius: f32) {
        self.mutate(MutationRequest::DamageSphere { center, radius });
    }

    /// Ray-marched erase of the visible channels only.
    pub fn damage_along_ray(&mut self, origin: Vec3, dir: Vec3) {
        self.mutate(MutationRequest::DamageRay {
            origin,
            dir,
            radius: DEFAULT_DAMAGE_RADIUS,
        });
    }

    /// Seed latent material at `at` (see [`crate::mutate::grow`]).
    pub fn grow(&mut self, at: VoxelCoord) {
        self.mutate(MutationRequest::Grow { at });
    }

    /// Reset to the seed state, dropping any in-flight step and queued
    /// mutations.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.in_flight = false;
        self.queued.clear();
        self.playing = false;
        self.frames = 0;
        self.steps = 0;
    }
}

impl std::fmt::Debug for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Automaton")
            .field("config", &self.grid.config())
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .field("in_flight", &self.in_flight)
            .field("queued", &self.queued.len())
            .field("playing", &self.playing)
            .field("steps", &self.steps)
            .finish()
    }
}
