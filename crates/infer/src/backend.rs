use crate::tensor::PackedTensor;
use cellspace_common::LATENT_START;

/// Errors from an inference backend.
#[derive(Debug, thiserror::Error)]
pub enum InferError {
    /// The backend produced a tensor whose shape differs from its input.
    #[error("output shape {got:?} does not match input shape {expected:?}")]
    ShapeMismatch {
        expected: [usize; 5],
        got: [usize; 5],
    },
    /// The underlying runtime failed (model load, session run, transport).
    #[error("backend failure: {0}")]
    Backend(String),
}

/// The update model seam: one tensor in, one tensor out.
///
/// The engine packs grid state into a [1, C, N, N, N] tensor, calls
/// `infer`, and unpacks the result over the grid. Any stability or alive
/// masking logic belongs to the model; the engine applies the output
/// verbatim. Implementations must return a tensor of the input's shape.
pub trait InferenceBackend {
    /// Run one model update over the packed state.
    fn infer(&mut self, input: &PackedTensor) -> Result<PackedTensor, InferError>;

    /// Human-readable backend name for logs.
    fn name(&self) -> &str {
        "backend"
    }
}

/// Echoes its input: the automaton holds perfectly still. Useful for
/// wiring tests and as the trivial contract witness.
#[derive(Debug, Default)]
pub struct IdentityBackend;

impl InferenceBackend for IdentityBackend {
    fn infer(&mut self, input: &PackedTensor) -> Result<PackedTensor, InferError> {
        Ok(input.clone())
    }

    fn name(&self) -> &str {
        "identity"
    }
}

/// Scales the latent channels (alpha included) by a constant factor each
/// step, leaving colors alone. A deterministic stand-in for a real model:
/// structures fade out over time, which exercises the alive-mask and
/// render paths without a model runtime.
#[derive(Debug, Clone, Copy)]
pub struct DecayBackend {
    pub factor: f32,
}

impl DecayBackend {
    pub fn new(factor: f32) -> Self {
        Self { factor }
    }
}

impl Default for DecayBackend {
    fn default() -> Self {
        Self { factor: 0.98 }
    }
}

impl InferenceBackend for DecayBackend {
    fn infer(&mut self, input: &PackedTensor) -> Result<PackedTensor, InferError> {
        let mut out = input.clone();
        let voxels = input.config().voxel_count();
        let channels = input.config().channels;
        for c in LATENT_START..channels {
            let slice = &mut out.data_mut()[c * voxels..(c + 1) * voxels];
            for v in slice {
                *v *= self.factor;
            }
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "decay"
    }
}
