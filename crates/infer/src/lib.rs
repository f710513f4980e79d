//! Inference boundary: the packed tensor the update model consumes and the
//! backend trait any model runtime implements.
//!
//! # Invariants
//! - Tensors are channel-major, shape [1, C, N, N, N], f32.
//! - A backend returns a tensor of the identical shape or an error; it never
//!   mutates grid state directly.
//! - Backends are substitutable: a local runtime, a remote service, or a
//!   pure-function stub all satisfy the same trait.

mod backend;
mod tensor;

pub use backend::{DecayBackend, IdentityBackend, InferError, InferenceBackend};
pub use tensor::PackedTensor;
