//! Interactive command surface: high-level actions any frontend (desktop
//! window, test harness, CLI) can produce, decoupled from device events.
//!
//! # Invariants
//! - Consumers of the engine see actions, never raw pointer/key events.
//! - A resolver miss upstream produces no action at all; `Noop` exists for
//!   bindings that are not wired yet.

pub mod action;

pub use action::{Action, DamageParams, apply_action};
