// src/editor/mod.rs
pub mod controller;
mod state;

pub use controller::{EditorController, EditorError, EnhanceOutcome};
pub use state::AppPhase;
