//! Drift Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `drift_tetris::{core,input,term,types}`
//! and holds the runner's argument handling.

pub mod cli;

pub use drift_tetris_core as core;
pub use drift_tetris_input as input;
pub use drift_tetris_term as term;
pub use drift_tetris_types as types;
