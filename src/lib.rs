/// Pushmo solver library.
///
/// Layers, leaves first:
///   - `domain`: board, depth vectors, terrain physics, push rules (pure)
///   - `sim`:    breadth-first solver, search events, puzzle files
///   - `ui`:     glyph rendering for boards and checkpoints
///   - `config`: `config.toml` loading

pub mod config;
pub mod domain;
pub mod sim;
pub mod ui;

pub use domain::board::{Board, BoardError, Cell, Segment};
pub use domain::depths::{Depths, DEFAULT_MAX_DEPTH};
pub use sim::solver::{solve, solve_with, Checkpoint, Outcome, SearchStats, Solver, SolverOptions};
