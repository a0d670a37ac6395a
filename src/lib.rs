//! Core of the foonda sliding tile puzzle.
//!
//! The player piece slides across a grid until it collides with another
//! piece or a wall; every collision resolves by the occupant's kind:
//! boxes and coins get pushed, bounce boards redirect the slide, tunnels
//! teleport, holes open and swallow coins, cylinders tip over and roll.
//! On top of the move-resolution engine sits a breadth-first solver that
//! decides whether a board is winnable and returns the shortest direction
//! sequence, plus a random board generator and a structural validator.
//!
//! Rendering, assets and persistence live elsewhere; this crate only
//! exposes what those layers need: per-move piece deltas keyed by stable
//! indices, integer `(type, status)` pairs for sprite lookup, and a
//! JSON-serializable board shape.

pub mod board;
pub mod engine;
pub mod generate;
pub mod solver;
pub mod validate;

pub use board::{Board, Direction, Piece, PieceKind, Pieces, StateKey, DIRECTIONS, OFF_BOARD};
pub use engine::{resolve_move, Deltas, MoveResult, PieceDelta};
pub use generate::{random_board, random_solvable_board};
pub use solver::{solve, solve_with_budget, DirPath, SearchResult, SearchStep};
pub use validate::{validate, violations, ValidationError, Violation, Violations};
