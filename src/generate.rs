use log::trace;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::board::{Board, Piece, PieceKind, Pieces};
use crate::solver::{solve, DirPath};

/// Kinds eligible for random placement. Player and exit are placed first
/// and tunnels need pairing, so none of those are drawn.
const SPAWN_KINDS: [PieceKind; 7] = [
    PieceKind::Bound,
    PieceKind::HalfBound,
    PieceKind::Cylinder,
    PieceKind::Hole,
    PieceKind::Coin,
    PieceKind::Box,
    PieceKind::Stone,
];

/// Random starting board: a 5..=9 grid holding 4..=12 pieces on unique
/// cells, the player first and the exit second, everything else drawn
/// uniformly from the non-terminal kinds with status 0.
///
/// Solvability is not guaranteed; see [`random_solvable_board`].
pub fn random_board(rng: &mut impl Rng) -> Board {
    let cols: i16 = rng.gen_range(5..=9);
    let rows: i16 = rng.gen_range(5..=9);
    let count: usize = rng.gen_range(4..=12);

    let mut used: FxHashSet<(i16, i16)> = FxHashSet::default();
    let mut pieces = Pieces::new();
    while pieces.len() < count {
        let x = rng.gen_range(0..cols);
        let y = rng.gen_range(0..rows);
        if !used.insert((x, y)) {
            continue;
        }
        let kind = match pieces.len() {
            0 => PieceKind::Player,
            1 => PieceKind::Exit,
            _ => SPAWN_KINDS[rng.gen_range(0..SPAWN_KINDS.len())],
        };
        pieces.push(Piece::new(x, y, kind, 0));
    }

    Board { cols, rows, pieces }
}

/// Generate boards until the solver proves one winnable, giving up after
/// `attempts` misses. Returns the board together with its solution.
pub fn random_solvable_board(rng: &mut impl Rng, attempts: usize) -> Option<(Board, DirPath)> {
    for attempt in 0..attempts {
        let board = random_board(rng);
        if let Some(path) = solve(&board) {
            trace!("solvable board on attempt {}", attempt + 1);
            return Some((board, path));
        }
    }
    None
}
