use std::fmt;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use thiserror::Error;

use crate::board::{Board, PieceKind};

/// A single violated board invariant.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Violation {
    #[error("cols must be within 5..=10, got {0}")]
    ColsOutOfRange(i16),
    #[error("rows must be within 5..=10, got {0}")]
    RowsOutOfRange(i16),
    #[error("pieces[0] must be the player")]
    FirstNotPlayer,
    #[error("pieces[1] must be the exit")]
    SecondNotExit,
    #[error("board must have exactly one player, got {0}")]
    PlayerCount(usize),
    #[error("board must have exactly one exit, got {0}")]
    ExitCount(usize),
    #[error("pieces overlap at ({0}, {1})")]
    Overlap(i16, i16),
}

pub type Violations = SmallVec<[Violation; 8]>;

/// Every violated invariant, never just the first, so a caller can surface
/// all problems at once. An empty list means the board is well formed.
/// The board is never touched or repaired.
pub fn violations(board: &Board) -> Violations {
    let mut found = Violations::new();

    if !(5..=10).contains(&board.cols) {
        found.push(Violation::ColsOutOfRange(board.cols));
    }
    if !(5..=10).contains(&board.rows) {
        found.push(Violation::RowsOutOfRange(board.rows));
    }
    if board.pieces.first().map(|p| p.kind) != Some(PieceKind::Player) {
        found.push(Violation::FirstNotPlayer);
    }
    if board.pieces.get(1).map(|p| p.kind) != Some(PieceKind::Exit) {
        found.push(Violation::SecondNotExit);
    }

    let players = board
        .pieces
        .iter()
        .filter(|p| p.kind == PieceKind::Player)
        .count();
    if players != 1 {
        found.push(Violation::PlayerCount(players));
    }
    let exits = board
        .pieces
        .iter()
        .filter(|p| p.kind == PieceKind::Exit)
        .count();
    if exits != 1 {
        found.push(Violation::ExitCount(exits));
    }

    let mut cells: FxHashSet<(i16, i16)> = FxHashSet::default();
    for piece in &board.pieces {
        if !cells.insert((piece.x, piece.y)) {
            found.push(Violation::Overlap(piece.x, piece.y));
        }
    }

    found
}

/// All violations of a rejected board, collected rather than
/// short-circuited.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ValidationError {
    pub violations: Violations,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid board: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

pub fn validate(board: &Board) -> Result<(), ValidationError> {
    let violations = violations(board);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;
    use crate::board::PieceKind::*;

    fn p(x: i16, y: i16, kind: PieceKind, status: u8) -> Piece {
        Piece::new(x, y, kind, status)
    }

    fn good() -> Board {
        Board::new(
            5,
            6,
            [
                p(0, 0, Player, 0),
                p(4, 4, Exit, 0),
                p(2, 2, Stone, 0),
            ],
        )
    }

    #[test]
    fn a_well_formed_board_passes() {
        assert!(validate(&good()).is_ok());
        assert!(violations(&good()).is_empty());
    }

    #[test]
    fn grid_bounds_are_enforced() {
        let mut b = good();
        b.cols = 4;
        b.rows = 11;
        let v = violations(&b);
        assert!(v.contains(&Violation::ColsOutOfRange(4)));
        assert!(v.contains(&Violation::RowsOutOfRange(11)));
    }

    #[test]
    fn player_and_exit_must_lead_the_list() {
        let b = Board::new(5, 5, [p(0, 0, Exit, 0), p(4, 4, Player, 0)]);
        let v = violations(&b);
        assert!(v.contains(&Violation::FirstNotPlayer));
        assert!(v.contains(&Violation::SecondNotExit));
    }

    #[test]
    fn player_and_exit_counts_must_be_exactly_one() {
        let b = Board::new(
            5,
            5,
            [
                p(0, 0, Player, 0),
                p(4, 4, Exit, 0),
                p(1, 1, Player, 0),
                p(3, 3, Exit, 0),
            ],
        );
        let v = violations(&b);
        assert!(v.contains(&Violation::PlayerCount(2)));
        assert!(v.contains(&Violation::ExitCount(2)));
    }

    #[test]
    fn overlapping_pieces_are_reported_per_cell() {
        let b = Board::new(
            5,
            5,
            [
                p(0, 0, Player, 0),
                p(4, 4, Exit, 0),
                p(2, 2, Box, 0),
                p(2, 2, Stone, 0),
            ],
        );
        let v = violations(&b);
        assert!(v.contains(&Violation::Overlap(2, 2)));
    }

    #[test]
    fn similar_coordinates_do_not_collide() {
        // (1, 11) and (11, 1) are distinct cells even though a naive
        // string key would conflate them.
        let b = Board::new(
            12,
            12,
            [
                p(0, 0, Player, 0),
                p(4, 4, Exit, 0),
                p(1, 11, Box, 0),
                p(11, 1, Box, 0),
            ],
        );
        let v = violations(&b);
        assert!(!v.iter().any(|x| matches!(x, Violation::Overlap(_, _))));
    }

    #[test]
    fn an_empty_board_reports_every_structural_problem() {
        let b = Board::new(5, 5, []);
        let err = validate(&b).unwrap_err();
        let v = &err.violations;
        assert!(v.contains(&Violation::FirstNotPlayer));
        assert!(v.contains(&Violation::SecondNotExit));
        assert!(v.contains(&Violation::PlayerCount(0)));
        assert!(v.contains(&Violation::ExitCount(0)));
        // And the message carries all of them for the UI.
        let msg = err.to_string();
        assert!(msg.contains("player"));
        assert!(msg.contains("exit"));
    }
}
