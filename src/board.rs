use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Fixed direction order. The solver tries moves in this order, so it also
/// decides the tie-break between equal-length solutions.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Left,
];

const DIR_CHARS: [char; 4] = ['d', 'u', 'r', 'l'];

/// Off-board sentinel for consumed pieces. They stay in the piece list so
/// indices remain stable; only their position marks them as gone.
pub const OFF_BOARD: (i16, i16) = (-1, -1);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Down,
    Up,
    Right,
    Left,
}

impl Direction {
    #[inline(always)]
    pub const fn delta(self) -> (i16, i16) {
        match self {
            Direction::Down => (0, 1),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Left => (-1, 0),
        }
    }

    /// Single-char form used when printing solutions.
    #[inline(always)]
    pub const fn as_char(self) -> char {
        DIR_CHARS[self as usize]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Piece kinds with their stable integer codes (declaration order is the
/// code). The asset layer keys sprites by `"{code}{status}"`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum PieceKind {
    Player,
    Exit,
    Bound,
    HalfBound,
    Cylinder,
    Hole,
    Coin,
    Box,
    Stone,
    Tunnel,
}

impl PieceKind {
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<PieceKind> {
        match code {
            0 => Some(PieceKind::Player),
            1 => Some(PieceKind::Exit),
            2 => Some(PieceKind::Bound),
            3 => Some(PieceKind::HalfBound),
            4 => Some(PieceKind::Cylinder),
            5 => Some(PieceKind::Hole),
            6 => Some(PieceKind::Coin),
            7 => Some(PieceKind::Box),
            8 => Some(PieceKind::Stone),
            9 => Some(PieceKind::Tunnel),
            _ => None,
        }
    }
}

/// A single grid occupant. `kind` never changes after creation; `status` is
/// the kind-specific sub-state (diagonal orientation, hole state, tunnel
/// pair id, ...).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub x: i16,
    pub y: i16,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub status: u8,
}

impl Piece {
    #[inline(always)]
    pub const fn new(x: i16, y: i16, kind: PieceKind, status: u8) -> Self {
        Piece { x, y, kind, status }
    }

    #[inline(always)]
    pub const fn at(&self, x: i16, y: i16) -> bool {
        self.x == x && self.y == y
    }

    #[inline(always)]
    pub const fn off_board(&self) -> bool {
        self.x == OFF_BOARD.0 && self.y == OFF_BOARD.1
    }

    /// Pack position, kind and status into a `u32`. Coordinates fit in a
    /// byte; the off-board -1 maps to 0xFF, distinct from any grid cell.
    #[inline(always)]
    pub fn pack(&self) -> u32 {
        ((self.x as u8 as u32) << 24)
            | ((self.y as u8 as u32) << 16)
            | ((self.kind.code() as u32) << 8)
            | self.status as u32
    }

    /// Sprite key for the asset layer, e.g. a filled hole is `"52"`.
    pub fn visual_key(&self) -> String {
        format!("{}{}", self.kind.code(), self.status)
    }
}

pub type Pieces = SmallVec<[Piece; 16]>;

/// Canonical board key: every piece's (x, y, type, status) in list order.
/// Two boards with equal keys are the same search state.
pub type StateKey = SmallVec<[u32; 16]>;

/// Grid dimensions plus the ordered piece list. Index 0 is always the
/// player and index 1 the exit (enforced by the validator); the engine
/// addresses pieces positionally, so order is never changed by a move.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    pub cols: i16,
    pub rows: i16,
    pub pieces: Pieces,
}

impl Board {
    pub fn new(cols: i16, rows: i16, pieces: impl IntoIterator<Item = Piece>) -> Self {
        Board {
            cols,
            rows,
            pieces: pieces.into_iter().collect(),
        }
    }

    #[inline(always)]
    pub const fn in_bounds(&self, x: i16, y: i16) -> bool {
        x >= 0 && x < self.cols && y >= 0 && y < self.rows
    }

    /// First piece occupying (x, y), by list order. Overlaps cannot occur
    /// on validated boards, but resolution order matters if they do.
    #[inline(always)]
    pub fn piece_at(&self, x: i16, y: i16) -> Option<usize> {
        self.pieces.iter().position(|p| p.at(x, y))
    }

    pub fn state_key(&self) -> StateKey {
        self.pieces.iter().map(Piece::pack).collect()
    }
}

impl fmt::Display for Board {
    /// Text rendering: one digit per occupied cell (the kind code), dots
    /// for empty cells. Consumed pieces are not drawn.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                match self.piece_at(x, y) {
                    Some(i) => {
                        let code = self.pieces[i].kind.code();
                        write!(f, "{}", char::from(b'0' + code))?;
                    }
                    None => write!(f, ".")?,
                }
            }
            if y + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
