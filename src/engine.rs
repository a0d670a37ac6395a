use log::warn;
use smallvec::SmallVec;

use crate::board::{Board, Direction, Piece, PieceKind, Pieces, OFF_BOARD};

const PLAYER: usize = 0;
const EXIT: usize = 1;

// Hole sub-states.
const HOLE_COVERED: u8 = 0;
const HOLE_OPEN: u8 = 1;
const HOLE_FILLED: u8 = 2;

// Coin sub-states.
const COIN_FALLEN: u8 = 1;

// Cylinder sub-states.
const CYL_STANDING: u8 = 0;
const CYL_VERTICAL: u8 = 1;
const CYL_HORIZONTAL: u8 = 2;

/// A piece snapshot taken right after a mutation, tagged with the piece's
/// index in `Board::pieces` so a renderer can animate increments per piece.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PieceDelta {
    pub index: usize,
    pub piece: Piece,
}

pub type Deltas = SmallVec<[PieceDelta; 8]>;

#[derive(Clone, PartialEq, Debug)]
pub struct MoveResult {
    /// Whether any piece moved or any status flipped. False means the
    /// resulting board is identical to the input.
    pub changed: bool,
    /// Whether the player reached the exit, directly or through a tunnel
    /// or bounce continuation.
    pub won: bool,
    pub board: Board,
    /// Every mutation in discovery order.
    pub deltas: Deltas,
}

/// Full bounce board. Status 0 is the '/' diagonal, anything else '\'.
#[inline(always)]
fn bound_reflect(status: u8, dir: Direction) -> Direction {
    match (status, dir) {
        (0, Direction::Down) => Direction::Left,
        (0, Direction::Up) => Direction::Right,
        (0, Direction::Right) => Direction::Up,
        (0, Direction::Left) => Direction::Down,
        (_, Direction::Down) => Direction::Right,
        (_, Direction::Up) => Direction::Left,
        (_, Direction::Right) => Direction::Down,
        (_, Direction::Left) => Direction::Up,
    }
}

/// Half bounce board: each orientation reflects two of the four incoming
/// directions; the other two faces block.
#[inline(always)]
fn half_bound_reflect(status: u8, dir: Direction) -> Option<Direction> {
    match (status, dir) {
        (0, Direction::Down) => Some(Direction::Left),
        (0, Direction::Right) => Some(Direction::Up),
        (1, Direction::Down) => Some(Direction::Right),
        (1, Direction::Left) => Some(Direction::Up),
        (2, Direction::Up) => Some(Direction::Right),
        (2, Direction::Left) => Some(Direction::Down),
        (3, Direction::Up) => Some(Direction::Left),
        (3, Direction::Right) => Some(Direction::Down),
        _ => None,
    }
}

#[inline(always)]
fn record(deltas: &mut Deltas, pieces: &Pieces, index: usize) {
    deltas.push(PieceDelta {
        index,
        piece: pieces[index],
    });
}

/// Resolve one directional move: the player slides until something stops
/// it, and every collision is handled per the occupant's kind, possibly
/// handing the slide over to a pushed piece or changing its direction.
///
/// The input board is untouched; the caller gets a new one. Boards must
/// already satisfy `validate` — the engine never errors on a well-formed
/// board, and anything illegal simply resolves to `changed == false`.
pub fn resolve_move(board: &Board, direction: Direction) -> MoveResult {
    let mut next = board.clone();
    let mut deltas = Deltas::new();
    let mut won = false;
    let mut dir = direction;
    let mut moving = PLAYER;

    // Upper bound on chained steps: each cell entered from each of the
    // four directions at most once. A slide that runs longer is cycling,
    // which no well-formed board produces.
    let cap = board.cols as usize * board.rows as usize * 4;
    let mut steps = 0usize;

    loop {
        if steps == cap {
            warn!("slide resolution capped at {cap} steps; treating as blocked");
            break;
        }
        steps += 1;

        let (dx, dy) = dir.delta();
        let x = next.pieces[moving].x + dx;
        let y = next.pieces[moving].y + dy;

        if !next.in_bounds(x, y) {
            break;
        }

        let hit = match next.piece_at(x, y) {
            None => {
                // Free cell: keep sliding.
                next.pieces[moving].x = x;
                next.pieces[moving].y = y;
                record(&mut deltas, &next.pieces, moving);
                continue;
            }
            Some(i) => i,
        };

        if next.pieces[hit].kind == PieceKind::Hole {
            match next.pieces[hit].status {
                HOLE_COVERED => {
                    // Any mover rolls onto the lid, uncovering the hole,
                    // and passes on.
                    next.pieces[hit].status = HOLE_OPEN;
                    record(&mut deltas, &next.pieces, hit);
                    next.pieces[moving].x = x;
                    next.pieces[moving].y = y;
                    record(&mut deltas, &next.pieces, moving);
                    continue;
                }
                HOLE_OPEN if next.pieces[moving].kind == PieceKind::Coin => {
                    // Only a coin completes the fall: consumed off the
                    // grid, hole filled in place.
                    next.pieces[hit].status = HOLE_FILLED;
                    record(&mut deltas, &next.pieces, hit);
                    next.pieces[moving].x = OFF_BOARD.0;
                    next.pieces[moving].y = OFF_BOARD.1;
                    next.pieces[moving].status = COIN_FALLEN;
                    record(&mut deltas, &next.pieces, moving);
                    break;
                }
                // Open holes stop every other mover beside them; filled
                // holes stop everything.
                _ => break,
            }
        }

        if next.pieces[moving].kind != PieceKind::Player {
            // A pushed piece stops on any other contact; only the player
            // triggers secondary interactions.
            break;
        }

        match next.pieces[hit].kind {
            PieceKind::Stone => break,
            PieceKind::Coin if next.pieces[hit].status == COIN_FALLEN => break,
            PieceKind::Exit => {
                next.pieces[moving].x = x;
                next.pieces[moving].y = y;
                record(&mut deltas, &next.pieces, moving);
                won = true;
                break;
            }
            PieceKind::Box | PieceKind::Coin => {
                // A push needs the cell beyond to be free; the pushed
                // piece then takes over the slide.
                let bx = x + dx;
                let by = y + dy;
                if !next.in_bounds(bx, by) || next.piece_at(bx, by).is_some() {
                    break;
                }
                next.pieces[moving].x = x;
                next.pieces[moving].y = y;
                record(&mut deltas, &next.pieces, moving);
                moving = hit;
                continue;
            }
            PieceKind::Tunnel => {
                let pair = next.pieces[hit].status;
                let other = next
                    .pieces
                    .iter()
                    .enumerate()
                    .find(|&(i, p)| {
                        p.kind == PieceKind::Tunnel && p.status == pair && i != hit
                    })
                    .map(|(i, _)| i);
                // An unpaired tunnel is a dead end.
                let Some(other) = other else { break };
                let tx = next.pieces[other].x + dx;
                let ty = next.pieces[other].y + dy;
                if next.pieces[EXIT].at(tx, ty) {
                    next.pieces[moving].x = tx;
                    next.pieces[moving].y = ty;
                    record(&mut deltas, &next.pieces, moving);
                    won = true;
                    break;
                }
                if next.in_bounds(tx, ty) && next.piece_at(tx, ty).is_none() {
                    next.pieces[moving].x = tx;
                    next.pieces[moving].y = ty;
                    record(&mut deltas, &next.pieces, moving);
                    continue;
                }
                break;
            }
            PieceKind::Bound => {
                let new_dir = bound_reflect(next.pieces[hit].status, dir);
                if new_dir != dir {
                    next.pieces[hit].status ^= 1;
                    record(&mut deltas, &next.pieces, hit);
                }
                let (ndx, ndy) = new_dir.delta();
                let bx = next.pieces[hit].x + ndx;
                let by = next.pieces[hit].y + ndy;
                dir = new_dir;
                if next.pieces[EXIT].at(bx, by) {
                    next.pieces[moving].x = bx;
                    next.pieces[moving].y = by;
                    record(&mut deltas, &next.pieces, moving);
                    won = true;
                    break;
                }
                if next.in_bounds(bx, by) && next.piece_at(bx, by).is_none() {
                    next.pieces[moving].x = bx;
                    next.pieces[moving].y = by;
                    record(&mut deltas, &next.pieces, moving);
                    continue;
                }
                break;
            }
            PieceKind::HalfBound => {
                // A non-reflecting face blocks outright, orientation kept.
                let Some(new_dir) = half_bound_reflect(next.pieces[hit].status, dir) else {
                    break;
                };
                next.pieces[hit].status = (next.pieces[hit].status + 1) % 4;
                record(&mut deltas, &next.pieces, hit);
                let (ndx, ndy) = new_dir.delta();
                let bx = next.pieces[hit].x + ndx;
                let by = next.pieces[hit].y + ndy;
                dir = new_dir;
                if next.pieces[EXIT].at(bx, by) {
                    next.pieces[moving].x = bx;
                    next.pieces[moving].y = by;
                    record(&mut deltas, &next.pieces, moving);
                    won = true;
                    break;
                }
                if next.in_bounds(bx, by) && next.piece_at(bx, by).is_none() {
                    next.pieces[moving].x = bx;
                    next.pieces[moving].y = by;
                    record(&mut deltas, &next.pieces, moving);
                    continue;
                }
                break;
            }
            PieceKind::Cylinder => {
                let status = next.pieces[hit].status;
                if status == CYL_STANDING {
                    // First impact only knocks it over; no motion this turn.
                    next.pieces[hit].status = if dx == 0 { CYL_VERTICAL } else { CYL_HORIZONTAL };
                    record(&mut deltas, &next.pieces, hit);
                    break;
                }
                if (status == CYL_VERTICAL && dy == 0) || (status == CYL_HORIZONTAL && dx == 0) {
                    // Aligned with the free axis: rolls like a pushed box.
                    let bx = x + dx;
                    let by = y + dy;
                    if !next.in_bounds(bx, by) || next.piece_at(bx, by).is_some() {
                        break;
                    }
                    next.pieces[moving].x = x;
                    next.pieces[moving].y = y;
                    record(&mut deltas, &next.pieces, moving);
                    moving = hit;
                    continue;
                }
                break;
            }
            // One player per board and holes were handled above; nothing
            // sane reaches here, and malformed boards just block.
            PieceKind::Player | PieceKind::Hole => break,
        }
    }

    let changed = !deltas.is_empty();
    MoveResult {
        changed,
        won,
        board: next,
        deltas,
    }
}
