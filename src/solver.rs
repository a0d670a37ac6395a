use std::collections::VecDeque;

use arrayvec::ArrayVec;
use log::debug;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::board::{Board, Direction, StateKey, DIRECTIONS};
use crate::engine::resolve_move;

pub type DirPath = SmallVec<[Direction; 24]>;

/// A frontier node: a reachable board plus the directions that got there.
#[derive(Clone, Debug)]
pub struct SearchStep {
    pub board: Board,
    pub path: DirPath,
}

/// Outcome of a budgeted search. An exhausted budget says nothing about
/// solvability; it only means the host was not willing to look further.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SearchResult {
    Solved(DirPath),
    Unsolvable,
    OutOfBudget,
}

/// Breadth-first search for a winning direction sequence.
///
/// States are deduplicated by canonical key, so the search terminates on
/// the finite state space. The first win found is a shortest solution:
/// BFS explores by increasing path length and ties break by the fixed
/// direction order. `None` is the normal unsolvable outcome, not an error.
pub fn solve(board: &Board) -> Option<DirPath> {
    match solve_with_budget(board, u64::MAX) {
        SearchResult::Solved(path) => Some(path),
        SearchResult::Unsolvable => None,
        // Unreachable with an effectively infinite budget; the state
        // space itself is finite.
        SearchResult::OutOfBudget => None,
    }
}

/// [`solve`] with a cap on expanded states, for hosts that cannot afford
/// an unbounded search. The state space grows combinatorially with piece
/// count, so interactive callers want a ceiling.
pub fn solve_with_budget(board: &Board, max_states: u64) -> SearchResult {
    let mut frontier: VecDeque<SearchStep> = VecDeque::new();
    let mut seen: FxHashSet<StateKey> = FxHashSet::default();
    seen.insert(board.state_key());
    frontier.push_back(SearchStep {
        board: board.clone(),
        path: DirPath::new(),
    });

    let mut expanded = 0u64;
    while let Some(step) = frontier.pop_front() {
        if expanded == max_states {
            debug!("search stopped at the {max_states}-state budget");
            return SearchResult::OutOfBudget;
        }
        expanded += 1;
        let (solution, next_steps) = expand(&step);
        if let Some(path) = solution {
            debug!("solved in {} moves after {expanded} states", path.len());
            return SearchResult::Solved(path);
        }
        for next in next_steps {
            if seen.insert(next.board.state_key()) {
                frontier.push_back(next);
            }
        }
    }

    debug!("exhausted {expanded} states without a win");
    SearchResult::Unsolvable
}

/// Try all four directions from one node, in the order that decides
/// tie-breaks. Returns either a winning path or the successors to enqueue;
/// no-op moves produce neither.
fn expand(step: &SearchStep) -> (Option<DirPath>, ArrayVec<SearchStep, 4>) {
    let mut next_steps = ArrayVec::new();
    for dir in DIRECTIONS {
        let result = resolve_move(&step.board, dir);
        if !result.changed {
            continue;
        }
        let mut path = step.path.clone();
        path.push(dir);
        if result.won {
            return (Some(path), ArrayVec::new());
        }
        next_steps.push(SearchStep {
            board: result.board,
            path,
        });
    }
    (None, next_steps)
}
