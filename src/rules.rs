//! Move legality and capture resolution.
//!
//! [`apply_move`] is the whole rule set for placing a stone:
//!
//! 1. the point must be on the board and empty,
//! 2. opponent groups left without liberties are removed,
//! 3. only then is the mover's own group checked for a liberty (suicide),
//! 4. the resulting position must never have occurred before (positional superko).
//!
//! The input board is never modified. On success the caller gets the new
//! board, the number of stones captured and the key to append to its history.

use std::collections::BTreeSet;

use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::group::find_group_and_liberties;
use crate::history::{encode, PositionKey, SeenPositions};

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Point is not on the board
    OutOfBounds,
    /// Point is not empty
    Occupied,
    /// Move would leave its own group without liberties after captures
    Suicide,
    /// Resulting position already occurred in this game
    Superko,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "illegal move: point off the board"),
            MoveError::Occupied => write!(f, "illegal move: point not empty"),
            MoveError::Suicide => write!(f, "illegal move: suicide"),
            MoveError::Superko => write!(f, "illegal move: repeats an earlier position"),
        }
    }
}

impl std::error::Error for MoveError {}

/// An accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Board after the stone is placed and captures are removed
    pub board: Board,
    /// Opponent stones removed by this move
    pub captured: usize,
    /// Key of `board`, for the caller to append to its history
    pub key: PositionKey,
}

/// Place a `color` stone at `pt` on a copy of `board`.
///
/// `history` holds every earlier position of the game; a move that
/// recreates any of them is rejected, not just an immediate ko recapture.
pub fn apply_move<H>(
    board: &Board,
    pt: Point,
    color: Color,
    history: &H,
) -> Result<MoveOutcome, MoveError>
where
    H: SeenPositions + ?Sized,
{
    if !board.contains(pt) {
        debug!(?pt, %color, "rejected: off the board");
        return Err(MoveError::OutOfBounds);
    }
    if board.get(pt).is_some() {
        debug!(?pt, %color, "rejected: occupied");
        return Err(MoveError::Occupied);
    }

    let mut next = board.with_stone(pt, color);
    let opp = color.opponent();

    // Collect every dead opponent group first, then remove them together.
    let mut checked: BTreeSet<Point> = BTreeSet::new();
    let mut to_remove: Vec<Point> = Vec::new();
    for n in board.neighbors(pt) {
        if next.get(n) != Some(opp) || checked.contains(&n) {
            continue;
        }
        let Some(group) = find_group_and_liberties(&next, n) else {
            continue;
        };
        if group.is_captured() {
            to_remove.extend(group.stones.iter().copied());
        }
        checked.extend(group.stones);
    }
    let captured = to_remove.len();
    for &r in &to_remove {
        next.set(r, None);
    }

    let has_liberty = find_group_and_liberties(&next, pt)
        .is_some_and(|group| !group.is_captured());
    if !has_liberty {
        debug!(?pt, %color, "rejected: suicide");
        return Err(MoveError::Suicide);
    }

    let key = encode(&next);
    if history.has_seen(&key) {
        debug!(?pt, %color, "rejected: superko");
        return Err(MoveError::Superko);
    }

    if captured > 0 {
        debug!(?pt, %color, captured, "captured stones");
    }
    Ok(MoveOutcome {
        board: next,
        captured,
        key,
    })
}

/// Whether `color` may play at `pt`.
pub fn is_legal<H>(board: &Board, pt: Point, color: Color, history: &H) -> bool
where
    H: SeenPositions + ?Sized,
{
    apply_move(board, pt, color, history).is_ok()
}

/// Every point `color` may legally play, in row-major order.
pub fn legal_moves<H>(board: &Board, color: Color, history: &H) -> Vec<Point>
where
    H: SeenPositions + ?Sized,
{
    board
        .empty_points()
        .into_iter()
        .filter(|&pt| is_legal(board, pt, color, history))
        .collect()
}
