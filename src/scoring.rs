//! Area scoring (Chinese rules).
//!
//! Each stone on the board is a point for its color. Each maximal region of
//! empty points is territory for a color only when every stone bordering it
//! has that color; regions touching both colors, or none, are neutral.
//! [`KOMI`] is added once to White.

use std::fmt;

use tracing::trace;

use crate::board::{Board, Color, Point};
use crate::constants::KOMI;

/// Final totals for both colors. `white` includes komi.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub black: f64,
    pub white: f64,
}

impl Score {
    /// Black wins only on a strictly higher total.
    pub fn winner(&self) -> Color {
        if self.black > self.white {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Absolute point difference between the two totals.
    pub fn margin(&self) -> f64 {
        (self.black - self.white).abs()
    }
}

impl fmt::Display for Score {
    /// GTP style result, e.g. `B+3.5` or `W+6.5`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.winner() {
            Color::Black => 'B',
            Color::White => 'W',
        };
        write!(f, "{prefix}+{:.1}", self.margin())
    }
}

/// An empty region and the single color that owns it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    points: Vec<Point>,
    owner: Option<Color>,
}

/// Flood-fill the empty region containing `start`.
///
/// `visited` is shared across calls during one board scan so each empty
/// point lands in exactly one region.
fn flood_region(board: &Board, start: Point, visited: &mut [bool]) -> Region {
    let mut points = Vec::new();
    let mut borders_black = false;
    let mut borders_white = false;
    let mut stack = vec![start];
    visited[board.idx(start)] = true;

    while let Some(pt) = stack.pop() {
        points.push(pt);
        for n in board.neighbors(pt) {
            match board.get(n) {
                Some(Color::Black) => borders_black = true,
                Some(Color::White) => borders_white = true,
                None => {
                    let i = board.idx(n);
                    if !visited[i] {
                        visited[i] = true;
                        stack.push(n);
                    }
                }
            }
        }
    }

    let owner = match (borders_black, borders_white) {
        (true, false) => Some(Color::Black),
        (false, true) => Some(Color::White),
        _ => None,
    };
    Region { points, owner }
}

/// Stones plus owned territory for each color, without komi.
pub fn area(board: &Board) -> (usize, usize) {
    let mut black = 0;
    let mut white = 0;
    let mut visited = vec![false; board.size() * board.size()];

    for pt in board.points() {
        match board.get(pt) {
            Some(Color::Black) => black += 1,
            Some(Color::White) => white += 1,
            None if !visited[board.idx(pt)] => {
                let region = flood_region(board, pt, &mut visited);
                trace!(?pt, size = region.points.len(), owner = ?region.owner, "empty region");
                match region.owner {
                    Some(Color::Black) => black += region.points.len(),
                    Some(Color::White) => white += region.points.len(),
                    None => {}
                }
            }
            None => {}
        }
    }
    (black, white)
}

/// Score a finished board.
pub fn score(board: &Board) -> Score {
    let (black, white) = area(board);
    Score {
        black: black as f64,
        white: white as f64 + KOMI,
    }
}
