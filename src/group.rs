//! Group and liberty analysis.
//!
//! A group is the maximal set of same-colored stones connected through
//! orthogonal adjacency. Its liberties are the distinct empty points next to
//! any of its stones.

use std::collections::BTreeSet;

use crate::board::{Board, Color, Point};

/// A connected group of stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    pub stones: BTreeSet<Point>,
    pub liberties: BTreeSet<Point>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn is_captured(&self) -> bool {
        self.liberties.is_empty()
    }

    pub fn contains(&self, pt: Point) -> bool {
        self.stones.contains(&pt)
    }
}

/// Flood-fill from `seed` to find its group and liberties.
///
/// Returns `None` when `seed` is off the board or empty; the seed must hold a
/// stone.
pub fn find_group_and_liberties(board: &Board, seed: Point) -> Option<Group> {
    let color = board.get(seed)?;
    let mut visited = vec![false; board.size() * board.size()];
    let mut stones = BTreeSet::new();
    let mut liberties = BTreeSet::new();
    let mut stack = vec![seed];
    visited[board.idx(seed)] = true;

    while let Some(pt) = stack.pop() {
        stones.insert(pt);
        for n in board.neighbors(pt) {
            match board.get(n) {
                None => {
                    liberties.insert(n);
                }
                Some(c) if c == color => {
                    let i = board.idx(n);
                    if !visited[i] {
                        visited[i] = true;
                        stack.push(n);
                    }
                }
                Some(_) => {}
            }
        }
    }

    Some(Group {
        color,
        stones,
        liberties,
    })
}
