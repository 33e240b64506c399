//! Position keys and game history.
//!
//! A [`PositionKey`] is a canonical encoding of board contents only. Two
//! boards get the same key exactly when they have the same size and the same
//! stone on every point, whatever sequence of moves led there. The rules code
//! looks keys up through [`SeenPositions`] to enforce positional superko.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::board::{Board, Color};

const KEY_EMPTY: u8 = b'.';
const KEY_BLACK: u8 = b'X';
const KEY_WHITE: u8 = b'O';

/// Canonical encoding of a board: its size followed by one byte per point.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey {
    size: usize,
    cells: Vec<u8>,
}

/// Encode a board into its position key.
pub fn encode(board: &Board) -> PositionKey {
    let cells = board
        .cells()
        .iter()
        .map(|cell| match cell {
            None => KEY_EMPTY,
            Some(Color::Black) => KEY_BLACK,
            Some(Color::White) => KEY_WHITE,
        })
        .collect();
    PositionKey {
        size: board.size(),
        cells,
    }
}

impl PositionKey {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }
}

impl fmt::Display for PositionKey {
    /// Rows separated by `|`, e.g. `X..|.O.|...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.size.max(1)).enumerate() {
            if i > 0 {
                write!(f, "|")?;
            }
            for &b in row {
                write!(f, "{}", b as char)?;
            }
        }
        Ok(())
    }
}

/// Anything that can answer "has this position occurred before?".
pub trait SeenPositions {
    fn has_seen(&self, key: &PositionKey) -> bool;
}

impl SeenPositions for [PositionKey] {
    fn has_seen(&self, key: &PositionKey) -> bool {
        self.contains(key)
    }
}

impl SeenPositions for Vec<PositionKey> {
    fn has_seen(&self, key: &PositionKey) -> bool {
        self.as_slice().has_seen(key)
    }
}

impl SeenPositions for HashSet<PositionKey> {
    fn has_seen(&self, key: &PositionKey) -> bool {
        self.contains(key)
    }
}

/// Ordered history of the positions reached in one game.
///
/// Keeps the keys in order for undo and a hashed count of each key so
/// superko lookups do not scan the whole game.
#[derive(Clone, Debug, Default)]
pub struct History {
    keys: Vec<PositionKey>,
    seen: HashMap<PositionKey, usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History whose only entry is `board`, typically the empty start position.
    pub fn starting_from(board: &Board) -> Self {
        let mut history = Self::new();
        history.push(encode(board));
        history
    }

    pub fn push(&mut self, key: PositionKey) {
        *self.seen.entry(key.clone()).or_insert(0) += 1;
        self.keys.push(key);
    }

    /// Remove and return the most recent key.
    pub fn pop(&mut self) -> Option<PositionKey> {
        let key = self.keys.pop()?;
        if let Some(count) = self.seen.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.seen.remove(&key);
            }
        }
        Some(key)
    }

    pub fn contains(&self, key: &PositionKey) -> bool {
        self.seen.contains_key(key)
    }

    pub fn last(&self) -> Option<&PositionKey> {
        self.keys.last()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionKey> {
        self.keys.iter()
    }
}

impl SeenPositions for History {
    fn has_seen(&self, key: &PositionKey) -> bool {
        self.contains(key)
    }
}
