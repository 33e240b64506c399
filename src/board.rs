//! Board model: a square grid of empty, black, or white points.
//!
//! A [`Board`] is a plain value. Rules code never mutates a board it was
//! handed; it clones, edits the copy, and returns the copy.

use std::fmt;

/// Stone color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-character form used by the text rendering.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'X',
            Color::White => 'O',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// A point on the board as `(row, col)`, both zero-based.
pub type Point = (usize, usize);

/// An NxN Go board. Empty points are `None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

/// Create an empty board of the given size.
pub fn create_board(size: usize) -> Board {
    Board::new(size)
}

impl Board {
    /// # Panics
    /// Panics if `size` is zero. A zero-sized board is a caller error.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from text rows: `X`/`B` black, `O`/`W` white, `.`/`+` empty.
    /// Whitespace inside a row is ignored.
    ///
    /// Returns `None` if the rows do not form a non-empty square or contain
    /// any other character.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if size == 0 {
            return None;
        }
        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let mut col = 0;
            for ch in line.chars().filter(|c| !c.is_whitespace()) {
                if col >= size {
                    return None;
                }
                let cell = match ch {
                    'X' | 'B' => Some(Color::Black),
                    'O' | 'W' => Some(Color::White),
                    '.' | '+' => None,
                    _ => return None,
                };
                board.set((row, col), cell);
                col += 1;
            }
            if col != size {
                return None;
            }
        }
        Some(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn contains(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    #[inline]
    pub(crate) fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    /// Color at a point. Out-of-bounds points read as empty.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.contains(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.contains(pt) && self.cells[self.idx(pt)].is_none()
    }

    pub(crate) fn set(&mut self, pt: Point, cell: Option<Color>) {
        let i = self.idx(pt);
        self.cells[i] = cell;
    }

    /// Copy of this board with one extra stone. Does not resolve captures.
    pub fn with_stone(&self, pt: Point, color: Color) -> Board {
        let mut next = self.clone();
        next.set(pt, Some(color));
        next
    }

    /// The up-to-four orthogonal neighbors of `pt` that lie on the board.
    pub fn neighbors(&self, (row, col): Point) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        [
            (row > 0).then(|| (row - 1, col)),
            (row + 1 < s).then_some((row + 1, col)),
            (col > 0).then(|| (row, col - 1)),
            (col + 1 < s).then_some((row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Every point in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let s = self.size;
        (0..s).flat_map(move |row| (0..s).map(move |col| (row, col)))
    }

    /// Raw cells in row-major order.
    pub fn cells(&self) -> &[Option<Color>] {
        &self.cells
    }

    pub fn stone_count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == Some(color)).count()
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.points().filter(|&pt| self.get(pt).is_none()).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get((row, col)) {
                    Some(color) => color.symbol(),
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = create_board(19);
        assert_eq!(board.size(), 19);
        assert!(board.points().all(|pt| board.get(pt).is_none()));
        assert_eq!(board.points().count(), 361);
    }

    #[test]
    fn test_neighbors_corner_edge_center() {
        let board = Board::new(9);
        assert_eq!(board.neighbors((0, 0)).count(), 2);
        assert_eq!(board.neighbors((0, 4)).count(), 3);
        assert_eq!(board.neighbors((4, 4)).count(), 4);
        assert_eq!(board.neighbors((8, 8)).count(), 2);

        let mut around: Vec<Point> = board.neighbors((4, 4)).collect();
        around.sort();
        assert_eq!(around, vec![(3, 4), (4, 3), (4, 5), (5, 4)]);
    }

    #[test]
    fn test_out_of_bounds_reads_empty() {
        let board = Board::new(5);
        assert!(!board.contains((5, 0)));
        assert_eq!(board.get((5, 0)), None);
        assert!(!board.is_empty_at((0, 5)));
    }

    #[test]
    fn test_with_stone_leaves_original_untouched() {
        let board = Board::new(5);
        let next = board.with_stone((2, 3), Color::White);
        assert_eq!(board.get((2, 3)), None);
        assert_eq!(next.get((2, 3)), Some(Color::White));
        assert_ne!(board, next);
    }

    #[test]
    fn test_from_rows_and_display() {
        let board = Board::from_rows(&["X.O", ". . .", "OOX"]).unwrap();
        assert_eq!(board.get((0, 0)), Some(Color::Black));
        assert_eq!(board.get((0, 2)), Some(Color::White));
        assert_eq!(board.stone_count(Color::White), 3);
        assert_eq!(board.stone_count(Color::Black), 2);
        assert_eq!(board.to_string(), "X . O \n. . . \nO O X \n");
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Board::from_rows(&[]).is_none());
        assert!(Board::from_rows(&["X.", "..."]).is_none());
        assert!(Board::from_rows(&["X?", ".."]).is_none());
        assert!(Board::from_rows(&["X..", "..."]).is_none());
    }
}
