//! Game session: turn order, capture tallies, passes, undo and game end.
//!
//! The rules in [`crate::rules`] are stateless. A [`Game`] owns everything
//! they leave to the caller: the current board, the position history used
//! for superko, whose turn it is, and how the game ended.

use tracing::info;

use crate::board::{create_board, Board, Color, Point};
use crate::history::History;
use crate::rules::{apply_move, MoveError};
use crate::scoring::{score, Score};
use crate::strategy::Decision;

/// Why an action on a [`Game`] was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// The rules rejected the move
    Illegal(MoveError),
    /// The game already ended
    GameOver,
    /// There is no move to take back
    NothingToUndo,
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Illegal(e) => write!(f, "{e}"),
            GameError::GameOver => write!(f, "game is already over"),
            GameError::NothingToUndo => write!(f, "no move to undo"),
        }
    }
}

impl std::error::Error for GameError {}

impl From<MoveError> for GameError {
    fn from(e: MoveError) -> Self {
        GameError::Illegal(e)
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameResult {
    /// Two consecutive passes; the board was scored
    Scored(Score),
    /// `loser` resigned
    Resigned { loser: Color },
}

impl GameResult {
    pub fn winner(&self) -> Color {
        match self {
            GameResult::Scored(s) => s.winner(),
            GameResult::Resigned { loser } => loser.opponent(),
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Scored(s) => write!(f, "{s}"),
            GameResult::Resigned { loser } => match loser.opponent() {
                Color::Black => write!(f, "B+R"),
                Color::White => write!(f, "W+R"),
            },
        }
    }
}

/// State restored by [`Game::undo`].
#[derive(Debug, Clone)]
struct Snapshot {
    board: Board,
    to_move: Color,
    captures: [u32; 2],
}

/// A game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: History,
    to_move: Color,
    /// Stones captured by Black and by White
    captures: [u32; 2],
    passes: u32,
    undo_stack: Vec<Snapshot>,
    result: Option<GameResult>,
}

impl Game {
    /// New game on an empty `size`x`size` board, Black to move.
    pub fn new(size: usize) -> Self {
        let board = create_board(size);
        let history = History::starting_from(&board);
        Self {
            board,
            history,
            to_move: Color::Black,
            captures: [0, 0],
            passes: 0,
            undo_stack: Vec::new(),
            result: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Number of stones `color` has captured so far.
    pub fn captures(&self, color: Color) -> u32 {
        self.captures[slot(color)]
    }

    /// Consecutive passes since the last stone was played.
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Number of stones played and not undone.
    pub fn moves_played(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Score of the current board, whether or not the game is over.
    pub fn score(&self) -> Score {
        score(&self.board)
    }

    /// Play a stone for the side to move. Returns the number of captures.
    pub fn play(&mut self, pt: Point) -> Result<usize, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let outcome = apply_move(&self.board, pt, self.to_move, &self.history)?;

        self.undo_stack.push(Snapshot {
            board: std::mem::replace(&mut self.board, outcome.board),
            to_move: self.to_move,
            captures: self.captures,
        });
        self.history.push(outcome.key);
        self.captures[slot(self.to_move)] += outcome.captured as u32;
        self.to_move = self.to_move.opponent();
        self.passes = 0;
        Ok(outcome.captured)
    }

    /// Pass for the side to move. The second consecutive pass scores the
    /// board and ends the game.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.passes += 1;
        self.to_move = self.to_move.opponent();
        if self.passes >= 2 {
            let result = GameResult::Scored(self.score());
            info!(%result, "game over after two passes");
            self.result = Some(result);
        }
        Ok(())
    }

    /// `color` resigns; the other side wins.
    pub fn resign(&mut self, color: Color) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let result = GameResult::Resigned { loser: color };
        info!(%result, "game over by resignation");
        self.result = Some(result);
        Ok(())
    }

    /// Take back the last stone played. The starting position cannot be undone.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let snapshot = self.undo_stack.pop().ok_or(GameError::NothingToUndo)?;
        self.history.pop();
        self.board = snapshot.board;
        self.to_move = snapshot.to_move;
        self.captures = snapshot.captures;
        self.passes = 0;
        Ok(())
    }

    /// Carry out a move selector's decision for the side to move.
    pub fn apply_decision(&mut self, decision: Decision) -> Result<(), GameError> {
        match decision {
            Decision::Play(pt) => self.play(pt).map(|_| ()),
            Decision::Pass => self.pass(),
            Decision::Resign => self.resign(self.to_move),
        }
    }
}

fn slot(color: Color) -> usize {
    match color {
        Color::Black => 0,
        Color::White => 1,
    }
}
