//! Move selection for computer players.
//!
//! Selection sits entirely outside the rules: a selector proposes moves and
//! checks them with [`apply_move`] on a copy of the board, discarding any the
//! rules reject.

use tracing::debug;

use crate::board::{Board, Color, Point};
use crate::constants::{PASS_AT_CAPTURES, RESIGN_AT_CAPTURES};
use crate::history::SeenPositions;
use crate::rules::apply_move;

/// What a player chooses to do on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Play(Point),
    Pass,
    Resign,
}

/// A pluggable move-selection policy.
pub trait MoveSelector {
    /// Choose an action for `color`. `opponent_captures` is how many of
    /// `color`'s stones the opponent has captured so far.
    fn select_move(
        &mut self,
        board: &Board,
        color: Color,
        history: &dyn SeenPositions,
        opponent_captures: u32,
    ) -> Decision;
}

/// Uniformly random legal moves, with scripted pass and resign thresholds.
pub struct RandomSelector {
    rng: fastrand::Rng,
    pass_at: Vec<u32>,
    resign_at: Option<u32>,
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSelector {
    /// Random selector with the default thresholds.
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    /// Deterministic selector for reproducible games and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            rng,
            pass_at: PASS_AT_CAPTURES.to_vec(),
            resign_at: Some(RESIGN_AT_CAPTURES),
        }
    }

    /// Replace the scripted thresholds. An empty `pass_at` and `None` give a
    /// plain random player.
    pub fn thresholds(mut self, pass_at: &[u32], resign_at: Option<u32>) -> Self {
        self.pass_at = pass_at.to_vec();
        self.resign_at = resign_at;
        self
    }
}

impl MoveSelector for RandomSelector {
    fn select_move(
        &mut self,
        board: &Board,
        color: Color,
        history: &dyn SeenPositions,
        opponent_captures: u32,
    ) -> Decision {
        if self.resign_at.is_some_and(|limit| opponent_captures >= limit) {
            debug!(%color, opponent_captures, "resigning");
            return Decision::Resign;
        }
        if self.pass_at.contains(&opponent_captures) {
            debug!(%color, opponent_captures, "scripted pass");
            return Decision::Pass;
        }

        let mut candidates = board.empty_points();
        self.rng.shuffle(&mut candidates);
        candidates
            .into_iter()
            .find(|&pt| apply_move(board, pt, color, history).is_ok())
            .map_or(Decision::Pass, Decision::Play)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{encode, History};
    use crate::rules::is_legal;

    #[test]
    fn test_random_move_is_legal() {
        let board = Board::from_rows(&[".X.", "X..", "..."]).unwrap();
        let history = History::starting_from(&board);
        let mut selector = RandomSelector::with_seed(7);
        for _ in 0..20 {
            match selector.select_move(&board, Color::White, &history, 0) {
                Decision::Play(pt) => assert!(is_legal(&board, pt, Color::White, &history)),
                other => panic!("expected a move, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let board = Board::new(9);
        let history = History::starting_from(&board);
        let a = RandomSelector::with_seed(42).select_move(&board, Color::Black, &history, 0);
        let b = RandomSelector::with_seed(42).select_move(&board, Color::Black, &history, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_scripted_pass_and_resign() {
        let board = Board::new(9);
        let history = History::starting_from(&board);
        let mut selector = RandomSelector::with_seed(1);
        assert_eq!(selector.select_move(&board, Color::White, &history, 10), Decision::Pass);
        assert_eq!(selector.select_move(&board, Color::White, &history, 20), Decision::Pass);
        assert_eq!(selector.select_move(&board, Color::White, &history, 30), Decision::Resign);
        assert_eq!(selector.select_move(&board, Color::White, &history, 45), Decision::Resign);
        assert!(matches!(
            selector.select_move(&board, Color::White, &history, 11),
            Decision::Play(_)
        ));
    }

    #[test]
    fn test_plain_random_never_passes_on_threshold() {
        let board = Board::new(5);
        let history = vec![encode(&board)];
        let mut selector = RandomSelector::with_seed(3).thresholds(&[], None);
        assert!(matches!(
            selector.select_move(&board, Color::Black, &history, 10),
            Decision::Play(_)
        ));
    }

    #[test]
    fn test_passes_when_no_legal_move() {
        // Every empty point is suicide for White.
        let board = Board::from_rows(&[".X", "X."]).unwrap();
        let history = History::starting_from(&board);
        let mut selector = RandomSelector::with_seed(9);
        assert_eq!(selector.select_move(&board, Color::White, &history, 0), Decision::Pass);
    }
}
