//! Weiqi-Rules: the rules of Go as plain functions over board values.
//!
//! Given a board and a proposed move, the crate decides legality, resolves
//! captures, forbids any repeat of an earlier position (positional superko)
//! and computes area scores with komi.
//!
//! ## Modules
//!
//! - [`constants`] - Default board size, komi, scripted opponent thresholds
//! - [`board`] - Board value type
//! - [`group`] - Group and liberty analysis
//! - [`history`] - Position keys and game history
//! - [`rules`] - Move legality and capture resolution
//! - [`scoring`] - Area scoring
//! - [`strategy`] - Pluggable move selection, including a random player
//! - [`game`] - Game session: turns, passes, undo, result
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use weiqi_rules::board::{create_board, Color};
//! use weiqi_rules::history::History;
//! use weiqi_rules::rules::apply_move;
//! use weiqi_rules::scoring::score;
//!
//! let board = create_board(9);
//! let mut history = History::starting_from(&board);
//!
//! let out = apply_move(&board, (4, 4), Color::Black, &history).unwrap();
//! history.push(out.key);
//!
//! let s = score(&out.board);
//! assert_eq!(s.black, 81.0);
//! ```

pub mod board;
pub mod constants;
pub mod game;
pub mod group;
pub mod gtp;
pub mod history;
pub mod rules;
pub mod scoring;
pub mod strategy;
