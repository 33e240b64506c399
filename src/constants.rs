//! Constants for board dimensions, scoring, and the scripted opponent.
//!
//! # Board Size Configuration
//!
//! The default board size is controlled by Cargo features:
//! - `board19x19` (default): 19x19 board
//! - `board13x13`: 13x13 board
//! - `board9x9`: 9x9 board
//!
//! ```sh
//! cargo build                                              # 19x19 (default)
//! cargo build --no-default-features --features board9x9    # 9x9
//! ```
//!
//! The rules themselves work on any size; this only picks what a new game
//! starts with when nothing else is requested.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN).
#[cfg(feature = "board19x19")]
pub const N: usize = 19;

#[cfg(feature = "board13x13")]
pub const N: usize = 13;

#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(any(
    all(feature = "board9x9", feature = "board13x13"),
    all(feature = "board9x9", feature = "board19x19"),
    all(feature = "board13x13", feature = "board19x19"),
))]
compile_error!("Enable only one of 'board9x9', 'board13x13' and 'board19x19'");

#[cfg(not(any(feature = "board9x9", feature = "board13x13", feature = "board19x19")))]
compile_error!("Must enable exactly one board size feature: 'board9x9', 'board13x13' or 'board19x19'");

/// Largest board the GTP front-end accepts (the vertex alphabet stops at T).
pub const MAX_BOARD_SIZE: usize = 25;

// =============================================================================
// Scoring
// =============================================================================

/// Komi added once to White's area total.
pub const KOMI: f64 = 6.5;

// =============================================================================
// Scripted Opponent
// =============================================================================

/// Capture counts (stones lost by the scripted player) at which it passes.
pub const PASS_AT_CAPTURES: [u32; 2] = [10, 20];

/// Capture count at or above which the scripted player resigns.
pub const RESIGN_AT_CAPTURES: u32 = 30;

/// Turn cap for self-play on a `size`x`size` board so a random game always terminates.
pub const fn max_game_len(size: usize) -> usize {
    size * size * 3
}
