//! Go Text Protocol (GTP) front-end.
//!
//! Lets a graphical client such as Sabaki or GoGui drive a [`Game`], with
//! the random [`RandomSelector`] answering `genmove`.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - start a new game on a `size`x`size` board
//! - `clear_board` - start a new game on the current size
//! - `komi <value>` - only 6.5 is accepted
//! - `play <color> <vertex>` - play a stone or `pass` for the side to move
//! - `genmove <color>` - let the engine choose and play a move
//! - `undo` - take back the last stone
//! - `final_score` - score of the current board, e.g. `W+6.5`
//! - `showboard` - text diagram of the board
//!
//! ## Example
//!
//! ```ignore
//! use weiqi_rules::gtp::GtpEngine;
//! let mut engine = GtpEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use crate::board::{Color, Point};
use crate::constants::{KOMI, MAX_BOARD_SIZE, N};
use crate::game::{Game, GameResult};
use crate::strategy::{Decision, MoveSelector, RandomSelector};

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "clear_board",
    "final_score",
    "genmove",
    "known_command",
    "komi",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// Column letters in GTP order (no `I`).
const COLUMNS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// GTP engine state.
pub struct GtpEngine {
    game: Game,
    selector: RandomSelector,
}

impl Default for GtpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GtpEngine {
    /// Engine on the default board size.
    pub fn new() -> Self {
        Self::with_selector(N, RandomSelector::new())
    }

    pub fn with_selector(size: usize, selector: RandomSelector) -> Self {
        Self {
            game: Game::new(size),
            selector,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the GTP command loop on stdin/stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the GTP command loop until `quit` or end of input.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("reading GTP input")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            debug!(%command, ?args, "gtp command");
            let (prefix, message) = match self.execute(&command, args) {
                Ok(message) => ('=', message),
                Err(e) => ('?', e.to_string()),
            };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end > 0 {
            if let Ok(id) = trimmed[..end].parse::<u32>() {
                return (Some(id), trimmed[end..].trim());
            }
        }
        (None, trimmed)
    }

    /// Execute a GTP command and return the success response.
    fn execute(&mut self, command: &str, args: &[&str]) -> Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("2".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = first_arg(args)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(if known { "true" } else { "false" }.to_string())
            }

            "quit" => Ok(String::new()),

            "boardsize" => {
                let size: usize = first_arg(args)?.parse().context("invalid size")?;
                if !(1..=MAX_BOARD_SIZE).contains(&size) {
                    bail!("unacceptable size");
                }
                self.game = Game::new(size);
                Ok(String::new())
            }

            "clear_board" => {
                self.game = Game::new(self.game.board().size());
                Ok(String::new())
            }

            "komi" => {
                let komi: f64 = first_arg(args)?.parse().context("invalid komi")?;
                if komi != KOMI {
                    bail!("only komi {KOMI} is supported (got {komi})");
                }
                Ok(String::new())
            }

            "play" => {
                if args.len() < 2 {
                    bail!("missing arguments");
                }
                self.expect_turn(parse_color(args[0])?)?;
                match parse_vertex(args[1], self.game.board().size())? {
                    None => self.game.pass()?,
                    Some(pt) => {
                        self.game.play(pt)?;
                    }
                }
                Ok(String::new())
            }

            "genmove" => {
                let color = parse_color(first_arg(args)?)?;
                self.expect_turn(color)?;
                let opponent_captures = self.game.captures(color.opponent());
                let decision = self.selector.select_move(
                    self.game.board(),
                    color,
                    self.game.history(),
                    opponent_captures,
                );
                self.game.apply_decision(decision)?;
                Ok(match decision {
                    Decision::Play(pt) => format_vertex(pt, self.game.board().size()),
                    Decision::Pass => "pass".to_string(),
                    Decision::Resign => "resign".to_string(),
                })
            }

            "undo" => {
                self.game.undo()?;
                Ok(String::new())
            }

            "final_score" => Ok(match self.game.result() {
                Some(result @ GameResult::Resigned { .. }) => result.to_string(),
                _ => self.game.score().to_string(),
            }),

            "showboard" => Ok(format!("\n{}", self.game.board().to_string().trim_end())),

            _ => Err(anyhow!("unknown command: {command}")),
        }
    }

    /// Play is strictly alternating; a GTP color must match the side to move.
    /// Out-of-turn `play` (e.g. handicap setup) is not supported.
    fn expect_turn(&self, color: Color) -> Result<()> {
        let to_move = self.game.to_move();
        if color != to_move {
            bail!(
                "out-of-turn {color} move not supported, \
                 engine plays strictly alternating: {to_move} to move"
            );
        }
        Ok(())
    }
}

fn first_arg<'a>(args: &[&'a str]) -> Result<&'a str> {
    args.first().copied().context("missing argument")
}

fn parse_color(s: &str) -> Result<Color> {
    match s.to_lowercase().as_str() {
        "b" | "black" => Ok(Color::Black),
        "w" | "white" => Ok(Color::White),
        _ => bail!("invalid color: {s}"),
    }
}

/// Parse a GTP vertex such as `D4` or `pass`. Rows count up from the bottom.
///
/// Returns `None` for a pass.
pub fn parse_vertex(s: &str, size: usize) -> Result<Option<Point>> {
    if s.eq_ignore_ascii_case("pass") {
        return Ok(None);
    }
    let mut chars = s.chars();
    let letter = chars.next().context("empty vertex")?;
    let letter = u8::try_from(letter.to_ascii_uppercase())
        .map_err(|_| anyhow!("invalid vertex: {s}"))?;
    let col = COLUMNS
        .iter()
        .position(|&c| c == letter)
        .ok_or_else(|| anyhow!("invalid vertex: {s}"))?;
    let number: usize = chars
        .as_str()
        .parse()
        .with_context(|| format!("invalid vertex: {s}"))?;
    if col >= size || number == 0 || number > size {
        bail!("vertex off the board: {s}");
    }
    Ok(Some((size - number, col)))
}

/// Format a point as a GTP vertex.
pub fn format_vertex((row, col): Point, size: usize) -> String {
    format!("{}{}", COLUMNS[col] as char, size - row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(size: usize) -> GtpEngine {
        GtpEngine::with_selector(size, RandomSelector::with_seed(5))
    }

    #[test]
    fn test_parse_id_with_id() {
        let (id, cmd) = GtpEngine::parse_id("123 name");
        assert_eq!(id, Some(123));
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_parse_id_without_id() {
        let (id, cmd) = GtpEngine::parse_id("name");
        assert_eq!(id, None);
        assert_eq!(cmd, "name");
    }

    #[test]
    fn test_vertex_roundtrip_skips_i() {
        assert_eq!(parse_vertex("A1", 19).unwrap(), Some((18, 0)));
        assert_eq!(parse_vertex("j19", 19).unwrap(), Some((0, 8)));
        assert_eq!(parse_vertex("PASS", 19).unwrap(), None);
        assert_eq!(format_vertex((0, 8), 19), "J19");
        assert_eq!(format_vertex((18, 0), 19), "A1");
        assert!(parse_vertex("I5", 19).is_err());
        assert!(parse_vertex("Ł1", 9).is_err());
        assert!(parse_vertex("é1", 9).is_err());
        assert!(parse_vertex("K10", 9).is_err());
        assert!(parse_vertex("A0", 9).is_err());
    }

    #[test]
    fn test_name_and_known_command() {
        let mut engine = engine(9);
        assert_eq!(engine.execute("name", &[]).unwrap(), "weiqi-rules");
        assert_eq!(engine.execute("protocol_version", &[]).unwrap(), "2");
        assert_eq!(engine.execute("known_command", &["undo"]).unwrap(), "true");
        assert_eq!(engine.execute("known_command", &["loadsgf"]).unwrap(), "false");
        assert!(engine.execute("loadsgf", &[]).is_err());
    }

    #[test]
    fn test_boardsize_and_komi() {
        let mut engine = engine(9);
        assert!(engine.execute("boardsize", &["13"]).is_ok());
        assert_eq!(engine.game().board().size(), 13);
        assert!(engine.execute("boardsize", &["0"]).is_err());
        assert!(engine.execute("komi", &["6.5"]).is_ok());
        assert!(engine.execute("komi", &["7.5"]).is_err());
    }

    #[test]
    fn test_play_undo_and_clear() {
        let mut engine = engine(9);
        assert!(engine.execute("play", &["black", "D4"]).is_ok());
        assert_eq!(engine.game().board().get((5, 3)), Some(Color::Black));
        let err = engine.execute("play", &["black", "E5"]).unwrap_err();
        assert!(err.to_string().contains("strictly alternating"), "{err}");
        assert!(err.to_string().contains("white to move"), "{err}");
        let err = engine.execute("genmove", &["b"]).unwrap_err();
        assert!(err.to_string().contains("out-of-turn black"), "{err}");
        assert!(engine.execute("play", &["white", "D4"]).is_err(), "occupied");

        assert!(engine.execute("undo", &[]).is_ok());
        assert_eq!(engine.game().board().get((5, 3)), None);

        engine.execute("play", &["b", "C3"]).unwrap();
        assert!(engine.execute("clear_board", &[]).is_ok());
        assert_eq!(engine.game().moves_played(), 0);
    }

    #[test]
    fn test_genmove_plays_for_color() {
        let mut engine = engine(9);
        let vertex = engine.execute("genmove", &["b"]).unwrap();
        let pt = parse_vertex(&vertex, 9).unwrap().unwrap();
        assert_eq!(engine.game().board().get(pt), Some(Color::Black));
        assert_eq!(engine.game().to_move(), Color::White);
    }

    #[test]
    fn test_serve_session() {
        let mut engine = engine(9);
        let input = "1 play b pass\n2 play w pass\n3 final_score\nquit\nname\n";
        let mut output = Vec::new();
        engine.serve(input.as_bytes(), &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "=1 \n\n=2 \n\n=3 W+6.5\n\n= \n\n");
        assert!(engine.game().is_over());
    }
}
