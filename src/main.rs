//! weiqi: Go rules engine front-end.
//!
//! ## Usage
//!
//! - `weiqi` - Show a demo
//! - `weiqi gtp` - Start GTP server for GUI integration
//! - `weiqi demo` - Walk through captures, superko and scoring
//! - `weiqi selfplay` - Let two random players finish a game

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use weiqi_rules::board::{Board, Color};
use weiqi_rules::constants::{max_game_len, MAX_BOARD_SIZE, N};
use weiqi_rules::game::Game;
use weiqi_rules::gtp::{format_vertex, GtpEngine};
use weiqi_rules::history::History;
use weiqi_rules::rules::apply_move;
use weiqi_rules::scoring::score;
use weiqi_rules::strategy::{Decision, MoveSelector, RandomSelector};

/// weiqi: Go rules engine with area scoring and positional superko
#[derive(Parser)]
#[command(name = "weiqi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins if set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp {
        /// Board size
        #[arg(long, default_value_t = N)]
        size: usize,
        /// Seed for the move generator
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a short scripted demo of the rules
    Demo,
    /// Play a game between two random players and print the result
    Selfplay {
        /// Board size
        #[arg(long, default_value_t = N)]
        size: usize,
        /// Seed for both players
        #[arg(long)]
        seed: Option<u64>,
        /// Stop after this many turns if the game has not ended [default: 3 * size * size]
        #[arg(long)]
        max_moves: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Commands::Gtp { size, seed }) => {
            check_size(size)?;
            let mut engine = GtpEngine::with_selector(size, selector(seed));
            engine.run()
        }
        Some(Commands::Selfplay {
            size,
            seed,
            max_moves,
        }) => {
            check_size(size)?;
            run_selfplay(size, seed, max_moves.unwrap_or(max_game_len(size)))
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

/// Logs go to stderr so GTP responses on stdout stay clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn check_size(size: usize) -> Result<()> {
    if !(1..=MAX_BOARD_SIZE).contains(&size) {
        anyhow::bail!("board size must be between 1 and {MAX_BOARD_SIZE}, got {size}");
    }
    Ok(())
}

fn selector(seed: Option<u64>) -> RandomSelector {
    match seed {
        Some(seed) => RandomSelector::with_seed(seed),
        None => RandomSelector::new(),
    }
}

fn run_demo() -> Result<()> {
    println!("weiqi: Go rules engine\n");

    // Demo 1: capture in the corner
    println!("=== Capture ===");
    let board = Board::from_rows(&[
        "XO...",
        ".....",
        ".....",
        ".....",
        ".....",
    ])
    .context("demo board")?;
    let history = History::starting_from(&board);
    let out = apply_move(&board, (1, 0), Color::White, &history)?;
    println!("{board}White plays (1,0), capturing {}:", out.captured);
    println!("{}", out.board);

    // Demo 2: ko recapture blocked by superko
    println!("=== Superko ===");
    let board = Board::from_rows(&[
        ".XO..",
        "XO.O.",
        ".XO..",
        ".....",
        ".....",
    ])
    .context("demo board")?;
    let mut history = History::starting_from(&board);
    let take = apply_move(&board, (1, 2), Color::Black, &history)?;
    history.push(take.key.clone());
    println!("{board}Black takes the ko at (1,2):");
    println!("{}", take.board);
    match apply_move(&take.board, (1, 1), Color::White, &history) {
        Ok(_) => println!("White retakes at (1,1)"),
        Err(e) => println!("White retakes at (1,1): {e}\n"),
    }

    // Demo 3: area scoring
    println!("=== Scoring ===");
    let board = Board::from_rows(&[
        "..XO.",
        "..XO.",
        "..XO.",
        "..XO.",
        "..XO.",
    ])
    .context("demo board")?;
    let s = score(&board);
    println!("{board}Black {} - White {} ({s})", s.black, s.white);
    Ok(())
}

fn run_selfplay(size: usize, seed: Option<u64>, max_moves: usize) -> Result<()> {
    let mut game = Game::new(size);
    let mut black = selector(seed);
    let mut white = selector(seed.map(|s| s.wrapping_add(1)));

    for _ in 0..max_moves {
        if game.is_over() {
            break;
        }
        let color = game.to_move();
        let player = match color {
            Color::Black => &mut black,
            Color::White => &mut white,
        };
        let decision = player.select_move(
            game.board(),
            color,
            game.history(),
            game.captures(color.opponent()),
        );
        game.apply_decision(decision)?;
        if let Decision::Play(pt) = decision {
            tracing::debug!(%color, vertex = %format_vertex(pt, size), "selfplay move");
        }
    }

    println!("{}", game.board());
    println!(
        "Moves: {}  Captures: black {} white {}",
        game.moves_played(),
        game.captures(Color::Black),
        game.captures(Color::White)
    );
    match game.result() {
        Some(result) => println!("Result: {result}"),
        None => println!("Stopped after {max_moves} turns, current score: {}", game.score()),
    }
    Ok(())
}
