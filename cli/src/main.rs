use std::io::{self, BufRead, Write};

use anyhow::{Context, ensure};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use sweeper_core::{
    AiMove, CellCount, Coord, Difficulty, Game, GameConfig, STANDARD_SIDE, SafeZone,
};

use crate::command::{Command, parse_command};
use crate::render::{render_board, render_outcome, render_status};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum AiTier {
    Easy,
    Medium,
    Hard,
}

impl From<AiTier> for Difficulty {
    fn from(tier: AiTier) -> Self {
        match tier {
            AiTier::Easy => Difficulty::Easy,
            AiTier::Medium => Difficulty::Medium,
            AiTier::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of mines (10 to 20 on the standard board)
    #[arg(short, long, default_value_t = 10)]
    mines: CellCount,

    /// Board width, with --custom
    #[arg(long, default_value_t = STANDARD_SIDE)]
    width: Coord,

    /// Board height, with --custom
    #[arg(long, default_value_t = STANDARD_SIDE)]
    height: Coord,

    /// Accept any board that fits instead of the standard 10x10 rules
    #[arg(long)]
    custom: bool,

    /// Only the first revealed cell is kept free of mines, not its neighbors
    #[arg(long)]
    no_safe_neighbors: bool,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Let an AI opponent take a turn after each of your reveals
    #[arg(long, value_enum)]
    ai: Option<AiTier>,

    /// Have the AI play the whole game on its own
    #[arg(long, requires = "ai")]
    autoplay: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let safe_zone = if self.no_safe_neighbors {
            SafeZone::Cell
        } else {
            SafeZone::WithNeighbors
        };

        let config = if self.custom {
            ensure!(self.width <= 26, "Boards wider than 26 columns cannot be addressed");
            GameConfig::new(self.width, self.height, self.mines, safe_zone)?
        } else {
            GameConfig::standard(self.mines, safe_zone)?
        };
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed: {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let config = args.game_config().context("Invalid game settings")?;
    let mut game = Game::new(config)?;
    let difficulty = args.ai.map(Difficulty::from);

    match difficulty {
        Some(difficulty) if args.autoplay => autoplay(&mut game, difficulty, &mut rng)?,
        _ => play(&mut game, difficulty, &mut rng)?,
    }

    if let Some(outcome) = render_outcome(&game) {
        println!("{}", outcome);
    }
    println!("Thanks for playing!");
    Ok(())
}

fn autoplay(game: &mut Game, difficulty: Difficulty, rng: &mut SmallRng) -> anyhow::Result<()> {
    let mut moves = 0usize;
    while game.status().is_playing() {
        let played = game.ai_move(difficulty, rng)?;
        moves += 1;
        log::info!("AI move {}: {:?}", moves, played);
        if played == AiMove::NoneAvailable {
            break;
        }
    }
    Ok(())
}

fn play(game: &mut Game, difficulty: Option<Difficulty>, rng: &mut SmallRng) -> anyhow::Result<()> {
    let (width, height) = (game.grid().width(), game.grid().height());

    println!("\nMinesweeper {}x{}", width, height);
    println!("Commands:");
    println!("  r <col><row>  -> reveal (e.g., r B5, r 10A, r A 10)");
    println!("  f <col><row>  -> toggle flag (e.g., f C3, f 7J)");
    if difficulty.is_some() {
        println!("  a             -> let the AI move");
    }
    println!("  q             -> quit\n");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while game.status().is_playing() {
        println!("{}", render_status(game));
        print!("{}", render_board(&game.board()));
        print!("Enter command: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(());
        };

        let command = match parse_command(&line?, width, height) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match command {
            Command::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            Command::Flag(coords) => {
                if !game.toggle_flag(coords)? {
                    println!("Cannot flag/unflag a revealed cell.");
                }
            }
            Command::Reveal(coords) => {
                game.reveal(coords, rng)?;
                if let Some(difficulty) = difficulty {
                    ai_turn(game, difficulty, rng)?;
                }
            }
            Command::Ai => match difficulty {
                Some(difficulty) => ai_turn(game, difficulty, rng)?,
                None => println!("No AI opponent; start with --ai <tier>."),
            },
        }
    }

    Ok(())
}

fn ai_turn(game: &mut Game, difficulty: Difficulty, rng: &mut SmallRng) -> anyhow::Result<()> {
    if !game.status().is_playing() {
        return Ok(());
    }

    match game.ai_move(difficulty, rng)? {
        AiMove::Revealed(coords) => println!("AI revealed {}", describe(coords)),
        AiMove::Detonated(coords) => println!("AI hit a mine at {}", describe(coords)),
        AiMove::NoneAvailable => println!("AI has no moves left."),
    }
    Ok(())
}

fn describe((row, col): sweeper_core::Coord2) -> String {
    format!("{}{}", command::column_letter(col), u16::from(row) + 1)
}
