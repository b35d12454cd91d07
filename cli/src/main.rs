use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use sweeper_core::{Board, CellCount, Coord, GameConfig};

use command::{Command, HELP};

mod command;
mod render;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Number of rows in the grid
    #[arg(long, default_value_t = GameConfig::default().rows())]
    rows: Coord,

    /// Number of columns in the grid
    #[arg(long, default_value_t = GameConfig::default().cols())]
    cols: Coord,

    /// Number of hidden mines
    #[arg(short, long, default_value_t = GameConfig::default().mines)]
    mines: CellCount,

    /// Force a seed instead of random, later games use the following seeds
    #[arg(short, long)]
    seed: Option<u64>,
}

/// One terminal session; a finished board is replaced by a fresh one on `n`.
struct Session {
    config: GameConfig,
    seed: Option<u64>,
    games: u64,
    board: Board,
}

impl Session {
    fn new(config: GameConfig, seed: Option<u64>) -> anyhow::Result<Self> {
        let first_seed = seed.unwrap_or_else(rand::random);
        let board = Board::new(config, first_seed).context("invalid game configuration")?;
        log::debug!("New game with seed {}", first_seed);
        Ok(Self {
            config,
            seed,
            games: 0,
            board,
        })
    }

    fn restart(&mut self) -> anyhow::Result<()> {
        self.games += 1;
        let seed = match self.seed {
            Some(seed) => seed.wrapping_add(self.games),
            None => rand::random(),
        };
        log::debug!("New game with seed {}", seed);
        self.board = Board::new(self.config, seed)?;
        Ok(())
    }

    /// Applies one command, returning `false` when the player quits. The board is only
    /// redrawn when the command changed it.
    fn apply(&mut self, command: Command, out: &mut impl Write) -> anyhow::Result<bool> {
        let changed = match command {
            Command::Reveal(coords) => match self.board.reveal(coords) {
                Ok(outcome) => {
                    log::info!("Reveal {:?}: {:?}", coords, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    false
                }
            },
            Command::Flag(coords) => match self.board.toggle_flag(coords) {
                Ok(outcome) => {
                    log::info!("Flag {:?}: {:?}", coords, outcome);
                    outcome.has_update()
                }
                Err(err) => {
                    writeln!(out, "{err}")?;
                    false
                }
            },
            Command::NewGame => {
                self.restart()?;
                true
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                false
            }
            Command::Quit => return Ok(false),
        };

        if changed {
            render::draw(out, &self.board)?;
        }
        Ok(true)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::new((args.rows, args.cols), args.mines)
        .context("invalid game configuration")?;
    log::debug!("Starting with {:?}", config);

    let mut session = Session::new(config, args.seed)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    render::draw(&mut out, &session.board)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        let keep_going = match line.parse::<Command>() {
            Ok(command) => session.apply(command, &mut out)?,
            Err(err) => {
                writeln!(out, "{err}")?;
                true
            }
        };
        if !keep_going {
            break;
        }
        out.flush()?;
    }

    Ok(())
}
