use std::fs;
use std::num::NonZero;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use conduit::serial::{board_from_wire, connection_grid, WireGrid, WirePuzzle};
use conduit::{compute_swaps, Board, BuilderInvalidReason, Connections, GeneratorConfig, Puzzle, PuzzleGenerator, Shape, SolverConfig, Swap, TileMint};
use ndarray::Array2;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "solver")]
#[command(version)]
#[command(about = "Generate, solve and reconcile connector tile puzzles")]
struct Cli {
    /// JSON file of generator settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed, overriding the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON in the wire format instead of drawing boards
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a puzzle on a random shape
    Generate {
        #[arg(long, default_value = "5")]
        width: usize,

        #[arg(long, default_value = "5")]
        height: usize,
    },

    /// Generate a puzzle over a shape read from a text file (`x` active, `.` inactive)
    Custom {
        shape: PathBuf,
    },

    /// Solve a populated grid read from a JSON file in the wire format
    Solve {
        grid: PathBuf,

        /// Give up after this many tile placements
        #[arg(long)]
        max_placements: Option<u64>,
    },

    /// Compute the swaps carrying one wire grid into another
    Swaps {
        from: PathBuf,
        to: PathBuf,
    },
}

#[derive(Serialize)]
struct Solved {
    #[serde(flatten)]
    puzzle: WirePuzzle,
    swaps: Vec<Swap>,
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GeneratorConfig> {
    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if seed.is_some() {
        config.seed = seed;
    }

    Ok(config)
}

fn read_wire(path: &Path) -> Result<WireGrid> {
    let text = fs::read_to_string(path).with_context(|| format!("reading grid {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing grid {}", path.display()))
}

fn print_puzzle(puzzle: &Puzzle, json: bool) -> Result<()> {
    let swaps = puzzle.swaps_to_solution()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&Solved { puzzle: WirePuzzle::from(puzzle), swaps })?);
    } else {
        println!("Shuffled:\n{}", puzzle.shuffled);
        println!("Solution:\n{}", puzzle.solution);
        println!("Tiles: {}", puzzle.solution.slots().len());
        println!("Swaps to solve: {}", swaps.len());
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Generate { width, height } => {
            let dims = NonZero::new(width).zip(NonZero::new(height))
                .ok_or_else(|| anyhow!("board must be at least 1x1, got {width}x{height}"))?;

            let puzzle = PuzzleGenerator::new(config).generate_random(dims)?;
            print_puzzle(&puzzle, cli.json)?;
        }
        Commands::Custom { shape } => {
            let text = fs::read_to_string(&shape).with_context(|| format!("reading shape {}", shape.display()))?;
            let shape: Shape = text.parse().map_err(|reasons: Vec<_>| anyhow!("invalid shape: {}", describe(&reasons)))?;

            if !shape.is_connected() {
                info!(components = shape.component_count(), "shape is not connected; generation will fail");
            }

            let puzzle = PuzzleGenerator::new(config).generate_from_shape(&shape)?;
            print_puzzle(&puzzle, cli.json)?;
        }
        Commands::Solve { grid, max_placements } => {
            let wire = read_wire(&grid)?;
            let shuffled = import(&wire)?;

            let mut solution = shuffled.to_skeleton();
            solution.solve_with(&shuffled.pool(), SolverConfig { max_placements })
                .context("recognized puzzle is not solvable")?;

            print_puzzle(&Puzzle { shuffled, solution }, cli.json)?;
        }
        Commands::Swaps { from, to } => {
            let (from, to) = (read_wire(&from)?, read_wire(&to)?);
            let (from, to) = (to_array(&from)?, to_array(&to)?);

            let swaps = compute_swaps(&from, &to)?;
            if cli.json {
                println!("{}", serde_json::to_string(&swaps)?);
            } else {
                for swap in &swaps {
                    println!("{} <-> {}", swap.target, swap.source);
                }
            }
        }
    }

    Ok(())
}

fn describe(reasons: &[BuilderInvalidReason]) -> String {
    reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn import(wire: &WireGrid) -> Result<Board> {
    board_from_wire(wire, &mut TileMint::new()).map_err(|reasons| anyhow!("invalid grid: {}", describe(&reasons)))
}

/// Wire grids carry no identities, so they are reconciled by connections alone.
fn to_array(wire: &WireGrid) -> Result<Array2<Option<Connections>>> {
    Ok(connection_grid(import(wire)?.grid()))
}
