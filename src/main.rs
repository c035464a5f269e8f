//! WLD Baseball - CLI
//!
//! Daily hit/foul/strike game with a TUI, a line-based mode and a solver benchmark.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use wld_baseball::{
    commands::{run_benchmark, run_simple, score_guess},
    game::{GameConfig, GameEngine, GameMode, PlayerContext},
    output::{print_benchmark_result, print_evaluation, print_reward_tables},
    solver::{Solver, StrategyType, all_codes},
    storage::{FileLedger, FileRepository},
};

#[derive(Parser)]
#[command(
    name = "wld_baseball",
    about = "Crack the 3-digit code in 9 innings: hits, fouls and strikes",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Player address used for saves and WGT balance
    #[arg(short, long, global = true, default_value = "guest")]
    player: String,

    /// Directory holding saved sessions and the ledger
    #[arg(
        short = 'd',
        long,
        global = true,
        env = "WLD_BASEBALL_DATA",
        default_value = ".wld-baseball"
    )]
    data_dir: PathBuf,

    /// JSON file overriding game rules and reward tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seed for secrets, hints and commentary
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play {
        /// Skip the menu and start this mode right away
        #[arg(short, long, value_enum)]
        mode: Option<GameMode>,
    },

    /// Simple CLI mode (line-based, no TUI)
    Simple {
        #[arg(short, long, value_enum, default_value = "daily")]
        mode: GameMode,
    },

    /// Score one guess against a secret
    Score {
        /// The secret code, e.g. 815
        secret: String,

        /// The guess, e.g. 852
        guess: String,
    },

    /// Show the reward tables
    Rewards,

    /// Let a solver play every possible secret
    Benchmark {
        /// Strategy: minimax (default), first, random
        #[arg(short, long, default_value = "minimax")]
        strategy: String,

        /// Limit number of secrets to play
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

type FileEngine = GameEngine<FileRepository, FileLedger, StdRng>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play { mode: None });

    match command {
        Commands::Play { mode } => {
            let engine = build_engine(config, &cli.player, &cli.data_dir, cli.seed);
            run_play_command(engine, mode)
        }
        Commands::Simple { mode } => {
            let mut engine = build_engine(config, &cli.player, &cli.data_dir, cli.seed);
            engine.refresh_balance();
            run_simple(&mut engine, mode)
        }
        Commands::Score { secret, guess } => {
            let report = score_guess(&secret, &guess).map_err(|e| anyhow::anyhow!(e))?;
            print_evaluation(&report);
            Ok(())
        }
        Commands::Rewards => {
            print_reward_tables(&config.rewards, config.daily_schedule);
            Ok(())
        }
        Commands::Benchmark { strategy, limit } => {
            run_benchmark_command(&config, &strategy, limit);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(GameConfig::default()),
    }
}

fn build_engine(config: GameConfig, player: &str, data_dir: &Path, seed: Option<u64>) -> FileEngine {
    let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let repository = FileRepository::new(data_dir.join("sessions"));
    let ledger = FileLedger::new(
        data_dir.join("ledger.json"),
        config.hint_cost,
        config.starting_balance,
    );

    GameEngine::new(config, PlayerContext::new(player, 0), repository, ledger, rng)
}

fn run_play_command(engine: FileEngine, mode: Option<GameMode>) -> Result<()> {
    use wld_baseball::interactive::{App, run_tui};

    let mut app = App::new(engine);
    if let Some(mode) = mode {
        app.start_game(mode);
    }
    run_tui(app)
}

fn run_benchmark_command(config: &GameConfig, strategy_name: &str, limit: Option<usize>) {
    let strategy = StrategyType::from_name(strategy_name);
    let name = strategy.name();
    let solver = Solver::new(strategy);

    let secrets: Vec<_> = all_codes()
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect();
    println!("Playing {} secrets with the {name} strategy...", secrets.len());

    let result = run_benchmark(&solver, &secrets, config.rules(), &config.resolver());
    print_benchmark_result(name, &result);
}
