use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rummy_engine::cli;
use rummy_engine::config::HouseRules;
use rummy_engine::game::{score, Game, TableState};
use rummy_engine::rng::GameRng;
use rummy_engine::simulation::engine::run_game;
use rummy_engine::simulation::report::aggregate_results;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rummy")]
#[command(about = "Rummy rule engine: play at the console or simulate automated games", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// House rules file (JSON)
    #[arg(short, long, global = true)]
    rules: Option<String>,

    /// Log meld extraction, attachment and reshuffles
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game at the console (default)
    Play {
        /// Number of players (clamped to the rules' range)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Seed for the shuffle (for reproducibility)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Simulate games between automated players
    Simulate {
        /// Number of games to simulate
        #[arg(short = 'n', long, default_value = "1000")]
        num_games: usize,

        /// Number of players per game
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Base seed; game i uses seed + i
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write a JSON report to this file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Shuffle, deal and show every hand with its opening melds
    Deal {
        #[arg(short, long, default_value = "2")]
        players: usize,

        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "rummy_engine=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rules = match &cli.rules {
        Some(path) => match HouseRules::from_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                eprintln!("✗ Failed to load rules from '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => HouseRules::default(),
    };

    match cli.command {
        Some(Commands::Play { players, seed }) => play(&rules, players, seed),
        Some(Commands::Simulate {
            num_games,
            players,
            seed,
            output,
        }) => simulate(&rules, num_games, players, seed, output.as_deref()),
        Some(Commands::Deal { players, seed }) => deal(&rules, players, seed),
        None => play(&rules, 2, None),
    }
}

fn play(rules: &HouseRules, players: usize, seed: Option<u64>) {
    let mut game = match Game::new(players, rules.clone(), seed) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("✗ Failed to start game: {}", e);
            std::process::exit(1);
        }
    };
    println!("Dealt {} hands (seed {}).", game.num_players(), game.table.seed());

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    if let Err(e) = cli::play(&mut game, &mut input, &mut out) {
        eprintln!("✗ Console error: {}", e);
        std::process::exit(1);
    }
}

fn deal(rules: &HouseRules, players: usize, seed: Option<u64>) {
    let players = rules.clamp_players(players);
    let mut table = TableState::with_rules(rules.clone(), seed);
    let mut hands = match table.deal(players) {
        Ok(hands) => hands,
        Err(e) => {
            eprintln!("✗ Failed to deal: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== Deal (seed {}) ===\n", table.seed());
    for (i, hand) in hands.iter_mut().enumerate() {
        println!("Player #{}: {}", i + 1, hand.render());
        if table.extract_melds(hand) {
            println!("  after melding: {} ({} points left)", hand.render(), score(hand));
        }
    }
    println!("\nTable:\n{}", table.render_melds());
    if let Some(top) = table.discard_pile.peek_top() {
        println!("\nDiscard: {}", top);
    }
    println!("Draw pile: {} cards", table.draw_pile.size());
}

fn simulate(rules: &HouseRules, num_games: usize, players: usize, seed: Option<u64>, output: Option<&str>) {
    let players = rules.clamp_players(players);
    let base_seed = seed.unwrap_or_else(|| GameRng::new(None).seed());

    println!("\n=== Rummy Simulator ===\n");
    println!("Players: {}", players);
    println!("Games: {}", num_games);
    println!("Base seed: {}", base_seed);
    println!();

    let progress = ProgressBar::new(num_games as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = std::time::Instant::now();
    let results: Result<Vec<_>, _> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let result = run_game(players, base_seed.wrapping_add(i as u64), rules);
            progress.inc(1);
            result
        })
        .collect();
    progress.finish_and_clear();
    let elapsed = start.elapsed();

    let results = match results {
        Ok(results) => results,
        Err(e) => {
            eprintln!("✗ Simulation failed: {}", e);
            std::process::exit(1);
        }
    };
    let report = aggregate_results(results, players);

    println!("=== Results ===\n");
    println!(
        "Finished games: {:.1}% ({}/{})",
        pct(report.finished, num_games),
        report.finished,
        num_games
    );
    println!("Stalemates (round limit {}): {}", rules.max_rounds, report.stalemates);
    println!("Average rounds: {:.2}", report.avg_rounds);
    println!("Average winning score: {:.2}", report.avg_score);
    println!();

    println!("Wins by seat:");
    for (seat, wins) in report.wins_by_seat.iter().enumerate() {
        let bar = "█".repeat((pct(*wins, num_games) / 2.0) as usize);
        println!("  Player #{}: {:5.1}% {} ({})", seat + 1, pct(*wins, num_games), bar, wins);
    }
    println!();

    println!("Round distribution:");
    for (rounds, count) in &report.round_distribution {
        let bar = "█".repeat((pct(*count, num_games) / 2.0) as usize);
        println!("  Round {:3}: {:5.1}% {} ({})", rounds, pct(*count, num_games), bar, count);
    }

    println!();
    println!(
        "Simulation completed in {:.2?} ({:.0} games/sec)",
        elapsed,
        num_games as f64 / elapsed.as_secs_f64()
    );

    if let Some(path) = output {
        match report.save(path) {
            Ok(()) => println!("Report saved to: {}", path),
            Err(e) => eprintln!("✗ Failed to save report: {}", e),
        }
    }
}

fn pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
