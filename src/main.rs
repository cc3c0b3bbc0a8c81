//! Elite Life CLI - Run games and population batches from JSON configuration.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use elite_life::{
    compute::{BatchRunner, Game},
    schema::{BatchConfig, GameConfig, LifeConfig, Pattern, Seed},
    view::{CLEAR_SCREEN, frame},
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("--example") => print_example_config(),
        Some("run") if args.len() > 2 => run_game(&args),
        Some("batch") if args.len() > 2 => run_batch(&args),
        _ => {
            print_usage(&args[0]);
            std::process::exit(1);
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} run <game.json> [generations]", program);
    eprintln!("       {} batch <batch.json> [output.json]", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Run Conway's Game of Life with configurable neighborhoods and elite cells.");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run     Animate one game in the terminal until it stops changing");
    eprintln!("          or the generation limit (default: 100) is reached");
    eprintln!("  batch   Run many random games and write their population series");
    eprintln!("          as JSON (default: series.json)");
    eprintln!();
    eprintln!("Example configurations are printed with --example.");
}

fn load_json<T: DeserializeOwned>(path: &Path) -> T {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        std::process::exit(1);
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path.display(), e);
        std::process::exit(1);
    })
}

fn run_game(args: &[String]) {
    let config_path = PathBuf::from(&args[2]);
    let generations: u64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(100);
    let config: GameConfig = load_json(&config_path);

    let mut game = Game::from_config(&config).unwrap_or_else(|e| {
        eprintln!("Error creating game: {}", e);
        std::process::exit(1);
    });

    let frame_time = Duration::from_secs_f64(1.0 / config.fps.max(1) as f64);
    let start = Instant::now();
    if let Err(e) = animate(&mut io::stdout().lock(), &mut game, generations, frame_time) {
        eprintln!("Error writing frame: {}", e);
        std::process::exit(1);
    }
    let elapsed = start.elapsed();

    let stats = game.stats();
    println!();
    if game.is_moving() {
        println!("Stopped after {} generations.", stats.generation);
    } else {
        println!("Stable after {} generations.", stats.generation);
    }
    println!("  Alive cells: {}", stats.alive);
    println!("  Immortal cells: {}", stats.immortal);
    println!("  Time: {:.2}s", elapsed.as_secs_f32());
}

/// Draw frames until the game settles or reaches `generations`.
///
/// Stops at the first failed write.
fn animate<W: Write>(
    out: &mut W,
    game: &mut Game,
    generations: u64,
    frame_time: Duration,
) -> io::Result<()> {
    write!(out, "{}{}", CLEAR_SCREEN, frame(game))?;
    out.flush()?;

    while game.is_moving() && game.generation() < generations {
        thread::sleep(frame_time);
        game.advance();
        write!(out, "{}", frame(game))?;
        out.flush()?;
    }
    Ok(())
}

fn run_batch(args: &[String]) {
    let config_path = PathBuf::from(&args[2]);
    let output = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("series.json"));
    let config: BatchConfig = load_json(&config_path);

    println!("Elite Life Batch");
    println!("================");
    println!("Grid: {}x{}", config.height, config.width);
    println!("Games: {}", config.games);
    println!("Generations: {}", config.generations);
    println!(
        "Neighborhood: {:?} order {}",
        config.life.neighborhood_type, config.life.neighborhood_order
    );
    println!(
        "Elite: {} every {} generations",
        config.life.elite_fraction, config.life.elite_interval
    );
    println!();

    let runner = BatchRunner::new(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let start = Instant::now();
    let result = runner.run().unwrap_or_else(|e| {
        eprintln!("Error running batch: {}", e);
        std::process::exit(1);
    });
    let elapsed = start.elapsed();

    for summary in result.summary() {
        println!(
            "  Generation {:>4}: mean={:.1}, min={}, max={}",
            summary.generation, summary.mean, summary.min, summary.max
        );
    }
    println!();

    println!("Saving series to {}", output.display());
    if let Err(e) = result.save_json(&output) {
        eprintln!("Error saving series: {}", e);
        std::process::exit(1);
    }
    println!("Time: {:.2}s", elapsed.as_secs_f32());
}

fn print_example_config() {
    let game = GameConfig::default();
    let batch = BatchConfig {
        life: LifeConfig {
            elite_fraction: 0.05,
            ..Default::default()
        },
        random_seed: Some(42),
        ..Default::default()
    };
    let random_game = GameConfig {
        height: 18,
        width: 27,
        seed: Seed::new(Pattern::Random {
            density: 0.5,
            seed: None,
        }),
        ..Default::default()
    };

    let print = |title: &str, json: serde_json::Result<String>| match json {
        Ok(json) => println!("{}\n{}\n", title, json),
        Err(e) => eprintln!("Error serializing example: {}", e),
    };

    print(
        "Example game (game.json):",
        serde_json::to_string_pretty(&game),
    );
    print(
        "Example random game with default window size (random.json):",
        serde_json::to_string_pretty(&random_game),
    );
    print(
        "Example batch (batch.json):",
        serde_json::to_string_pretty(&batch),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Accepts `budget` writes, then fails like a closed pipe.
    struct ClosingPipe {
        budget: usize,
    }

    impl Write for ClosingPipe {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            self.budget -= 1;
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn glider_game() -> Game {
        Game::from_config(&GameConfig {
            random_seed: Some(0),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_animate_runs_to_limit() {
        let mut game = glider_game();
        let mut out = Vec::new();
        animate(&mut out, &mut game, 4, Duration::ZERO).unwrap();
        assert_eq!(game.generation(), 4);
        assert!(String::from_utf8(out).unwrap().starts_with(CLEAR_SCREEN));
    }

    #[test]
    fn test_animate_stops_on_broken_pipe() {
        let mut game = glider_game();
        let mut out = ClosingPipe { budget: 0 };
        let err = animate(&mut out, &mut game, 100, Duration::ZERO).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(game.generation(), 0);
    }
}
