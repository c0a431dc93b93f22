//! Terminal driver for the programmer's life simulator.
//!
//! Reads one command per line from stdin and prints what the engine reports.
//! Real time keeps flowing between commands, so meters decay and delayed
//! actions finish on their own.
//!
//! ```bash
//! cargo run -p lifesim -- --seed 7 --fast
//! ```
//!
//! With `--json` every engine event is printed as one JSON object per line,
//! which is the format to use when another program drives the game.

mod render;

use lifesim_core::{EngineConfig, GameEngine, GameEvent};
use std::error::Error;
use std::io::{self, Write};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_WAIT: Duration = Duration::from_secs(1);

/// Delay multiplier used by `--fast`.
const FAST_TIME_SCALE: f64 = 0.1;

/// Decay tick used by `--fast`.
const FAST_TICK: Duration = Duration::from_secs(6);

struct DriverOptions {
    json: bool,
    config: EngineConfig,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    let options = parse_args(&args)?;
    run(options).await
}

fn print_help() {
    println!("Programmer's Life Simulator");
    println!();
    println!("USAGE:");
    println!("    lifesim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --seed <N>    Fix the random seed for task generation");
    println!("    --fast        Shorten every delay and the decay tick");
    println!("    --json        Print engine events as JSON lines");
    println!("    -h, --help    Print this help");
    println!();
    println!("ENVIRONMENT:");
    println!("    LIFESIM_TICK_SECS    Seconds between decay ticks (0 disables)");
    println!("    LIFESIM_TIME_SCALE   Multiplier for action and story delays");
    println!("    LIFESIM_SEED         Random seed");
    println!("    RUST_LOG             Diagnostic log filter (written to stderr)");
    println!();
    println!("In game, type \"help\" for commands. #quit exits.");
}

fn parse_args(args: &[String]) -> Result<DriverOptions, Box<dyn Error>> {
    let mut config = EngineConfig::from_env()?;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                let value = args.get(i + 1).ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("--seed must be an unsigned integer, got {value:?}"))?;
                config = config.with_seed(seed);
                i += 1;
            }
            "--fast" => {
                config = config
                    .with_time_scale(FAST_TIME_SCALE)
                    .with_tick_period(Some(FAST_TICK));
            }
            "--json" => json = true,
            other => return Err(format!("unknown argument: {other}").into()),
        }
        i += 1;
    }

    Ok(DriverOptions { json, config })
}

fn emit(events: &[GameEvent], json: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for event in events {
        if json {
            let line = serde_json::to_string(event).map_err(io::Error::other)?;
            writeln!(out, "{line}")?;
        } else {
            for line in render::render_event(event) {
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()
}

async fn run(options: DriverOptions) -> Result<(), Box<dyn Error>> {
    let DriverOptions { json, config } = options;
    let mut engine = GameEngine::new(config);
    info!(session = %engine.state().session_id, "game started");
    emit(&engine.start(), json)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = Instant::now();
    let mut stdin_open = true;

    loop {
        let wait = engine.next_deadline().unwrap_or(IDLE_WAIT).min(IDLE_WAIT);

        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    stdin_open = false;
                    continue;
                };
                // Catch up on time that passed while waiting for input.
                let now = Instant::now();
                emit(&engine.advance(now - last), json)?;
                last = now;

                if line.trim() == "#quit" {
                    if !json {
                        println!("Goodbye!");
                    }
                    break;
                }
                emit(&engine.submit(&line), json)?;
            }
            _ = tokio::time::sleep(wait) => {
                let now = Instant::now();
                emit(&engine.advance(now - last), json)?;
                last = now;
            }
        }

        if !engine.has_pending_jobs() {
            if engine.is_over() {
                info!("game over");
                break;
            }
            if !stdin_open {
                break;
            }
        }
    }

    Ok(())
}
