use std::env;
use std::fs;
use std::process;
use std::time::{Duration, Instant};

use tracing_subscriber::EnvFilter;
use typesync::sync::TickOutcome;
use typesync::{format_timestamp, EngineConfig, ParseOptions, Player, SimulatedPlayer, SyncEngine};

const USAGE: &str = "Usage: typesync <lyrics.lrc> [--keep-adlibs] [--config <file>] \
                     [--simulate <chars-per-second>]";

struct Args {
    input_path: String,
    keep_ad_libs: bool,
    config_path: Option<String>,
    simulate_cps: Option<f64>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut input_path = None;
    let mut keep_ad_libs = false;
    let mut config_path = None;
    let mut simulate_cps = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--keep-adlibs" => keep_ad_libs = true,
            "--config" => {
                let path = iter.next().ok_or("--config needs a file")?;
                config_path = Some(path.clone());
            }
            "--simulate" => {
                let value = iter.next().ok_or("--simulate needs a typing speed")?;
                let cps: f64 = value
                    .parse()
                    .map_err(|_| format!("invalid typing speed '{}'", value))?;
                if !cps.is_finite() || cps <= 0.0 {
                    return Err(format!("typing speed must be positive, got {}", value));
                }
                simulate_cps = Some(cps);
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option '{}'", flag)),
            path => {
                if input_path.is_some() {
                    return Err(format!("unexpected argument '{}'", path));
                }
                input_path = Some(path.to_string());
            }
        }
    }

    Ok(Args {
        input_path: input_path.ok_or("missing lyrics file")?,
        keep_ad_libs,
        config_path,
        simulate_cps,
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("typesync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    let config = match &args.config_path {
        Some(path) => {
            let source = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Error reading config '{}': {}", path, e);
                    process::exit(1);
                }
            };
            match EngineConfig::from_yaml(&source) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{}", e);
                    process::exit(1);
                }
            }
        }
        None => EngineConfig::default(),
    };

    let bytes = match fs::read(&args.input_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", args.input_path, e);
            process::exit(1);
        }
    };

    let options = ParseOptions::with_ad_libs_removed(!args.keep_ad_libs);
    let engine = match typesync::load_track(&bytes, options, config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if engine.track().is_empty() {
        eprintln!("No timed lyric lines in '{}'", args.input_path);
        process::exit(1);
    }

    match args.simulate_cps {
        Some(cps) => {
            if let Err(e) = simulate(engine, cps) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        None => print!("{}", engine.track().to_lrc()),
    }
}

/// Upper bound on simulated time: every line typed plus the whole song
/// played once, with slack.
fn simulation_limit(end: f64, total_chars: usize, cps: f64) -> Result<Duration, String> {
    Duration::try_from_secs_f64(end + total_chars as f64 / cps + 10.0)
        .map_err(|e| format!("typing speed {} is too slow to simulate: {}", cps, e))
}

/// Play the track on a simulated clock with a typist who types the active
/// line at `cps` characters per second.
fn simulate(mut engine: SyncEngine, cps: f64) -> Result<(), String> {
    let tick = engine.config().tick_interval();
    let dt = tick.as_secs_f64();
    let end = engine.track().lines().last().map_or(0.0, |line| line.time) + 5.0;
    let mut player = SimulatedPlayer::new(end);
    let started = Instant::now();
    let mut elapsed = Duration::ZERO;

    let total_chars: usize = engine.track().lines().iter().map(|l| l.char_len()).sum();
    let limit = simulation_limit(end, total_chars, cps)?;

    let token = engine.start();
    player.play();

    let mut line = None;
    let mut typed_budget = 0.0;

    while elapsed < limit && !engine.is_finished() {
        elapsed += tick;
        player.advance(dt);
        let now = started + elapsed;

        match engine.tick(token, &mut player) {
            TickOutcome::Committed { index } => {
                if let Some(lyric) = engine.track().get(index) {
                    println!("[{}] {}", format_timestamp(lyric.time), lyric.text);
                }
            }
            TickOutcome::PausedForTyping { index } => {
                println!(
                    "  paused at {:.1}s waiting for line {}",
                    player.current_time(),
                    index + 1
                );
            }
            _ => {}
        }

        if engine.committed_index() != line {
            line = engine.committed_index();
            typed_budget = 0.0;
        }
        let Some(target) = engine.active_line().map(|l| l.text.clone()) else {
            continue;
        };
        let target_len = target.chars().count();
        if engine.typing().typed_len() < target_len {
            typed_budget += cps * dt;
            let count = (typed_budget as usize).min(target_len);
            let text: String = target.chars().take(count).collect();
            engine.submit_text(&text, now, &mut player);
        }
    }

    let stats = engine.typing_stats(started + elapsed);
    println!();
    println!("finished: {}", engine.is_finished());
    println!("phase: {:?}", engine.phase());
    println!(
        "wpm: {}  accuracy: {}%  time: {}s",
        stats.wpm, stats.accuracy, stats.elapsed_secs
    );
    Ok(())
}
