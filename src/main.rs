use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aoc2023::{input_path, load_input, solution, Solution, ALL_SOLUTIONS, DEFAULT_INPUT_DIR};

/// Runs the Advent of Code 2023 solutions
#[derive(Parser, Debug)]
#[command(name = "aoc2023", version)]
struct Args {
    /// Day to run (runs every day if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=ALL_SOLUTIONS.len() as i64))]
    day: Option<u8>,

    /// Directory holding one `<day>.txt` input per day
    #[arg(short, long, env = "AOC_INPUTS", default_value = DEFAULT_INPUT_DIR)]
    inputs: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let days: Vec<usize> = match args.day {
        Some(day) => vec![day as usize],
        None => (1..=ALL_SOLUTIONS.len()).collect(),
    };

    let mut total = Duration::default();
    for n in days {
        let path = input_path(&args.inputs, n);
        if !path.is_file() {
            tracing::warn!(day = n, path = %path.display(), "skipping day without input");
            continue;
        }
        let input = load_input(&args.inputs, n)?;
        total += execute_day(n, solution(n)?, &input)?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    match dur.as_millis() {
        0 => format!("{} us", dur.as_micros()),
        ms if ms < 10_000 => format!("{ms} ms"),
        _ => format!("{:.2} s", dur.as_secs_f64()),
    }
}

fn execute_day(n: usize, f: Solution, input: &str) -> Result<Duration> {
    println!("Day {}:", n);

    let start = Instant::now();
    let (part1, part2) = f(input)?;
    let elapsed = start.elapsed();
    tracing::info!(day = n, ?elapsed, "solved");

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
