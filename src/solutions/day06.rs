use anyhow::{ensure, Context, Result};

use crate::numbers;

/// Number of hold times `h` in `0..=time` with `h * (time - h) > record`.
fn ways_to_win(time: u64, record: u64) -> u64 {
    let beats = |hold: u64| hold * (time - hold) > record;

    let disc = (time * time) as f64 - 4.0 * record as f64;
    if disc < 0.0 {
        return 0;
    }
    let root = disc.sqrt();
    let mut low = (((time as f64 - root) / 2.0).floor().max(0.0) as u64).min(time);
    let mut high = (((time as f64 + root) / 2.0).ceil() as u64).min(time);

    // float roots can be off by one either way
    while low <= high && !beats(low) {
        low += 1;
    }
    while high >= low && !beats(high) {
        high -= 1;
    }
    if low > high {
        0
    } else {
        high - low + 1
    }
}

fn field<'a>(line: Option<&'a str>, name: &str) -> Result<&'a str> {
    line.and_then(|line| line.strip_prefix(name))
        .with_context(|| format!("missing {name:?} line"))
}

pub fn day6(input: &str) -> Result<(u64, u64)> {
    let mut lines = input.lines();
    let times = field(lines.next(), "Time:")?;
    let records = field(lines.next(), "Distance:")?;

    let race_times = numbers::<u64>(times)?;
    let race_records = numbers::<u64>(records)?;
    ensure!(
        race_times.len() == race_records.len(),
        "every race needs a time and a record"
    );

    let part1 = race_times
        .iter()
        .zip(&race_records)
        .map(|(&time, &record)| ways_to_win(time, record))
        .product();

    let kerned = |text: &str| -> Result<u64> {
        let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        digits
            .parse()
            .with_context(|| format!("invalid number {digits:?}"))
    };
    let part2 = ways_to_win(kerned(times)?, kerned(records)?);

    Ok((part1, part2))
}
