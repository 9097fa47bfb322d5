pub mod grid;
pub mod solutions;

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use thiserror::Error;

pub use solutions::*;

/// Both answers of a day, rendered for printing.
pub type Answers = (String, String);

/// A day's solution with its answer types erased.
pub type Solution = fn(&str) -> Result<Answers>;

/// Directory the runner and the benchmark read puzzle inputs from by default.
pub const DEFAULT_INPUT_DIR: &str = "inputs";

#[derive(Error, Debug)]
pub enum SolutionError {
    #[error("no solution available for day {0}")]
    DayNotAvailable(usize),
    #[error("input for day {day} not found at {}", .path.display())]
    MissingInput { day: usize, path: PathBuf },
}

macro_rules! solutions {
    ($($day:ident),* $(,)?) => {
        [$(|input: &str| -> Result<Answers> {
            let (part1, part2) = $day(input)?;
            Ok((part1.to_string(), part2.to_string()))
        }),*]
    };
}

/// Day `n` lives at index `n - 1`.
pub const ALL_SOLUTIONS: [Solution; 20] = solutions![
    day1, day2, day3, day4, day5, day6, day7, day8, day9, day10, day11, day12, day13, day14,
    day15, day16, day17, day18, day19, day20,
];

pub fn solution(day: usize) -> Result<Solution, SolutionError> {
    day.checked_sub(1)
        .and_then(|i| ALL_SOLUTIONS.get(i))
        .copied()
        .ok_or(SolutionError::DayNotAvailable(day))
}

pub fn input_path(dir: &Path, day: usize) -> PathBuf {
    dir.join(format!("{day}.txt"))
}

pub fn load_input(dir: &Path, day: usize) -> Result<String> {
    let path = input_path(dir, day);
    if !path.is_file() {
        return Err(SolutionError::MissingInput { day, path }.into());
    }
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn default_input(day: usize) -> Result<String> {
    load_input(Path::new(DEFAULT_INPUT_DIR), day)
}

/// Value of a run of ASCII digits, or `None` if `bytes` holds anything else or overflows.
pub fn parse_usize(bytes: &[u8]) -> Option<usize> {
    bytes.iter().try_fold(0usize, |n, &b| {
        let digit = b.is_ascii_digit().then(|| usize::from(b - b'0'))?;
        n.checked_mul(10)?.checked_add(digit)
    })
}

/// Parses every whitespace separated token of `text`.
pub fn numbers<T>(text: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.split_ascii_whitespace()
        .map(|token| {
            token
                .parse()
                .with_context(|| format!("invalid number {token:?}"))
        })
        .collect()
}
