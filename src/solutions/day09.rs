use anyhow::Result;

use crate::numbers;

/// Returns the values one step before and one step after `history`.
fn extrapolate(history: &[i64]) -> (i64, i64) {
    let mut row = history.to_vec();
    let mut next = 0;
    let mut prev = 0;
    let mut sign = 1;

    while row.iter().any(|&x| x != 0) {
        next += row[row.len() - 1];
        prev += sign * row[0];
        sign = -sign;
        row = row.windows(2).map(|w| w[1] - w[0]).collect();
    }

    (prev, next)
}

pub fn day9(input: &str) -> Result<(i64, i64)> {
    let mut part1 = 0;
    let mut part2 = 0;
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        let (prev, next) = extrapolate(&numbers::<i64>(line)?);
        part1 += next;
        part2 += prev;
    }
    Ok((part1, part2))
}
