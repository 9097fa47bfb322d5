use anyhow::{Context, Result};
use rustc_hash::FxHashMap;

use crate::{
    grid::{neighbours8, parse_grid, Grid, Pos},
    parse_usize,
};

/// A horizontal run of digits.
struct Number {
    row: usize,
    cols: std::ops::Range<usize>,
    value: usize,
}

fn numbers(grid: &Grid) -> Result<Vec<Number>> {
    let mut numbers = Vec::new();
    for row in 0..grid.nrows() {
        let digits: Vec<u8> = grid.row(row).iter().copied().collect();
        let mut col = 0;
        while col < digits.len() {
            if !digits[col].is_ascii_digit() {
                col += 1;
                continue;
            }
            let start = col;
            while col < digits.len() && digits[col].is_ascii_digit() {
                col += 1;
            }
            numbers.push(Number {
                row,
                cols: start..col,
                value: parse_usize(&digits[start..col])
                    .with_context(|| format!("number too large in row {row}"))?,
            });
        }
    }
    Ok(numbers)
}

fn is_symbol(b: u8) -> bool {
    b != b'.' && !b.is_ascii_digit()
}

pub fn day3(input: &str) -> Result<(usize, usize)> {
    let grid = parse_grid(input)?;

    let mut part1 = 0;
    let mut gears: FxHashMap<Pos, Vec<usize>> = FxHashMap::default();

    for number in numbers(&grid)? {
        let mut touched: Vec<Pos> = number
            .cols
            .clone()
            .flat_map(|col| neighbours8(&grid, (number.row, col)))
            .filter(|&pos| is_symbol(grid[pos]))
            .collect();
        touched.sort_unstable();
        touched.dedup();

        if !touched.is_empty() {
            part1 += number.value;
        }
        for pos in touched.into_iter().filter(|&pos| grid[pos] == b'*') {
            gears.entry(pos).or_default().push(number.value);
        }
    }

    let part2 = gears
        .values()
        .filter(|parts| parts.len() == 2)
        .map(|parts| parts[0] * parts[1])
        .sum();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day3() -> Result<()> {
        let example = indoc! {"
            467..114..
            ...*......
            ..35..633.
            ......#...
            617*......
            .....+.58.
            ..592.....
            ......755.
            ...$.*....
            .664.598..
        "};
        assert_eq!(day3(example)?, (4361, 467835));
        Ok(())
    }

    #[test]
    fn gear_needs_exactly_two_numbers() -> Result<()> {
        let example = indoc! {"
            2.3
            .*.
            4..
        "};
        assert_eq!(day3(example)?, (9, 0));
        Ok(())
    }

    #[test]
    fn oversized_number_is_an_error() {
        assert!(day3("123456789012345678901234*\n").is_err());
    }
}
