use anyhow::Result;

use crate::grid::{parse_grid, Grid};

/// Sum of pairwise distances of already sorted coordinates.
fn pairwise_distance(sorted: &[u64]) -> u64 {
    let mut total = 0;
    let mut prefix = 0;
    for (i, &x) in sorted.iter().enumerate() {
        total += x * i as u64 - prefix;
        prefix += x;
    }
    total
}

/// Galaxy coordinates along one axis after every empty line grew to `factor` lines.
fn expanded_axis(occupied: &[usize], factor: u64) -> Vec<u64> {
    let mut coords = Vec::new();
    let mut offset = 0;
    for (line, &count) in occupied.iter().enumerate() {
        if count == 0 {
            offset += factor - 1;
        }
        coords.extend(std::iter::repeat(line as u64 + offset).take(count));
    }
    coords
}

fn total_distance(grid: &Grid, factor: u64) -> u64 {
    let per_row: Vec<usize> = grid
        .row_iter()
        .map(|row| row.iter().filter(|&&b| b == b'#').count())
        .collect();
    let per_col: Vec<usize> = grid
        .column_iter()
        .map(|col| col.iter().filter(|&&b| b == b'#').count())
        .collect();

    pairwise_distance(&expanded_axis(&per_row, factor))
        + pairwise_distance(&expanded_axis(&per_col, factor))
}

pub fn day11(input: &str) -> Result<(u64, u64)> {
    let grid = parse_grid(input)?;
    Ok((total_distance(&grid, 2), total_distance(&grid, 1_000_000)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ...#......
        .......#..
        #.........
        ..........
        ......#...
        .#........
        .........#
        ..........
        .......#..
        #...#.....
    "};

    #[test]
    fn test_day11() -> Result<()> {
        assert_eq!(day11(EXAMPLE)?, (374, 82000210));
        Ok(())
    }

    #[test]
    fn smaller_expansion_factors() -> Result<()> {
        let grid = parse_grid(EXAMPLE)?;
        assert_eq!(total_distance(&grid, 10), 1030);
        assert_eq!(total_distance(&grid, 100), 8410);
        Ok(())
    }
}
