use anyhow::Result;

use crate::grid::{parse_grid, Grid};

fn row_differences(pattern: &Grid, a: usize, b: usize) -> usize {
    pattern
        .row(a)
        .iter()
        .zip(pattern.row(b).iter())
        .filter(|(x, y)| x != y)
        .count()
}

/// Rows above the horizontal mirror whose reflection differs in exactly `smudges` cells.
fn mirror_row(pattern: &Grid, smudges: usize) -> Option<usize> {
    let height = pattern.nrows();
    (1..height).find(|&line| {
        let mut differences = 0;
        for offset in 0..line.min(height - line) {
            differences += row_differences(pattern, line - 1 - offset, line + offset);
            if differences > smudges {
                return false;
            }
        }
        differences == smudges
    })
}

fn summarize(pattern: &Grid, smudges: usize) -> usize {
    if let Some(rows) = mirror_row(pattern, smudges) {
        100 * rows
    } else {
        mirror_row(&pattern.transpose(), smudges).unwrap_or(0)
    }
}

pub fn day13(input: &str) -> Result<(usize, usize)> {
    let input = input.replace("\r\n", "\n");
    let patterns = input
        .split("\n\n")
        .filter(|chunk| !chunk.trim().is_empty())
        .map(parse_grid)
        .collect::<Result<Vec<_>>>()?;

    let part1 = patterns.iter().map(|p| summarize(p, 0)).sum();
    let part2 = patterns.iter().map(|p| summarize(p, 1)).sum();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day13() -> Result<()> {
        let example = indoc! {"
            #.##..##.
            ..#.##.#.
            ##......#
            ##......#
            ..#.##.#.
            ..##..##.
            #.#.##.#.

            #...##..#
            #....#..#
            ..##..###
            #####.##.
            #####.##.
            ..##..###
            #....#..#
        "};
        assert_eq!(day13(example)?, (405, 400));
        Ok(())
    }

    #[test]
    fn finds_columns_through_transpose() -> Result<()> {
        let pattern = parse_grid("#..#\n.##.\n")?;
        assert_eq!(mirror_row(&pattern, 0), None);
        assert_eq!(summarize(&pattern, 0), 2);
        Ok(())
    }
}
