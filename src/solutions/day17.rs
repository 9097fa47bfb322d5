use std::{cmp::Reverse, collections::BinaryHeap};

use anyhow::{ensure, Result};

use crate::grid::{
    parse_grid, step_by,
    Direction::{East, North, South, West},
    Grid,
};

/// Least heat loss from the top-left to the bottom-right block when every straight run is
/// `min_run..=max_run` blocks long.
fn least_heat_loss(grid: &Grid, min_run: usize, max_run: usize) -> Option<u32> {
    let (rows, cols) = (grid.nrows(), grid.ncols());
    let target = (rows - 1, cols - 1);
    // state: position plus the axis of the run that ended there
    let index = |(r, c): (usize, usize), vertical: bool| (r * cols + c) * 2 + vertical as usize;

    let mut best = vec![u32::MAX; rows * cols * 2];
    let mut queue = BinaryHeap::new();
    for vertical in [false, true] {
        best[index((0, 0), vertical)] = 0;
        queue.push(Reverse((0, (0, 0), vertical)));
    }

    while let Some(Reverse((loss, pos, vertical))) = queue.pop() {
        if pos == target {
            return Some(loss);
        }
        if loss > best[index(pos, vertical)] {
            continue;
        }

        // turn onto the other axis
        let turns = if vertical { [East, West] } else { [North, South] };
        for dir in turns {
            let mut total = loss;
            for distance in 1..=max_run {
                let Some(next) = step_by(grid, pos, dir, distance) else {
                    break;
                };
                total += u32::from(grid[next] - b'0');
                if distance < min_run {
                    continue;
                }
                let slot = &mut best[index(next, !vertical)];
                if total < *slot {
                    *slot = total;
                    queue.push(Reverse((total, next, !vertical)));
                }
            }
        }
    }
    None
}

pub fn day17(input: &str) -> Result<(u32, u32)> {
    let grid = parse_grid(input)?;
    ensure!(
        grid.iter().all(u8::is_ascii_digit),
        "heat loss map must only contain digits"
    );

    let part1 = least_heat_loss(&grid, 1, 3).unwrap_or_default();
    let part2 = least_heat_loss(&grid, 4, 10).unwrap_or_default();
    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day17() -> Result<()> {
        let example = indoc! {"
            2413432311323
            3215453535623
            3255245654254
            3446585845452
            4546657867536
            1438598798454
            4457876987766
            3637877979653
            4654967986887
            4564679986453
            1224686865563
            2546548887735
            4322674655533
        "};
        assert_eq!(day17(example)?, (102, 94));
        Ok(())
    }

    #[test]
    fn ultra_crucible_must_run_before_stopping() -> Result<()> {
        let example = indoc! {"
            111111111111
            999999999991
            999999999991
            999999999991
            999999999991
        "};
        let grid = parse_grid(example)?;
        assert_eq!(least_heat_loss(&grid, 4, 10), Some(71));
        Ok(())
    }
}
