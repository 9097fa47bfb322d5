use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::grid::{
    parse_grid,
    Direction::{self, East, North, South, West},
    Grid,
};

const SPIN_CYCLES: usize = 1_000_000_000;

/// Rolls every `O` as far as possible towards `dir`.
fn tilt(grid: &mut Grid, dir: Direction) {
    let (lanes, len) = if dir.is_vertical() {
        (grid.ncols(), grid.nrows())
    } else {
        (grid.nrows(), grid.ncols())
    };

    for lane in 0..lanes {
        // i counts from the edge the rocks roll towards
        let cell = |i: usize| {
            let i = match dir {
                North | West => i,
                South | East => len - 1 - i,
            };
            if dir.is_vertical() {
                (i, lane)
            } else {
                (lane, i)
            }
        };

        let mut free = 0;
        for i in 0..len {
            match grid[cell(i)] {
                b'#' => free = i + 1,
                b'O' => {
                    grid[cell(i)] = b'.';
                    grid[cell(free)] = b'O';
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn spin(grid: &mut Grid) {
    for dir in [North, West, South, East] {
        tilt(grid, dir);
    }
}

fn north_load(grid: &Grid) -> usize {
    grid.row_iter()
        .enumerate()
        .map(|(row, cells)| (grid.nrows() - row) * cells.iter().filter(|&&b| b == b'O').count())
        .sum()
}

/// Load after `cycles` spins, skipping ahead once a layout repeats.
fn load_after_spins(mut grid: Grid, cycles: usize) -> usize {
    let mut seen: FxHashMap<Vec<u8>, usize> = FxHashMap::default();
    let mut loads = Vec::new();

    for cycle in 0..cycles {
        if let Some(&first) = seen.get(grid.as_slice()) {
            let period = cycle - first;
            tracing::debug!(first, period, "spin cycle repeats");
            return loads[first + (cycles - first) % period];
        }
        seen.insert(grid.as_slice().to_vec(), cycle);
        loads.push(north_load(&grid));
        spin(&mut grid);
    }
    north_load(&grid)
}

pub fn day14(input: &str) -> Result<(usize, usize)> {
    let grid = parse_grid(input)?;

    let mut tilted = grid.clone();
    tilt(&mut tilted, North);
    let part1 = north_load(&tilted);

    let part2 = load_after_spins(grid, SPIN_CYCLES);

    Ok((part1, part2))
}
