use anyhow::{bail, Result};
use rayon::prelude::*;

use crate::grid::{
    parse_grid, step,
    Direction::{self, East, North, South, West},
    Grid, Pos,
};

/// Outgoing directions of a beam travelling `dir` into `tile`.
fn deflect(tile: u8, dir: Direction) -> (Direction, Option<Direction>) {
    match (tile, dir) {
        (b'/', North) => (East, None),
        (b'/', East) => (North, None),
        (b'/', South) => (West, None),
        (b'/', West) => (South, None),
        (b'\\', North) => (West, None),
        (b'\\', West) => (North, None),
        (b'\\', South) => (East, None),
        (b'\\', East) => (South, None),
        (b'|', East | West) => (North, Some(South)),
        (b'-', North | South) => (East, Some(West)),
        _ => (dir, None),
    }
}

fn energized(grid: &Grid, entry: Pos, dir: Direction) -> usize {
    let ncols = grid.ncols();
    // bit `dir.index()` is set once a beam went through the tile heading `dir`
    let mut visited = vec![0u8; grid.nrows() * ncols];
    let mut beams = vec![(entry, dir)];

    while let Some((pos, dir)) = beams.pop() {
        let seen = &mut visited[pos.0 * ncols + pos.1];
        if *seen & (1 << dir.index()) != 0 {
            continue;
        }
        *seen |= 1 << dir.index();

        let (first, second) = deflect(grid[pos], dir);
        for out in std::iter::once(first).chain(second) {
            if let Some(next) = step(grid, pos, out) {
                beams.push((next, out));
            }
        }
    }

    visited.iter().filter(|&&bits| bits != 0).count()
}

fn entries(grid: &Grid) -> Vec<(Pos, Direction)> {
    let (rows, cols) = (grid.nrows(), grid.ncols());
    let mut entries = Vec::with_capacity(2 * (rows + cols));
    for row in 0..rows {
        entries.push(((row, 0), East));
        entries.push(((row, cols - 1), West));
    }
    for col in 0..cols {
        entries.push(((0, col), South));
        entries.push(((rows - 1, col), North));
    }
    entries
}

pub fn day16(input: &str) -> Result<(usize, usize)> {
    let grid = parse_grid(input)?;
    if let Some(&tile) = grid
        .iter()
        .find(|&&tile| !matches!(tile, b'.' | b'/' | b'\\' | b'|' | b'-'))
    {
        bail!("unknown tile {:?}", tile as char);
    }

    let part1 = energized(&grid, (0, 0), East);
    let part2 = entries(&grid)
        .into_par_iter()
        .map(|(pos, dir)| energized(&grid, pos, dir))
        .max()
        .unwrap_or_default();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {r"
        .|...\....
        |.-.\.....
        .....|-...
        ........|.
        ..........
        .........\
        ..../.\\..
        .-.-/..|..
        .|....-|.\
        ..//.|....
    "};

    #[test]
    fn test_day16() -> Result<()> {
        assert_eq!(day16(EXAMPLE)?, (46, 51));
        Ok(())
    }

    #[test]
    fn best_entry_is_from_the_top() -> Result<()> {
        let grid = parse_grid(EXAMPLE)?;
        assert_eq!(energized(&grid, (0, 3), South), 51);
        Ok(())
    }

    #[test]
    fn best_entry_is_from_the_bottom() -> Result<()> {
        let input = ".-.\n...\n...\n";
        let grid = parse_grid(input)?;
        assert_eq!(energized(&grid, (2, 1), North), 5);
        assert_eq!(energized(&grid, (0, 1), South), 3);
        assert_eq!(day16(input)?, (3, 5));
        Ok(())
    }

    #[test]
    fn first_tile_can_redirect() -> Result<()> {
        let grid = parse_grid("\\..\n...\n")?;
        assert_eq!(energized(&grid, (0, 0), East), 2);
        Ok(())
    }
}
