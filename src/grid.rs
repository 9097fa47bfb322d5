use anyhow::{ensure, Result};
use memchr::memchr;
use nalgebra::DMatrix;

/// Row-major view of an ASCII map: `grid[(row, col)]`.
pub type Grid = DMatrix<u8>;

pub type Pos = (usize, usize);

pub fn parse_grid(input: &str) -> Result<Grid> {
    let bytes = input.trim_end().as_bytes();
    let first = &bytes[..memchr(b'\n', bytes).unwrap_or(bytes.len())];
    let width = first.strip_suffix(b"\r").unwrap_or(first).len();
    ensure!(width > 0, "grid is empty");

    let mut cells = Vec::with_capacity(bytes.len());
    let mut height = 0;
    for line in input.trim_end().lines() {
        ensure!(
            line.len() == width,
            "line {} has width {}, expected {width}",
            height + 1,
            line.len()
        );
        cells.extend_from_slice(line.as_bytes());
        height += 1;
    }
    Ok(DMatrix::from_row_slice(height, width, &cells))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// `(d_row, d_col)`
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    /// Stable index in `0..4`, usable as a bit position.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Moves `distance` tiles from `pos`, or `None` when that leaves the grid.
pub fn step_by(grid: &Grid, (row, col): Pos, dir: Direction, distance: usize) -> Option<Pos> {
    let (dr, dc) = dir.delta();
    let distance = distance as isize;
    let row = row.checked_add_signed(dr * distance)?;
    let col = col.checked_add_signed(dc * distance)?;
    (row < grid.nrows() && col < grid.ncols()).then_some((row, col))
}

pub fn step(grid: &Grid, pos: Pos, dir: Direction) -> Option<Pos> {
    step_by(grid, pos, dir, 1)
}

/// Positions of the (up to eight) tiles surrounding `pos`.
pub fn neighbours8(grid: &Grid, (row, col): Pos) -> impl Iterator<Item = Pos> + '_ {
    let rows = row.saturating_sub(1)..=(row + 1).min(grid.nrows() - 1);
    rows.flat_map(move |r| {
        let cols = col.saturating_sub(1)..=(col + 1).min(grid.ncols() - 1);
        cols.map(move |c| (r, c))
    })
    .filter(move |&p| p != (row, col))
}

pub fn find(grid: &Grid, needle: u8) -> Option<Pos> {
    (0..grid.nrows())
        .flat_map(|r| (0..grid.ncols()).map(move |c| (r, c)))
        .find(|&p| grid[p] == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() -> Result<()> {
        let grid = parse_grid("ab\ncd\nef\n")?;
        assert_eq!((grid.nrows(), grid.ncols()), (3, 2));
        assert_eq!(grid[(0, 1)], b'b');
        assert_eq!(grid[(2, 0)], b'e');
        assert_eq!(find(&grid, b'd'), Some((1, 1)));
        Ok(())
    }

    #[test]
    fn rejects_ragged_grids() {
        assert!(parse_grid("abc\nde\n").is_err());
        assert!(parse_grid("\n").is_err());
    }

    #[test]
    fn steps_stay_in_bounds() -> Result<()> {
        let grid = parse_grid("...\n...\n")?;
        assert_eq!(step(&grid, (0, 0), Direction::North), None);
        assert_eq!(step(&grid, (0, 0), Direction::East), Some((0, 1)));
        assert_eq!(step_by(&grid, (1, 0), Direction::East, 2), Some((1, 2)));
        assert_eq!(step_by(&grid, (1, 0), Direction::East, 3), None);
        assert_eq!(neighbours8(&grid, (0, 0)).count(), 3);
        assert_eq!(neighbours8(&grid, (1, 1)).count(), 5);
        Ok(())
    }
}
