use anyhow::{ensure, Context, Result};
use petgraph::{algo::dijkstra, graphmap::UnGraphMap};

use crate::grid::{
    find, parse_grid, step, Direction,
    Direction::{East, North, South, West},
    Grid, Pos,
};

fn pipe_ends(tile: u8) -> &'static [Direction] {
    match tile {
        b'|' => &[North, South],
        b'-' => &[East, West],
        b'L' => &[North, East],
        b'J' => &[North, West],
        b'7' => &[South, West],
        b'F' => &[South, East],
        _ => &[],
    }
}

struct Maze {
    grid: Grid,
    start: Pos,
    /// The pipe shape hidden under `S`.
    start_ends: Vec<Direction>,
}

impl Maze {
    fn new(input: &str) -> Result<Self> {
        let grid = parse_grid(input)?;
        let start = find(&grid, b'S').context("no start tile")?;
        let start_ends: Vec<_> = Direction::ALL
            .into_iter()
            .filter(|&dir| {
                step(&grid, start, dir)
                    .is_some_and(|next| pipe_ends(grid[next]).contains(&dir.opposite()))
            })
            .collect();
        ensure!(
            start_ends.len() == 2,
            "start connects to {} pipes, expected 2",
            start_ends.len()
        );
        Ok(Self {
            grid,
            start,
            start_ends,
        })
    }

    fn ends(&self, pos: Pos) -> &[Direction] {
        if pos == self.start {
            &self.start_ends
        } else {
            pipe_ends(self.grid[pos])
        }
    }

    /// Tiles joined by pipes pointing at each other.
    fn graph(&self) -> UnGraphMap<Pos, ()> {
        let mut graph = UnGraphMap::new();
        graph.add_node(self.start);
        for row in 0..self.grid.nrows() {
            for col in 0..self.grid.ncols() {
                let pos = (row, col);
                for &dir in self.ends(pos) {
                    if let Some(next) = step(&self.grid, pos, dir) {
                        if self.ends(next).contains(&dir.opposite()) {
                            graph.add_edge(pos, next, ());
                        }
                    }
                }
            }
        }
        graph
    }
}

pub fn day10(input: &str) -> Result<(usize, usize)> {
    let maze = Maze::new(input)?;
    // only the loop itself is connected to the start
    let distances = dijkstra(&maze.graph(), maze.start, None, |_| 1usize);
    let part1 = distances.values().copied().max().unwrap_or_default();

    let mut part2 = 0;
    for row in 0..maze.grid.nrows() {
        let mut inside = false;
        for col in 0..maze.grid.ncols() {
            let pos = (row, col);
            if distances.contains_key(&pos) {
                if maze.ends(pos).contains(&North) {
                    inside = !inside;
                }
            } else if inside {
                part2 += 1;
            }
        }
    }

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day10() -> Result<()> {
        let simple = indoc! {"
            -L|F7
            7S-7|
            L|7||
            -L-J|
            L|-JF
        "};
        assert_eq!(day10(simple)?, (4, 1));

        let complex = indoc! {"
            ..F7.
            .FJ|.
            SJ.L7
            |F--J
            LJ...
        "};
        assert_eq!(day10(complex)?.0, 8);
        Ok(())
    }

    #[test]
    fn test_day10_enclosed() -> Result<()> {
        let squeezed = indoc! {"
            ...........
            .S-------7.
            .|F-----7|.
            .||.....||.
            .||.....||.
            .|L-7.F-J|.
            .|..|.|..|.
            .L--J.L--J.
            ...........
        "};
        assert_eq!(day10(squeezed)?.1, 4);

        let larger = indoc! {"
            .F----7F7F7F7F-7....
            .|F--7||||||||FJ....
            .||.FJ||||||||L7....
            FJL7L7LJLJ||LJ.L-7..
            L--J.L7...LJS7F-7L7.
            ....F-J..F7FJ|L7L7L7
            ....L7.F7||L7|.L7L7|
            .....|FJLJ|FJ|F7|.LJ
            ....FJL-7.||.||||...
            ....L---J.LJ.LJLJ...
        "};
        assert_eq!(day10(larger)?.1, 8);

        let junk = indoc! {"
            FF7FSF7F7F7F7F7F---7
            L|LJ||||||||||||F--J
            FL-7LJLJ||||||LJL-77
            F--JF--7||LJLJ7F7FJ-
            L---JF-JLJ.||-FJLJJ7
            |F|F-JF---7F7-L7L|7|
            |FFJF7L7F-JF7|JL---7
            7-L-JL7||F7|L7F-7F7|
            L.L7LFJ|||||FJL7||LJ
            L7JLJL-JLJLJL--JLJ.L
        "};
        assert_eq!(day10(junk)?.1, 10);
        Ok(())
    }

    #[test]
    fn start_must_join_two_pipes() {
        assert!(day10("...\n.S.\n...\n").is_err());
    }
}
