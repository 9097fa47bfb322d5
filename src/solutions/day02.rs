use anyhow::{bail, Context, Result};
use regex::Regex;

/// Cube counts in `red, green, blue` order.
type Cubes = [usize; 3];

const BAG: Cubes = [12, 13, 14];

struct Game {
    id: usize,
    draws: Vec<Cubes>,
}

impl Game {
    fn is_possible(&self) -> bool {
        self.draws
            .iter()
            .all(|draw| draw.iter().zip(BAG).all(|(&seen, limit)| seen <= limit))
    }

    fn power(&self) -> usize {
        let mut fewest = [0; 3];
        for draw in &self.draws {
            for (min, &seen) in fewest.iter_mut().zip(draw) {
                *min = (*min).max(seen);
            }
        }
        fewest.iter().product()
    }
}

fn parse_game(cube_re: &Regex, line: &str) -> Result<Game> {
    let (head, draws) = line
        .split_once(": ")
        .with_context(|| format!("malformed game {line:?}"))?;
    let id = head
        .strip_prefix("Game ")
        .context("missing game id")?
        .parse::<usize>()?;

    let draws = draws
        .split("; ")
        .map(|draw| -> Result<Cubes> {
            let mut cubes = [0; 3];
            for caps in cube_re.captures_iter(draw) {
                let count: usize = caps[1].parse()?;
                let slot = match &caps[2] {
                    "red" => 0,
                    "green" => 1,
                    "blue" => 2,
                    color => bail!("unknown color {color}"),
                };
                cubes[slot] += count;
            }
            Ok(cubes)
        })
        .collect::<Result<_>>()?;

    Ok(Game { id, draws })
}

pub fn day2(input: &str) -> Result<(usize, usize)> {
    let cube_re = Regex::new(r"(\d+) (\w+)")?;
    let games = input
        .lines()
        .map(|line| parse_game(&cube_re, line))
        .collect::<Result<Vec<_>>>()?;

    let part1 = games
        .iter()
        .filter(|game| game.is_possible())
        .map(|game| game.id)
        .sum();
    let part2 = games.iter().map(Game::power).sum();

    Ok((part1, part2))
}
