use anyhow::{bail, ensure, Context, Result};
use rustc_hash::FxHashMap;

struct Map<'a> {
    /// `true` means take the right branch.
    instructions: Vec<bool>,
    nodes: FxHashMap<&'a str, (&'a str, &'a str)>,
}

fn parse(input: &str) -> Result<Map<'_>> {
    let mut lines = input.lines();
    let instructions = lines
        .next()
        .context("missing instructions")?
        .bytes()
        .map(|b| match b {
            b'L' => Ok(false),
            b'R' => Ok(true),
            _ => bail!("invalid instruction {:?}", b as char),
        })
        .collect::<Result<Vec<_>>>()?;
    ensure!(!instructions.is_empty(), "empty instructions");

    let mut nodes = FxHashMap::default();
    for line in lines.filter(|line| !line.is_empty()) {
        let (name, branches) = line
            .split_once(" = ")
            .with_context(|| format!("malformed node {line:?}"))?;
        let (left, right) = branches
            .strip_prefix('(')
            .and_then(|b| b.strip_suffix(')'))
            .and_then(|b| b.split_once(", "))
            .with_context(|| format!("malformed branches {line:?}"))?;
        nodes.insert(name, (left, right));
    }

    Ok(Map {
        instructions,
        nodes,
    })
}

impl<'a> Map<'a> {
    /// Steps from `start` to the first end node.
    ///
    /// A walk is in one of `nodes * instructions` states, so an end not met within that many
    /// steps is never met.
    fn steps(&self, start: &'a str, is_end: impl Fn(&str) -> bool) -> Result<u64> {
        let limit = (self.nodes.len() * self.instructions.len()) as u64;
        let mut node = start;
        for (step, &right) in (1..=limit).zip(self.instructions.iter().cycle()) {
            let &(left_node, right_node) = self
                .nodes
                .get(node)
                .with_context(|| format!("unknown node {node}"))?;
            node = if right { right_node } else { left_node };
            if is_end(node) {
                return Ok(step);
            }
        }
        bail!("no end node reachable from {start}")
    }
}

fn part1(map: &Map) -> Result<u64> {
    ensure!(map.nodes.contains_key("AAA"), "no start node AAA");
    map.steps("AAA", |node| node == "ZZZ")
}

fn part2(map: &Map) -> Result<u64> {
    let mut total = 1;
    for &start in map.nodes.keys().filter(|node| node.ends_with('A')) {
        let steps = map.steps(start, |node| node.ends_with('Z'))?;
        tracing::debug!(start, steps, "ghost reaches an end node");
        total = num::integer::lcm(total, steps);
    }
    Ok(total)
}

pub fn day8(input: &str) -> Result<(u64, u64)> {
    let map = parse(input)?;
    Ok((part1(&map)?, part2(&map)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day8() -> Result<()> {
        let example = indoc! {"
            RL

            AAA = (BBB, CCC)
            BBB = (DDD, EEE)
            CCC = (ZZZ, GGG)
            DDD = (DDD, DDD)
            EEE = (EEE, EEE)
            GGG = (GGG, GGG)
            ZZZ = (ZZZ, ZZZ)
        "};
        assert_eq!(part1(&parse(example)?)?, 2);

        let repeating = indoc! {"
            LLR

            AAA = (BBB, BBB)
            BBB = (AAA, ZZZ)
            ZZZ = (ZZZ, ZZZ)
        "};
        assert_eq!(day8(repeating)?, (6, 6));
        Ok(())
    }

    #[test]
    fn test_day8_ghosts() -> Result<()> {
        let example = indoc! {"
            LR

            11A = (11B, XXX)
            11B = (XXX, 11Z)
            11Z = (11B, XXX)
            22A = (22B, XXX)
            22B = (22C, 22C)
            22C = (22Z, 22Z)
            22Z = (22B, 22B)
            XXX = (XXX, XXX)
        "};
        let map = parse(example)?;
        assert_eq!(part2(&map)?, 6);
        assert!(part1(&map).is_err());
        Ok(())
    }

    #[test]
    fn unreachable_end_is_an_error() -> Result<()> {
        let map = parse("L\n\nAAA = (AAA, AAA)\nZZZ = (ZZZ, ZZZ)\n")?;
        assert!(part1(&map).is_err());
        assert!(part2(&map).is_err());

        // one node and one instruction leave room for exactly one step
        let map = parse("L\n\nAAA = (ZZZ, ZZZ)\n")?;
        assert_eq!(part1(&map)?, 1);
        Ok(())
    }
}
