use std::ops::Range;

use anyhow::{bail, ensure, Context, Result};

use crate::numbers;

struct Rule {
    source: Range<u64>,
    dest: u64,
}

impl Rule {
    fn translate(&self, x: u64) -> u64 {
        x - self.source.start + self.dest
    }
}

struct Almanac {
    seeds: Vec<u64>,
    sections: Vec<Vec<Rule>>,
}

fn parse(input: &str) -> Result<Almanac> {
    let input = input.replace("\r\n", "\n");
    let mut chunks = input.trim().split("\n\n");
    let seeds = chunks
        .next()
        .and_then(|line| line.strip_prefix("seeds:"))
        .context("missing seeds")?;
    let seeds = numbers::<u64>(seeds)?;

    let sections = chunks
        .map(|chunk| {
            chunk
                .lines()
                .skip(1)
                .map(|line| -> Result<Rule> {
                    let &[dest, source, len] = numbers::<u64>(line)?.as_slice() else {
                        bail!("expected three numbers in {line:?}");
                    };
                    Ok(Rule {
                        source: source..source + len,
                        dest,
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<_>>()?;

    Ok(Almanac { seeds, sections })
}

fn convert(x: u64, rules: &[Rule]) -> u64 {
    rules
        .iter()
        .find(|rule| rule.source.contains(&x))
        .map_or(x, |rule| rule.translate(x))
}

/// Splits `ranges` at the rule borders; covered pieces are shifted, the rest pass through.
fn convert_ranges(ranges: Vec<Range<u64>>, rules: &[Rule]) -> Vec<Range<u64>> {
    let mut converted = Vec::new();
    let mut pending = ranges;

    for rule in rules {
        let mut untouched = Vec::new();
        for range in pending {
            let before = range.start..range.end.min(rule.source.start);
            let inside = range.start.max(rule.source.start)..range.end.min(rule.source.end);
            let after = range.start.max(rule.source.end)..range.end;

            untouched.extend([before, after].into_iter().filter(|r| !r.is_empty()));
            if !inside.is_empty() {
                converted.push(rule.translate(inside.start)..rule.translate(inside.end));
            }
        }
        pending = untouched;
    }

    converted.extend(pending);
    converted
}

fn lowest_location(almanac: &Almanac) -> u64 {
    almanac
        .seeds
        .iter()
        .map(|&seed| {
            almanac
                .sections
                .iter()
                .fold(seed, |x, rules| convert(x, rules))
        })
        .min()
        .unwrap_or_default()
}

/// Lowest location when the seeds are read as `(start, length)` pairs.
fn lowest_range_location(almanac: &Almanac) -> Result<u64> {
    ensure!(almanac.seeds.len() % 2 == 0, "seed ranges come in pairs");
    Ok(almanac
        .seeds
        .chunks_exact(2)
        .flat_map(|pair| {
            almanac
                .sections
                .iter()
                .fold(vec![pair[0]..pair[0] + pair[1]], |ranges, rules| {
                    convert_ranges(ranges, rules)
                })
        })
        .map(|range| range.start)
        .min()
        .unwrap_or_default())
}

pub fn day5(input: &str) -> Result<(u64, u64)> {
    let almanac = parse(input)?;
    ensure!(!almanac.seeds.is_empty(), "no seeds");
    Ok((lowest_location(&almanac), lowest_range_location(&almanac)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day5() -> Result<()> {
        let example = indoc! {"
            seeds: 79 14 55 13

            seed-to-soil map:
            50 98 2
            52 50 48

            soil-to-fertilizer map:
            0 15 37
            37 52 2
            39 0 15

            fertilizer-to-water map:
            49 53 8
            0 11 42
            42 0 7
            57 7 4

            water-to-light map:
            88 18 7
            18 25 70

            light-to-temperature map:
            45 77 23
            81 45 19
            68 64 13

            temperature-to-humidity map:
            0 69 1
            1 0 69

            humidity-to-location map:
            60 56 37
            56 93 4
        "};
        assert_eq!(day5(example)?, (35, 46));
        Ok(())
    }

    #[test]
    fn odd_seed_count_only_fails_ranges() -> Result<()> {
        let almanac = parse("seeds: 1 5 9\n\nseed-to-soil map:\n20 0 6\n")?;
        assert_eq!(lowest_location(&almanac), 9);
        assert!(lowest_range_location(&almanac).is_err());
        Ok(())
    }

    #[test]
    fn ranges_split_at_rule_borders() {
        let rules = [Rule {
            source: 10..20,
            dest: 100,
        }];
        let mut out = convert_ranges(vec![5..25], &rules);
        out.sort_by_key(|r| r.start);
        assert_eq!(out, vec![5..10, 20..25, 100..110]);
    }
}
