use anyhow::{Context, Result};
use rustc_hash::FxHashSet;

use crate::numbers;

/// Points of a card with `m` winning numbers: 1 doubled for every further match.
fn points(m: usize) -> Result<usize> {
    match m {
        0 => Ok(0),
        m => u32::try_from(m - 1)
            .ok()
            .and_then(|shift| 1usize.checked_shl(shift))
            .with_context(|| format!("{m} matches overflow the card's points")),
    }
}

/// Number of winning numbers on one card.
fn matches(line: &str) -> Result<usize> {
    let (_, numbers_part) = line
        .split_once(':')
        .with_context(|| format!("malformed card {line:?}"))?;
    let (winning, have) = numbers_part
        .split_once('|')
        .with_context(|| format!("card without separator {line:?}"))?;

    let winning: FxHashSet<u32> = numbers::<u32>(winning)?.into_iter().collect();
    Ok(numbers::<u32>(have)?
        .into_iter()
        .filter(|n| winning.contains(n))
        .count())
}

pub fn day4(input: &str) -> Result<(usize, usize)> {
    let matches = input.lines().map(matches).collect::<Result<Vec<_>>>()?;

    let mut part1 = 0usize;
    for &m in &matches {
        part1 = part1.checked_add(points(m)?).context("points overflow")?;
    }

    let mut copies = vec![1usize; matches.len()];
    for (card, &m) in matches.iter().enumerate() {
        let won = card + 1..(card + 1 + m).min(matches.len());
        for next in won {
            copies[next] = copies[next]
                .checked_add(copies[card])
                .context("card copies overflow")?;
        }
    }
    let part2 = copies
        .iter()
        .try_fold(0usize, |total, &n| total.checked_add(n))
        .context("card copies overflow")?;

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day4() -> Result<()> {
        let example = indoc! {"
            Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
            Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
            Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
            Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
            Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
            Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
        "};
        assert_eq!(day4(example)?, (13, 30));
        Ok(())
    }

    #[test]
    fn copies_stop_at_the_last_card() -> Result<()> {
        assert_eq!(day4("Card 1: 1 2 | 1 2\nCard 2: 3 | 4\n")?, (2, 3));
        Ok(())
    }

    #[test]
    fn too_many_matches_is_an_error() -> Result<()> {
        assert_eq!(points(64)?, 1 << 63);
        assert!(points(65).is_err());

        let all = (1..=70).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        assert!(day4(&format!("Card 1: {all} | {all}\n")).is_err());
        Ok(())
    }
}
