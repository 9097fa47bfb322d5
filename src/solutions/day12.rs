use anyhow::{ensure, Context, Result};
use rayon::prelude::*;

struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    fn parse(line: &str) -> Result<Self> {
        let (springs, groups) = line
            .split_once(' ')
            .with_context(|| format!("malformed record {line:?}"))?;
        ensure!(
            springs.bytes().all(|b| matches!(b, b'.' | b'#' | b'?')),
            "invalid springs {springs:?}"
        );
        let groups = groups
            .split(',')
            .map(|g| g.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            springs: springs.as_bytes().to_vec(),
            groups,
        })
    }

    fn unfold(&self) -> Self {
        let mut springs = self.springs.clone();
        for _ in 1..5 {
            springs.push(b'?');
            springs.extend_from_slice(&self.springs);
        }
        Self {
            springs,
            groups: self.groups.repeat(5),
        }
    }

    fn arrangements(&self) -> usize {
        let (springs, groups) = (&self.springs, &self.groups);
        let n = springs.len();
        let m = groups.len();

        // ways[i][j]: arrangements of groups[j..] within springs[i..]; row n + 1 stands in
        // for "past the end" after a group that closed the row
        let mut ways = vec![vec![0usize; m + 1]; n + 2];
        ways[n][m] = 1;
        ways[n + 1][m] = 1;

        for i in (0..n).rev() {
            for j in (0..=m).rev() {
                let mut count = 0;
                if springs[i] != b'#' {
                    count += ways[i + 1][j];
                }
                if j < m && springs[i] != b'.' {
                    let end = i + groups[j];
                    let fits = end <= n
                        && !springs[i..end].contains(&b'.')
                        && (end == n || springs[end] != b'#');
                    if fits {
                        count += ways[end + 1][j + 1];
                    }
                }
                ways[i][j] = count;
            }
        }
        ways[0][0]
    }
}

pub fn day12(input: &str) -> Result<(usize, usize)> {
    let records = input
        .lines()
        .filter(|line| !line.is_empty())
        .map(Record::parse)
        .collect::<Result<Vec<_>>>()?;

    let part1 = records.par_iter().map(Record::arrangements).sum();
    let part2 = records
        .par_iter()
        .map(|record| record.unfold().arrangements())
        .sum();

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day12() -> Result<()> {
        let example = indoc! {"
            ???.### 1,1,3
            .??..??...?##. 1,1,3
            ?#?#?#?#?#?#?#? 1,3,1,6
            ????.#...#... 4,1,1
            ????.######..#####. 1,6,5
            ?###???????? 3,2,1
        "};
        assert_eq!(day12(example)?, (21, 525152));
        Ok(())
    }

    #[test]
    fn counts_single_records() -> Result<()> {
        let count = |line| Record::parse(line).map(|r| r.arrangements());
        assert_eq!(count("?###???????? 3,2,1")?, 10);
        assert_eq!(count(".??..??...?##. 1,1,3")?, 4);
        assert_eq!(count("### 2")?, 0);
        Ok(())
    }
}
