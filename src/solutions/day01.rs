use aho_corasick::AhoCorasick;
use anyhow::Result;

/// Pattern `i` stands for the digit `i % 9 + 1`; the first nine are numeric.
const PATTERNS: [&str; 18] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "one", "two", "three", "four", "five", "six",
    "seven", "eight", "nine",
];

#[derive(Default)]
struct Calibration {
    first: Option<usize>,
    last: Option<usize>,
}

impl Calibration {
    fn push(&mut self, digit: usize) {
        self.first.get_or_insert(digit);
        self.last = Some(digit);
    }

    fn value(&self) -> usize {
        self.first.unwrap_or(0) * 10 + self.last.unwrap_or(0)
    }
}

pub fn day1(input: &str) -> Result<(usize, usize)> {
    // NOTE: regex doesn't work since it doesn't support overlapping matches (look-around)
    let ac = AhoCorasick::new(PATTERNS)?;

    let mut sum_part1 = 0;
    let mut sum_part2 = 0;

    for line in input.lines() {
        let mut numeric = Calibration::default();
        let mut spelled = Calibration::default();

        for mat in ac.find_overlapping_iter(line) {
            let pattern = mat.pattern().as_usize();
            let digit = pattern % 9 + 1;
            if pattern < 9 {
                numeric.push(digit);
            }
            spelled.push(digit);
        }

        sum_part1 += numeric.value();
        sum_part2 += spelled.value();
    }

    Ok((sum_part1, sum_part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day1() -> Result<()> {
        let example_part1 = indoc! {"
            1abc2
            pqr3stu8vwx
            a1b2c3d4e5f
            treb7uchet
        "};
        assert_eq!(day1(example_part1)?, (142, 142));

        let example_part2 = indoc! {"
            two1nine
            eightwothree
            abcone2threexyz
            xtwone3four
            4nineeightseven2
            zoneight234
            7pqrstsixteen
        "};
        assert_eq!(day1(example_part2)?.1, 281);
        assert_eq!(day1("twone\n")?.1, 21);
        Ok(())
    }

    #[test]
    fn last_line_without_newline_counts() -> Result<()> {
        assert_eq!(day1("a1\nb7c")?, (88, 88));
        assert_eq!(day1("nodigits")?, (0, 0));
        Ok(())
    }
}
