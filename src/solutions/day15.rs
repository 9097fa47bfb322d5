use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use memchr::memchr_iter;

fn hash(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .fold(0, |h, &b| (h + b as usize) * 17 % 256)
}

/// Comma separated steps with line breaks removed.
fn steps(input: &str) -> Vec<Vec<u8>> {
    let bytes: Vec<u8> = input
        .bytes()
        .filter(|&b| b != b'\n' && b != b'\r')
        .collect();
    let mut steps = Vec::new();
    let mut start = 0;
    for end in memchr_iter(b',', &bytes).chain([bytes.len()]) {
        if end > start {
            steps.push(bytes[start..end].to_vec());
        }
        start = end + 1;
    }
    steps
}

fn focusing_power(steps: &[Vec<u8>]) -> Result<usize> {
    let mut boxes: Vec<IndexMap<&[u8], usize>> = vec![IndexMap::new(); 256];

    for step in steps {
        if let Some(label) = step.strip_suffix(b"-") {
            boxes[hash(label)].shift_remove(label);
        } else if let Some(eq) = step.iter().position(|&b| b == b'=') {
            let (label, focal) = (&step[..eq], &step[eq + 1..]);
            let focal = std::str::from_utf8(focal)?
                .parse::<usize>()
                .with_context(|| {
                    format!("invalid focal length in {:?}", String::from_utf8_lossy(step))
                })?;
            // an existing lens keeps its slot
            boxes[hash(label)].insert(label, focal);
        } else {
            bail!("invalid step {:?}", String::from_utf8_lossy(step));
        }
    }

    Ok(boxes
        .iter()
        .enumerate()
        .flat_map(|(i, lenses)| {
            lenses
                .values()
                .enumerate()
                .map(move |(slot, focal)| (i + 1) * (slot + 1) * focal)
        })
        .sum())
}

pub fn day15(input: &str) -> Result<(usize, usize)> {
    let steps = steps(input);
    let part1 = steps.iter().map(|step| hash(step)).sum();
    let part2 = focusing_power(&steps)?;
    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day15() -> Result<()> {
        let example = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";
        assert_eq!(day15(example)?, (1320, 145));
        Ok(())
    }

    #[test]
    fn hashes_ascii() {
        assert_eq!(hash(b"HASH"), 52);
        assert_eq!(hash(b"rn"), 0);
        assert_eq!(hash(b"qp"), 1);
    }

    #[test]
    fn ignores_line_breaks() -> Result<()> {
        assert_eq!(day15("rn=1,c\nm-\n")?, day15("rn=1,cm-")?);
        Ok(())
    }
}
