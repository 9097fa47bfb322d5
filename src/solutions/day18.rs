use anyhow::{bail, Context, Result};

use crate::grid::Direction::{self, East, North, South, West};

struct Dig {
    dir: Direction,
    meters: i64,
}

struct Instruction {
    plan: Dig,
    /// The plan hidden in the colour code.
    color: Dig,
}

fn parse_line(line: &str) -> Result<Instruction> {
    let mut parts = line.split_ascii_whitespace();
    let (Some(dir), Some(meters), Some(color)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("malformed dig instruction {line:?}");
    };

    let dir = match dir {
        "U" => North,
        "R" => East,
        "D" => South,
        "L" => West,
        _ => bail!("unknown direction {dir:?}"),
    };
    let meters = meters.parse::<i64>()?;

    let hex = color
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
        .with_context(|| format!("malformed color {color:?}"))?;
    let color_dir = match &hex[5..] {
        "0" => East,
        "1" => South,
        "2" => West,
        "3" => North,
        d => bail!("unknown direction digit {d:?}"),
    };
    let color_meters = i64::from_str_radix(&hex[..5], 16)?;

    Ok(Instruction {
        plan: Dig { dir, meters },
        color: Dig {
            dir: color_dir,
            meters: color_meters,
        },
    })
}

/// Cubic meters of the lagoon: interior (shoelace + Pick's theorem) plus the trench itself.
fn lagoon_volume<'a>(digs: impl Iterator<Item = &'a Dig>) -> i64 {
    let (mut row, mut col) = (0i64, 0i64);
    let mut twice_area = 0;
    let mut perimeter = 0;

    for dig in digs {
        let (dr, dc) = dig.dir.delta();
        let next = (row + dr as i64 * dig.meters, col + dc as i64 * dig.meters);
        twice_area += col * next.0 - row * next.1;
        perimeter += dig.meters;
        (row, col) = next;
    }

    twice_area.abs() / 2 + perimeter / 2 + 1
}

pub fn day18(input: &str) -> Result<(i64, i64)> {
    let instructions = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect::<Result<Vec<_>>>()?;

    let part1 = lagoon_volume(instructions.iter().map(|i| &i.plan));
    let part2 = lagoon_volume(instructions.iter().map(|i| &i.color));
    Ok((part1, part2))
}
