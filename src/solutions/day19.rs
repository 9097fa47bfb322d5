use anyhow::{bail, ensure, Context, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

const CATEGORIES: &str = "xmas";
const START: &str = "in";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'a> {
    Accept,
    Reject,
    Workflow(&'a str),
}

impl<'a> Target<'a> {
    fn new(name: &'a str) -> Self {
        match name {
            "A" => Target::Accept,
            "R" => Target::Reject,
            name => Target::Workflow(name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Less,
    Greater,
}

struct Rule<'a> {
    category: usize,
    op: Op,
    value: i64,
    target: Target<'a>,
}

struct Workflow<'a> {
    rules: Vec<Rule<'a>>,
    fallback: Target<'a>,
}

/// Inclusive rating bounds per category.
type Ratings = [(i64, i64); 4];

impl Rule<'_> {
    fn matches(&self, part: &[i64; 4]) -> bool {
        let rating = part[self.category];
        match self.op {
            Op::Less => rating < self.value,
            Op::Greater => rating > self.value,
        }
    }

    /// Splits `ranges` into the matching and the remaining part; either may be empty.
    fn split(&self, ranges: &Ratings) -> (Option<Ratings>, Option<Ratings>) {
        let (lo, hi) = ranges[self.category];
        let (matching, rest) = match self.op {
            Op::Less => ((lo, hi.min(self.value - 1)), (lo.max(self.value), hi)),
            Op::Greater => ((lo.max(self.value + 1), hi), (lo, hi.min(self.value))),
        };
        let with = |bounds: (i64, i64)| {
            (bounds.0 <= bounds.1).then(|| {
                let mut ranges = *ranges;
                ranges[self.category] = bounds;
                ranges
            })
        };
        (with(matching), with(rest))
    }
}

struct System<'a> {
    workflows: FxHashMap<&'a str, Workflow<'a>>,
    parts: Vec<[i64; 4]>,
}

fn category(name: &str) -> Result<usize> {
    CATEGORIES
        .find(name)
        .filter(|_| name.len() == 1)
        .with_context(|| format!("unknown category {name:?}"))
}

fn parse(input: &str) -> Result<System<'_>> {
    let workflow_re = Regex::new(r"^(\w+)\{(.*)\}$")?;
    let rule_re = Regex::new(r"^(\w)([<>])(\d+):(\w+)$")?;
    let part_re = Regex::new(r"^\{x=(\d+),m=(\d+),a=(\d+),s=(\d+)\}$")?;

    let mut workflows = FxHashMap::default();
    let mut parts = Vec::new();

    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(caps) = part_re.captures(line) {
            let mut part = [0; 4];
            for (rating, cap) in part.iter_mut().zip(caps.iter().skip(1)) {
                *rating = cap.context("missing rating")?.as_str().parse::<i64>()?;
            }
            parts.push(part);
            continue;
        }

        let caps = workflow_re
            .captures(line)
            .with_context(|| format!("malformed line {line:?}"))?;
        let name = caps.get(1).context("missing name")?.as_str();
        let mut steps: Vec<&str> = caps
            .get(2)
            .context("missing rules")?
            .as_str()
            .split(',')
            .collect();
        let fallback = Target::new(steps.pop().context("empty workflow")?);

        let rules = steps
            .into_iter()
            .map(|step| -> Result<Rule> {
                let caps = rule_re
                    .captures(step)
                    .with_context(|| format!("malformed rule {step:?}"))?;
                let (_, [category_name, op, value, target]) = caps.extract();
                Ok(Rule {
                    category: category(category_name)?,
                    op: if op == "<" { Op::Less } else { Op::Greater },
                    value: value.parse::<i64>()?,
                    target: Target::new(target),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if workflows.insert(name, Workflow { rules, fallback }).is_some() {
            bail!("workflow {name} defined twice");
        }
    }

    ensure!(workflows.contains_key(START), "no workflow named {START}");
    Ok(System { workflows, parts })
}

impl System<'_> {
    fn workflow(&self, name: &str) -> Result<&Workflow<'_>> {
        self.workflows
            .get(name)
            .with_context(|| format!("unknown workflow {name}"))
    }

    fn accepts(&self, part: &[i64; 4]) -> Result<bool> {
        let mut target = Target::Workflow(START);
        // a part visits every workflow at most once unless they loop
        for _ in 0..=self.workflows.len() {
            let name = match target {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(name) => name,
            };
            let workflow = self.workflow(name)?;
            target = workflow
                .rules
                .iter()
                .find(|rule| rule.matches(part))
                .map_or(workflow.fallback, |rule| rule.target);
        }
        bail!("workflows loop forever")
    }

    /// Distinct accepted rating combinations with every rating in `1..=4000`.
    fn accepted_combinations(&self) -> Result<i64> {
        let mut total = 0;
        let mut pending = vec![(Target::Workflow(START), [(1, 4000); 4], 0)];

        while let Some((target, ranges, depth)) = pending.pop() {
            ensure!(depth <= self.workflows.len(), "workflows loop forever");
            let name = match target {
                Target::Accept => {
                    total += ranges.iter().map(|(lo, hi)| hi - lo + 1).product::<i64>();
                    continue;
                }
                Target::Reject => continue,
                Target::Workflow(name) => name,
            };

            let workflow = self.workflow(name)?;
            let mut rest = Some(ranges);
            for rule in &workflow.rules {
                let Some(ranges) = rest else { break };
                let (matching, remaining) = rule.split(&ranges);
                if let Some(matching) = matching {
                    pending.push((rule.target, matching, depth + 1));
                }
                rest = remaining;
            }
            if let Some(ranges) = rest {
                pending.push((workflow.fallback, ranges, depth + 1));
            }
        }

        Ok(total)
    }
}

pub fn day19(input: &str) -> Result<(i64, i64)> {
    let system = parse(input)?;

    let mut part1 = 0;
    for part in &system.parts {
        if system.accepts(part)? {
            part1 += part.iter().sum::<i64>();
        }
    }
    let part2 = system.accepted_combinations()?;

    Ok((part1, part2))
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    #[test]
    fn test_day19() -> Result<()> {
        let example = indoc! {"
            px{a<2006:qkq,m>2090:A,rfg}
            pv{a>1716:R,A}
            lnx{m>1548:A,A}
            rfg{s<537:gd,x>2440:R,A}
            qs{s>3448:A,lnx}
            qkq{x<1416:A,crn}
            crn{x>2662:A,R}
            in{s<1351:px,qqz}
            qqz{s>2770:qs,m<1801:hdj,R}
            gd{a>3333:R,R}
            hdj{m>838:A,pv}

            {x=787,m=2655,a=1222,s=2876}
            {x=1679,m=44,a=2067,s=496}
            {x=2036,m=264,a=79,s=2244}
            {x=2461,m=1339,a=466,s=291}
            {x=2127,m=1623,a=2188,s=1013}
        "};
        assert_eq!(day19(example)?, (19114, 167409079868000));
        Ok(())
    }

    #[test]
    fn accept_everything() -> Result<()> {
        let (_, combinations) = day19("in{x<4001:A,R}\n")?;
        assert_eq!(combinations, 4000i64.pow(4));
        Ok(())
    }

    #[test]
    fn rejects_looping_workflows() {
        assert!(day19("in{x<10:a,R}\na{m>0:in,A}\n\n{x=1,m=2,a=3,s=4}\n").is_err());
    }
}
