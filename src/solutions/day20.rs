use std::collections::VecDeque;

use anyhow::{bail, ensure, Context, Result};
use rustc_hash::FxHashMap;

const BROADCASTER: &str = "broadcaster";
const OUTPUT: &str = "rx";
const PRESSES: usize = 1000;
/// Give up looking for the output's cycles after this many presses.
const MAX_PRESSES: u64 = 1 << 20;

#[derive(Debug, Clone)]
enum Kind {
    Broadcaster,
    FlipFlop { on: bool },
    /// Last pulse level received from each input, keyed by module index.
    Conjunction { memory: FxHashMap<usize, bool> },
    /// Named only as a destination.
    Sink,
}

#[derive(Debug, Clone)]
struct Module<'a> {
    name: &'a str,
    kind: Kind,
    outputs: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse {
    from: usize,
    to: usize,
    high: bool,
}

#[derive(Debug, Clone)]
struct Network<'a> {
    modules: Vec<Module<'a>>,
    index: FxHashMap<&'a str, usize>,
    broadcaster: usize,
}

impl<'a> Network<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let mut modules = Vec::new();
        let mut index = FxHashMap::default();
        let mut destinations = Vec::new();

        for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (source, outputs) = line
                .split_once(" -> ")
                .with_context(|| format!("malformed module {line:?}"))?;
            let (kind, name) = if let Some(name) = source.strip_prefix('%') {
                (Kind::FlipFlop { on: false }, name)
            } else if let Some(name) = source.strip_prefix('&') {
                let memory = FxHashMap::default();
                (Kind::Conjunction { memory }, name)
            } else if source == BROADCASTER {
                (Kind::Broadcaster, source)
            } else {
                bail!("unknown module type {source:?}");
            };
            ensure!(
                index.insert(name, modules.len()).is_none(),
                "module {name} defined twice"
            );
            modules.push(Module {
                name,
                kind,
                outputs: Vec::new(),
            });
            destinations.push(outputs.split(", ").map(str::trim).collect::<Vec<_>>());
        }

        for (i, names) in destinations.into_iter().enumerate() {
            for name in names {
                let to = *index.entry(name).or_insert_with(|| {
                    modules.push(Module {
                        name,
                        kind: Kind::Sink,
                        outputs: Vec::new(),
                    });
                    modules.len() - 1
                });
                modules[i].outputs.push(to);
                if let Kind::Conjunction { memory } = &mut modules[to].kind {
                    memory.insert(i, false);
                }
            }
        }

        let broadcaster = *index.get(BROADCASTER).context("no broadcaster")?;
        Ok(Self {
            modules,
            index,
            broadcaster,
        })
    }

    /// Presses the button once and hands every delivered pulse, in order, to `observe`.
    fn press(&mut self, mut observe: impl FnMut(Pulse)) {
        let mut queue = VecDeque::from([Pulse {
            from: self.broadcaster,
            to: self.broadcaster,
            high: false,
        }]);

        while let Some(pulse) = queue.pop_front() {
            observe(pulse);
            let module = &mut self.modules[pulse.to];
            let high = match &mut module.kind {
                Kind::Broadcaster => pulse.high,
                Kind::FlipFlop { on } => {
                    if pulse.high {
                        continue;
                    }
                    *on = !*on;
                    *on
                }
                Kind::Conjunction { memory } => {
                    memory.insert(pulse.from, pulse.high);
                    !memory.values().all(|&high| high)
                }
                Kind::Sink => continue,
            };
            queue.extend(module.outputs.iter().map(|&to| Pulse {
                from: pulse.to,
                to,
                high,
            }));
        }
    }
}

fn pulse_product(mut network: Network) -> usize {
    let mut counts = [0; 2];
    for _ in 0..PRESSES {
        network.press(|pulse| counts[pulse.high as usize] += 1);
    }
    counts[0] * counts[1]
}

/// Fewest presses until a low pulse reaches the output module.
///
/// The output must be fed by a single conjunction. It sends low once all of its inputs
/// sent high during one press, so the answer is the lcm of the press counts at which each
/// input first does.
fn presses_until_output(mut network: Network) -> Result<u64> {
    let output = *network
        .index
        .get(OUTPUT)
        .with_context(|| format!("no module named {OUTPUT}"))?;
    let feeders: Vec<usize> = (0..network.modules.len())
        .filter(|&i| network.modules[i].outputs.contains(&output))
        .collect();
    let &[feeder] = feeders.as_slice() else {
        bail!("{OUTPUT} must have exactly one input, found {}", feeders.len());
    };
    let Kind::Conjunction { memory } = &network.modules[feeder].kind else {
        bail!("{} feeding {OUTPUT} is not a conjunction", network.modules[feeder].name);
    };

    let mut cycles: FxHashMap<usize, Option<u64>> = memory.keys().map(|&i| (i, None)).collect();
    for presses in 1..=MAX_PRESSES {
        network.press(|pulse| {
            if pulse.to == feeder && pulse.high {
                if let Some(cycle @ None) = cycles.get_mut(&pulse.from) {
                    *cycle = Some(presses);
                }
            }
        });

        if cycles.values().all(Option::is_some) {
            let mut total = 1;
            for (&input, &cycle) in &cycles {
                let cycle = cycle.unwrap_or(1);
                tracing::debug!(input = network.modules[input].name, cycle, "input sends high");
                total = num::integer::lcm(total, cycle);
            }
            return Ok(total);
        }
    }
    bail!("no cycle found within {MAX_PRESSES} presses")
}

pub fn day20(input: &str) -> Result<(usize, u64)> {
    let network = Network::parse(input)?;
    let part1 = pulse_product(network.clone());
    let part2 = presses_until_output(network)?;
    Ok((part1, part2))
}
