use anyhow::{bail, ensure, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

const ORDER: &[u8; 13] = b"23456789TJQKA";
const ORDER_WITH_JOKERS: &[u8; 13] = b"J23456789TQKA";

struct Hand<'a> {
    cards: &'a [u8],
    bid: usize,
}

fn hand_type(cards: &[u8], jokers: bool) -> HandType {
    let mut counts = [0u8; 13];
    let mut wild = 0;
    for &card in cards {
        match ORDER.iter().position(|&c| c == card) {
            Some(_) if jokers && card == b'J' => wild += 1,
            Some(i) => counts[i] += 1,
            None => {}
        }
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts[0] += wild;

    match (counts[0], counts[1]) {
        (5, _) => HandType::FiveOfAKind,
        (4, _) => HandType::FourOfAKind,
        (3, 2) => HandType::FullHouse,
        (3, _) => HandType::ThreeOfAKind,
        (2, 2) => HandType::TwoPair,
        (2, _) => HandType::OnePair,
        _ => HandType::HighCard,
    }
}

fn strength(cards: &[u8], jokers: bool) -> (HandType, [usize; 5]) {
    let order = if jokers { ORDER_WITH_JOKERS } else { ORDER };
    let mut ranks = [0; 5];
    for (rank, card) in ranks.iter_mut().zip(cards) {
        *rank = order.iter().position(|c| c == card).unwrap_or(0);
    }
    (hand_type(cards, jokers), ranks)
}

fn parse_hand(line: &str) -> Result<Hand<'_>> {
    let (cards, bid) = line
        .split_once(' ')
        .with_context(|| format!("malformed hand {line:?}"))?;
    let cards = cards.as_bytes();
    ensure!(cards.len() == 5, "hand {line:?} must have five cards");
    if let Some(card) = cards.iter().find(|c| !ORDER.contains(c)) {
        bail!("unknown card {:?}", *card as char);
    }
    Ok(Hand {
        cards,
        bid: bid.trim().parse()?,
    })
}

fn winnings(hands: &mut [Hand], jokers: bool) -> usize {
    hands.sort_by_cached_key(|hand| strength(hand.cards, jokers));
    hands
        .iter()
        .enumerate()
        .map(|(i, hand)| (i + 1) * hand.bid)
        .sum()
}

pub fn day7(input: &str) -> Result<(usize, usize)> {
    let mut hands = input.lines().map(parse_hand).collect::<Result<Vec<_>>>()?;

    let part1 = winnings(&mut hands, false);
    let part2 = winnings(&mut hands, true);

    Ok((part1, part2))
}
