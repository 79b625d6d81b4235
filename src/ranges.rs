//! Range-string grammar.
//!
//! Range tables are written in the usual shorthand (`"77+"`, `"AJs+"`,
//! `"A5s-A2s"`, `"KQo"`, `"pocket pairs"`). Each entry is compiled once into a
//! [`RangeMatcher`] and then evaluated against hands without touching the
//! string again. Entries that cannot be read compile to [`RangeMatcher::Never`]:
//! range tables are trusted configuration, so a bad entry simply matches
//! nothing.

use log::warn;

use crate::cards::{all_hands, Hand, HandType, Rank};

const TOTAL_COMBOS: f64 = 1326.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeMatcher {
    /// A single hand class: `"AKs"`, `"QQ"`, `"72o"`.
    Exact(Hand),
    /// Two distinct ranks without a suffix (`"AK"`): suited or offsuit.
    EitherSuit { high: Rank, low: Rank },
    /// `"77+"`: the pair and every higher pair.
    PairPlus(Rank),
    /// `"AJs+"`, `"KQo+"`, `"AJ+"`.
    NonPairPlus {
        high: Rank,
        low: Rank,
        suit: Option<HandType>,
    },
    /// `"88-22"`, endpoints inclusive in either order.
    PairDash { lowest: Rank, highest: Rank },
    /// `"A5s-A2s"`: fixed top card, kicker between the endpoints.
    NonPairDash {
        high: Rank,
        lowest: Rank,
        highest: Rank,
        suit: Option<HandType>,
    },
    PocketPairs,
    SuitedBroadway,
    Never,
}

/// A hand token inside a range expression, ranks already high-low.
#[derive(Debug, Clone, Copy)]
struct BaseToken {
    high: Rank,
    low: Rank,
    suit: Option<HandType>,
}

impl BaseToken {
    fn parse(token: &str) -> Option<BaseToken> {
        let chars: Vec<char> = token.trim().to_uppercase().chars().collect();
        if chars.len() != 2 && chars.len() != 3 {
            return None;
        }
        let r1 = Rank::from_char(chars[0]).ok()?;
        let r2 = Rank::from_char(chars[1]).ok()?;
        let suit = match chars.get(2) {
            None => None,
            Some('S') => Some(HandType::Suited),
            Some('O') => Some(HandType::Offsuit),
            Some(_) => return None,
        };
        Some(BaseToken {
            high: r1.max(r2),
            low: r1.min(r2),
            suit,
        })
    }

    fn is_pair(&self) -> bool {
        self.high == self.low
    }
}

impl RangeMatcher {
    /// Compiles one range entry. Never fails; unreadable entries become `Never`.
    pub fn compile(expr: &str) -> RangeMatcher {
        match Self::try_compile(expr) {
            Some(matcher) => matcher,
            None => {
                warn!("Unreadable range entry '{}' will never match", expr);
                RangeMatcher::Never
            }
        }
    }

    fn try_compile(expr: &str) -> Option<RangeMatcher> {
        let expr = expr.trim();
        match expr.to_ascii_lowercase().as_str() {
            "pocket pairs" => return Some(RangeMatcher::PocketPairs),
            "suited broadway" => return Some(RangeMatcher::SuitedBroadway),
            _ => {}
        }

        if let Some(base) = expr.strip_suffix('+') {
            return compile_plus(base);
        }
        if let Some((start, end)) = expr.split_once('-') {
            return compile_dash(start, end);
        }
        compile_exact(expr)
    }

    pub fn matches(&self, hand: &Hand) -> bool {
        match *self {
            RangeMatcher::Exact(exact) => *hand == exact,
            RangeMatcher::EitherSuit { high, low } => {
                !hand.is_pair() && hand.high() == high && hand.low() == low
            }
            RangeMatcher::PairPlus(base) => hand.is_pair() && hand.high() >= base,
            RangeMatcher::NonPairPlus { high, low, suit } => {
                if hand.is_pair() || !suit_matches(suit, hand) {
                    return false;
                }
                // Fixed top card, kicker at or above the base kicker.
                let kicker_up = hand.high() == high && hand.low() >= low;
                // Higher top card with a kicker no weaker than the base kicker.
                let higher_top = hand.high() > high && hand.low() >= low;
                kicker_up || higher_top
            }
            RangeMatcher::PairDash { lowest, highest } => {
                hand.is_pair() && hand.high() >= lowest && hand.high() <= highest
            }
            RangeMatcher::NonPairDash {
                high,
                lowest,
                highest,
                suit,
            } => {
                !hand.is_pair()
                    && suit_matches(suit, hand)
                    && hand.high() == high
                    && hand.low() >= lowest
                    && hand.low() <= highest
            }
            RangeMatcher::PocketPairs => hand.is_pair(),
            RangeMatcher::SuitedBroadway => {
                hand.is_suited() && hand.high().is_broadway() && hand.low().is_broadway()
            }
            RangeMatcher::Never => false,
        }
    }
}

fn suit_matches(suit: Option<HandType>, hand: &Hand) -> bool {
    suit.map_or(true, |t| hand.hand_type() == t)
}

fn compile_exact(token: &str) -> Option<RangeMatcher> {
    let base = BaseToken::parse(token)?;
    if base.is_pair() {
        // "QQs" is not a hand.
        return base.suit.is_none().then(|| RangeMatcher::Exact(Hand::pair(base.high)));
    }
    Some(match base.suit {
        Some(suit) => RangeMatcher::Exact(Hand::new(base.high, base.low, suit == HandType::Suited)),
        None => RangeMatcher::EitherSuit {
            high: base.high,
            low: base.low,
        },
    })
}

fn compile_plus(token: &str) -> Option<RangeMatcher> {
    let base = BaseToken::parse(token)?;
    if base.is_pair() {
        return base.suit.is_none().then_some(RangeMatcher::PairPlus(base.high));
    }
    Some(RangeMatcher::NonPairPlus {
        high: base.high,
        low: base.low,
        suit: base.suit,
    })
}

fn compile_dash(start: &str, end: &str) -> Option<RangeMatcher> {
    let start = BaseToken::parse(start)?;
    let end = BaseToken::parse(end)?;

    if start.is_pair() && end.is_pair() {
        if start.suit.is_some() || end.suit.is_some() {
            return None;
        }
        return Some(RangeMatcher::PairDash {
            lowest: start.high.min(end.high),
            highest: start.high.max(end.high),
        });
    }

    if start.is_pair() || end.is_pair() || start.high != end.high || start.suit != end.suit {
        return None;
    }
    Some(RangeMatcher::NonPairDash {
        high: start.high,
        lowest: start.low.min(end.low),
        highest: start.low.max(end.low),
        suit: start.suit,
    })
}

/// An ordered list of range entries, compiled once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledRange {
    exprs: Vec<String>,
    matchers: Vec<RangeMatcher>,
}

impl CompiledRange {
    pub fn compile<S: AsRef<str>>(exprs: &[S]) -> CompiledRange {
        let exprs: Vec<String> = exprs.iter().map(|e| e.as_ref().trim().to_string()).collect();
        let matchers = exprs.iter().map(|e| RangeMatcher::compile(e)).collect();
        CompiledRange { exprs, matchers }
    }

    /// Compiles a comma-separated list such as `"QQ+, AK, A5s-A2s"`.
    pub fn parse(range_str: &str) -> CompiledRange {
        let parts: Vec<&str> = range_str
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        CompiledRange::compile(&parts)
    }

    pub fn contains(&self, hand: &Hand) -> bool {
        self.matchers.iter().any(|m| m.matches(hand))
    }

    /// The first entry, in table order, that contains `hand`.
    pub fn matching_expr(&self, hand: &Hand) -> Option<&str> {
        self.matchers
            .iter()
            .position(|m| m.matches(hand))
            .map(|i| self.exprs[i].as_str())
    }

    pub fn exprs(&self) -> &[String] {
        &self.exprs
    }

    pub fn matchers(&self) -> &[RangeMatcher] {
        &self.matchers
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Every hand class in the range, chart order.
    pub fn hands(&self) -> Vec<Hand> {
        all_hands().into_iter().filter(|h| self.contains(h)).collect()
    }
}

/// Whether `hand` belongs to the range written as `range_expr`.
pub fn matches(hand: &Hand, range_expr: &str) -> bool {
    RangeMatcher::compile(range_expr).matches(hand)
}

/// Whether any of `range_exprs` contains `hand`.
pub fn is_in_any_range<S: AsRef<str>>(hand: &Hand, range_exprs: &[S]) -> bool {
    range_exprs.iter().any(|e| matches(hand, e.as_ref()))
}

pub fn combo_count(hand: &Hand) -> u32 {
    match hand.hand_type() {
        HandType::Pair => 6,
        HandType::Suited => 4,
        HandType::Offsuit => 12,
    }
}

pub fn total_combos(hands: &[Hand]) -> u32 {
    hands.iter().map(combo_count).sum()
}

pub fn range_pct(hands: &[Hand]) -> f64 {
    total_combos(hands) as f64 / TOTAL_COMBOS * 100.0
}
