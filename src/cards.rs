use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HandError;

/// Ranks in chart order, Ace first.
pub const GRID_RANKS: [Rank; 13] = [
    Rank::Ace,
    Rank::King,
    Rank::Queen,
    Rank::Jack,
    Rank::Ten,
    Rank::Nine,
    Rank::Eight,
    Rank::Seven,
    Rank::Six,
    Rank::Five,
    Rank::Four,
    Rank::Three,
    Rank::Two,
];

/// Number of distinct preflop hand classes (13 pairs, 78 suited, 78 offsuit).
pub const NUM_HANDS: usize = 169;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn from_char(c: char) -> Result<Rank, HandError> {
        match c {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' => Ok(Rank::Ten),
            'J' => Ok(Rank::Jack),
            'Q' => Ok(Rank::Queen),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            _ => Err(HandError::InvalidRank(c)),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Ten through Ace.
    pub fn is_broadway(self) -> bool {
        self >= Rank::Ten
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandType {
    Pair,
    Suited,
    Offsuit,
}

impl HandType {
    /// The trailing character of the canonical form; pairs have none.
    pub fn suffix(self) -> Option<char> {
        match self {
            HandType::Pair => None,
            HandType::Suited => Some('s'),
            HandType::Offsuit => Some('o'),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HandType::Pair => "pair",
            HandType::Suited => "suited",
            HandType::Offsuit => "offsuit",
        }
    }
}

/// A preflop hand class such as `AKs`, `QQ` or `72o`.
///
/// The higher rank always sits in `high`, and the type follows from the ranks
/// plus the suited flag, so the canonical string and the structured form can be
/// rebuilt from each other. Suits are never modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hand {
    high: Rank,
    low: Rank,
    hand_type: HandType,
}

impl Hand {
    /// Builds a hand from two ranks in any order. `suited` is ignored for pairs.
    pub fn new(first: Rank, second: Rank, suited: bool) -> Hand {
        let (high, low) = if first >= second {
            (first, second)
        } else {
            (second, first)
        };
        let hand_type = if high == low {
            HandType::Pair
        } else if suited {
            HandType::Suited
        } else {
            HandType::Offsuit
        };
        Hand {
            high,
            low,
            hand_type,
        }
    }

    pub fn pair(rank: Rank) -> Hand {
        Hand::new(rank, rank, false)
    }

    pub fn high(&self) -> Rank {
        self.high
    }

    pub fn low(&self) -> Rank {
        self.low
    }

    pub fn hand_type(&self) -> HandType {
        self.hand_type
    }

    pub fn is_pair(&self) -> bool {
        self.hand_type == HandType::Pair
    }

    pub fn is_suited(&self) -> bool {
        self.hand_type == HandType::Suited
    }

    /// Canonical form: `"AKs"`, `"QQ"`, `"72o"`.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// The two rank characters without the suited/offsuit suffix.
    pub fn rank_key(&self) -> String {
        format!("{}{}", self.high.to_char(), self.low.to_char())
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high.to_char(), self.low.to_char())?;
        if let Some(suffix) = self.hand_type.suffix() {
            write!(f, "{}", suffix)?;
        }
        Ok(())
    }
}

impl FromStr for Hand {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Hand, HandError> {
        normalize(s)
    }
}

impl TryFrom<String> for Hand {
    type Error = HandError;

    fn try_from(s: String) -> Result<Hand, HandError> {
        normalize(&s)
    }
}

impl From<Hand> for String {
    fn from(hand: Hand) -> String {
        hand.canonical()
    }
}

/// Reads a raw hand token (`"AKs"`, `"qq"`, `" 2As "`) into its canonical hand.
///
/// The token is trimmed and upper-cased, must be 2 or 3 characters long, and
/// its first two characters must be ranks. For non-pairs a third `S` selects
/// suited; anything else (or nothing) is offsuit. A trailing suffix on a pair
/// is dropped. Reversed ranks are put back in high-low order.
pub fn normalize(raw: &str) -> Result<Hand, HandError> {
    let token = raw.trim().to_uppercase();
    let chars: Vec<char> = token.chars().collect();
    if chars.len() != 2 && chars.len() != 3 {
        return Err(HandError::InvalidLength(chars.len()));
    }
    let first = Rank::from_char(chars[0])?;
    let second = Rank::from_char(chars[1])?;
    let suited = chars.get(2) == Some(&'S');
    Ok(Hand::new(first, second, suited))
}

/// The hand shown at row `row`, column `col` of the 13x13 chart: pairs on the
/// diagonal, suited hands above it, offsuit hands below.
pub fn grid_hand(row: usize, col: usize) -> Hand {
    let (r1, r2) = (GRID_RANKS[row], GRID_RANKS[col]);
    Hand::new(r1, r2, row < col)
}

/// All 169 hand classes in chart order.
pub fn all_hands() -> Vec<Hand> {
    (0..GRID_RANKS.len())
        .flat_map(|row| (0..GRID_RANKS.len()).map(move |col| grid_hand(row, col)))
        .collect()
}
