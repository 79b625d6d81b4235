//! Static range tables.
//!
//! A [`RangeDatabase`] holds the per-position open / 3-bet / call ranges, the
//! strength categories, the equity table and the insight texts. It is read
//! from JSON once, every range entry is compiled at that point, and nothing
//! mutates it afterwards. The default 6-max table ships inside the binary.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::cards::normalize;
use crate::error::{PulseError, PulseResult};
use crate::ranges::CompiledRange;

static ENGINE_V2_JSON: &str = include_str!("../data/gto_engine_v2.json");

static BUILTIN: Lazy<RangeDatabase> = Lazy::new(|| {
    RangeDatabase::from_json_str(ENGINE_V2_JSON).expect("Failed to parse built-in range table")
});

pub const DEFAULT_EQUITY: u8 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    UTG,
    HJ,
    CO,
    BTN,
    SB,
    BB,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::UTG,
        Position::HJ,
        Position::CO,
        Position::BTN,
        Position::SB,
        Position::BB,
    ];

    fn seat_index(self) -> usize {
        match self {
            Position::UTG => 0,
            Position::HJ => 1,
            Position::CO => 2,
            Position::BTN => 3,
            Position::SB => 4,
            Position::BB => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Position::UTG => "UTG",
            Position::HJ => "HJ",
            Position::CO => "CO",
            Position::BTN => "BTN",
            Position::SB => "SB",
            Position::BB => "BB",
        }
    }

    /// The seat that may flat-call an open instead of only 3-betting.
    pub fn is_big_blind(self) -> bool {
        self == Position::BB
    }
}

impl FromStr for Position {
    type Err = PulseError;

    fn from_str(s: &str) -> PulseResult<Position> {
        match s.trim().to_uppercase().as_str() {
            "UTG" => Ok(Position::UTG),
            "HJ" => Ok(Position::HJ),
            "CO" => Ok(Position::CO),
            "BTN" => Ok(Position::BTN),
            "SB" => Ok(Position::SB),
            "BB" => Ok(Position::BB),
            _ => Err(PulseError::InvalidPosition(format!(
                "'{}'. Valid: UTG, HJ, CO, BTN, SB, BB",
                s
            ))),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of a position's ranges applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeContext {
    Open,
    ThreeBet,
    Call,
}

impl RangeContext {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeContext::Open => "open",
            RangeContext::ThreeBet => "3bet",
            RangeContext::Call => "call",
        }
    }
}

impl FromStr for RangeContext {
    type Err = PulseError;

    fn from_str(s: &str) -> PulseResult<RangeContext> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(RangeContext::Open),
            "3bet" | "threebet" | "3bet_vs_open" => Ok(RangeContext::ThreeBet),
            "call" | "call_vs_open" => Ok(RangeContext::Call),
            _ => Err(PulseError::InvalidRangeContext(s.to_string())),
        }
    }
}

impl fmt::Display for RangeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Base insight text per decision.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Insights {
    pub premium_raise: String,
    pub nut_advantage: String,
    pub defense_call: String,
    pub out_of_range_fold: String,
}

impl Default for Insights {
    fn default() -> Self {
        Insights {
            premium_raise: "Raise: premium hand.".to_string(),
            nut_advantage: "Raise: nut advantage.".to_string(),
            defense_call: "Call: good defense frequency.".to_string(),
            out_of_range_fold: "Fold: out of range.".to_string(),
        }
    }
}

/// Qualifier appended to the insight for each stack-depth bucket.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StackDepthInsights {
    #[serde(rename = "lessThan30")]
    pub less_than_30: String,
    #[serde(rename = "between30and50")]
    pub between_30_and_50: String,
    #[serde(rename = "between50and70")]
    pub between_50_and_70: String,
    #[serde(rename = "greaterThan70")]
    pub greater_than_70: String,
}

impl Default for StackDepthInsights {
    fn default() -> Self {
        StackDepthInsights {
            less_than_30: "(<30bb) Push/fold wider, consider Nash ranges.".to_string(),
            between_30_and_50: "(30-50bb) Slightly tighter than 100bb.".to_string(),
            between_50_and_70: "(50-70bb) Standard play. Maximize value.".to_string(),
            greater_than_70: "(>70bb) Slightly looser, more suited connectors.".to_string(),
        }
    }
}

/// Each spelling is its own list; lists naming the same range are merged.
#[derive(Deserialize, Debug, Default)]
struct RawPositionRanges {
    #[serde(default)]
    open: Vec<String>,
    #[serde(rename = "3bet", default)]
    three_bet: Vec<String>,
    #[serde(rename = "3bet_vs_open", default)]
    three_bet_vs_open: Vec<String>,
    #[serde(rename = "threeBet", default)]
    three_bet_camel: Vec<String>,
    #[serde(default)]
    call: Vec<String>,
    #[serde(default)]
    call_vs_open: Vec<String>,
}

impl RawPositionRanges {
    fn three_bet(&self) -> Vec<&String> {
        self.three_bet
            .iter()
            .chain(&self.three_bet_vs_open)
            .chain(&self.three_bet_camel)
            .collect()
    }

    fn call(&self) -> Vec<&String> {
        self.call.iter().chain(&self.call_vs_open).collect()
    }
}

#[derive(Deserialize, Debug, Default)]
struct StrengthCategories {
    #[serde(default)]
    premium: Vec<String>,
    #[serde(default)]
    strong: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct RangeFile {
    #[serde(default)]
    name: String,
    #[serde(default)]
    game: String,
    #[serde(default)]
    stack: String,
    #[serde(default)]
    strength_categories: StrengthCategories,
    #[serde(default)]
    equity_map: HashMap<String, u32>,
    preflop_ranges: HashMap<Position, RawPositionRanges>,
    #[serde(default)]
    insights: Insights,
    #[serde(default)]
    stack_depth_insights: StackDepthInsights,
}

#[derive(Debug, Clone, Default)]
pub struct PositionRanges {
    pub open: CompiledRange,
    pub three_bet: CompiledRange,
    pub call: CompiledRange,
}

impl PositionRanges {
    fn compile(raw: &RawPositionRanges) -> PositionRanges {
        PositionRanges {
            open: CompiledRange::compile(&raw.open),
            three_bet: CompiledRange::compile(&raw.three_bet()),
            call: CompiledRange::compile(&raw.call()),
        }
    }

    pub fn get(&self, context: RangeContext) -> &CompiledRange {
        match context {
            RangeContext::Open => &self.open,
            RangeContext::ThreeBet => &self.three_bet,
            RangeContext::Call => &self.call,
        }
    }
}

/// The immutable advice tables, every range already compiled.
#[derive(Debug, Clone)]
pub struct RangeDatabase {
    name: String,
    game: String,
    stack: String,
    positions: [PositionRanges; 6],
    premium: CompiledRange,
    strong: CompiledRange,
    equity: HashMap<String, u8>,
    default_equity: u8,
    insights: Insights,
    stack_insights: StackDepthInsights,
}

impl RangeDatabase {
    /// The 6-max, 100bb table compiled into the binary.
    pub fn builtin() -> &'static RangeDatabase {
        &BUILTIN
    }

    pub fn from_json_str(json: &str) -> PulseResult<RangeDatabase> {
        let file: RangeFile = serde_json::from_str(json)?;
        RangeDatabase::from_file(file)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> PulseResult<RangeDatabase> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let db = RangeDatabase::from_json_str(&json)?;
        info!("Loaded range table '{}' from {}", db.name, path.display());
        Ok(db)
    }

    fn from_file(file: RangeFile) -> PulseResult<RangeDatabase> {
        let mut positions: [PositionRanges; 6] = Default::default();
        for (position, raw) in &file.preflop_ranges {
            positions[position.seat_index()] = PositionRanges::compile(raw);
        }

        let mut equity = HashMap::new();
        let mut default_equity = DEFAULT_EQUITY;
        for (key, &value) in &file.equity_map {
            let value = u8::try_from(value)
                .ok()
                .filter(|v| *v <= 100)
                .ok_or_else(|| {
                    PulseError::InvalidValue(format!(
                        "Equity for '{}' must be between 0 and 100, got {}",
                        key, value
                    ))
                })?;
            if key == "default" {
                default_equity = value;
                continue;
            }
            let Some(k) = equity_key(key) else {
                warn!("Ignoring unreadable equity key '{}'", key);
                continue;
            };
            match equity.insert(k.clone(), value) {
                Some(previous) if previous != value => {
                    return Err(PulseError::InvalidValue(format!(
                        "Equity for '{}' is given twice with different values ({} and {})",
                        k, previous, value
                    )));
                }
                _ => {}
            }
        }

        Ok(RangeDatabase {
            name: file.name,
            game: file.game,
            stack: file.stack,
            positions,
            premium: CompiledRange::compile(&file.strength_categories.premium),
            strong: CompiledRange::compile(&file.strength_categories.strong),
            equity,
            default_equity,
            insights: file.insights,
            stack_insights: file.stack_depth_insights,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn game(&self) -> &str {
        &self.game
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }

    pub fn ranges(&self, position: Position) -> &PositionRanges {
        &self.positions[position.seat_index()]
    }

    pub fn range(&self, position: Position, context: RangeContext) -> &CompiledRange {
        self.ranges(position).get(context)
    }

    pub fn premium(&self) -> &CompiledRange {
        &self.premium
    }

    pub fn strong(&self) -> &CompiledRange {
        &self.strong
    }

    /// Equity stored under a canonical hand (`"AKs"`) or rank-only (`"AK"`) key.
    pub fn equity(&self, key: &str) -> Option<u8> {
        self.equity.get(key).copied()
    }

    pub fn default_equity(&self) -> u8 {
        self.default_equity
    }

    pub fn insights(&self) -> &Insights {
        &self.insights
    }

    pub fn stack_insights(&self) -> &StackDepthInsights {
        &self.stack_insights
    }
}

/// Canonical lookup key for an equity entry: 3-character keys keep their
/// suffix, 2-character keys are rank-only.
fn equity_key(key: &str) -> Option<String> {
    let hand = normalize(key).ok()?;
    if key.trim().chars().count() == 2 {
        Some(hand.rank_key())
    } else {
        Some(hand.canonical())
    }
}
