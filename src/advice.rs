//! Preflop advice.
//!
//! [`advise`] is a pure function of a [`PlayerState`] and a [`RangeDatabase`]:
//! strength tier and equity come from fixed lookups, the action from the
//! position's ranges in priority order, and the insight text from the action
//! plus a stack-depth qualifier.

use std::fmt;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::cards::{all_hands, normalize, Hand};
use crate::config::{Insights, Position, RangeDatabase, StackDepthInsights};

/// Declaration order is priority order: a 3-bet outranks an open, which
/// outranks a call, which outranks a fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Call,
    Open,
    #[serde(rename = "3-bet")]
    ThreeBet,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Call => "Call",
            Action::Open => "Open",
            Action::ThreeBet => "3-bet",
        }
    }

    /// Visual category for whoever renders the advice.
    pub fn color_class(self) -> &'static str {
        match self {
            Action::Fold => "bg-custom-red",
            Action::Call => "bg-custom-yellow",
            Action::Open => "bg-custom-green",
            Action::ThreeBet => "bg-custom-blue",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Premium,
    Strong,
    Weak,
}

impl Strength {
    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Premium => "premium",
            Strength::Strong => "strong",
            Strength::Weak => "weak",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stack-depth bucket. 30 and 50 belong to `Shallow`, 70 to `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackBucket {
    /// Below 30bb.
    PushFold,
    /// 30 to 50bb.
    Shallow,
    /// 51 to 70bb.
    Standard,
    /// Above 70bb.
    Deep,
}

impl StackBucket {
    pub fn from_depth(stack_depth_bb: u32) -> StackBucket {
        match stack_depth_bb {
            0..=29 => StackBucket::PushFold,
            30..=50 => StackBucket::Shallow,
            51..=70 => StackBucket::Standard,
            _ => StackBucket::Deep,
        }
    }

    pub fn insight(self, texts: &StackDepthInsights) -> &str {
        match self {
            StackBucket::PushFold => &texts.less_than_30,
            StackBucket::Shallow => &texts.between_30_and_50,
            StackBucket::Standard => &texts.between_50_and_70,
            StackBucket::Deep => &texts.greater_than_70,
        }
    }
}

/// One advice request. Built per call, never stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// An unreadable token deserializes as no hand.
    #[serde(default, deserialize_with = "deserialize_hand")]
    pub hand: Option<Hand>,
    pub position: Position,
    pub stack_depth_bb: u32,
    pub is_facing_open: bool,
}

impl PlayerState {
    pub fn new(
        hand: Option<Hand>,
        position: Position,
        stack_depth_bb: u32,
        is_facing_open: bool,
    ) -> PlayerState {
        PlayerState {
            hand,
            position,
            stack_depth_bb,
            is_facing_open,
        }
    }

    /// Like [`PlayerState::new`] from a raw hand token. An unreadable token
    /// leaves the state without a hand.
    pub fn from_raw(
        raw_hand: &str,
        position: Position,
        stack_depth_bb: u32,
        is_facing_open: bool,
    ) -> PlayerState {
        PlayerState::new(read_hand(raw_hand), position, stack_depth_bb, is_facing_open)
    }
}

fn read_hand(raw: &str) -> Option<Hand> {
    match normalize(raw) {
        Ok(hand) => Some(hand),
        Err(e) => {
            debug!("No hand selected from '{}': {}", raw, e);
            None
        }
    }
}

fn deserialize_hand<'de, D>(deserializer: D) -> Result<Option<Hand>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(read_hand))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub hand: Hand,
    pub position: Position,
    pub action: Action,
    /// Estimated equity, 0 to 100.
    pub equity: u8,
    pub strength: Strength,
    pub insight: String,
    pub stack_bucket: StackBucket,
    pub stack_note: String,
    pub color_class: &'static str,
}

impl Advice {
    /// Insight followed by the stack-depth qualifier.
    pub fn full_insight(&self) -> String {
        if self.stack_note.is_empty() {
            self.insight.clone()
        } else {
            format!("{} {}", self.insight, self.stack_note)
        }
    }
}

pub fn classify_strength(db: &RangeDatabase, hand: &Hand) -> Strength {
    if db.premium().contains(hand) {
        Strength::Premium
    } else if db.strong().contains(hand) {
        Strength::Strong
    } else {
        Strength::Weak
    }
}

/// Canonical key first, then the rank-only key, then the table default.
pub fn equity_for(db: &RangeDatabase, hand: &Hand) -> u8 {
    db.equity(&hand.canonical())
        .or_else(|| db.equity(&hand.rank_key()))
        .unwrap_or_else(|| db.default_equity())
}

/// Picks the action for `hand` at `position`.
///
/// Facing an open every seat checks its 3-bet range; only the big blind may
/// fall back to its call range. Not facing an open, only the open range counts.
pub fn decide(db: &RangeDatabase, hand: &Hand, position: Position, is_facing_open: bool) -> Action {
    let ranges = db.ranges(position);
    if is_facing_open {
        if ranges.three_bet.contains(hand) {
            Action::ThreeBet
        } else if position.is_big_blind() && ranges.call.contains(hand) {
            Action::Call
        } else {
            Action::Fold
        }
    } else if ranges.open.contains(hand) {
        Action::Open
    } else {
        Action::Fold
    }
}

fn base_insight(insights: &Insights, action: Action, strength: Strength) -> &str {
    match action {
        Action::ThreeBet => &insights.premium_raise,
        Action::Open if strength == Strength::Premium => &insights.premium_raise,
        Action::Open => &insights.nut_advantage,
        Action::Call => &insights.defense_call,
        Action::Fold => &insights.out_of_range_fold,
    }
}

/// Advice for `state`, or `None` when no hand is selected.
pub fn advise(db: &RangeDatabase, state: &PlayerState) -> Option<Advice> {
    let hand = state.hand?;
    let strength = classify_strength(db, &hand);
    let equity = equity_for(db, &hand);
    let action = decide(db, &hand, state.position, state.is_facing_open);
    let stack_bucket = StackBucket::from_depth(state.stack_depth_bb);

    debug!(
        "{} {} {}bb vs_open={}: {} ({}, {}%)",
        hand, state.position, state.stack_depth_bb, state.is_facing_open, action, strength, equity
    );

    Some(Advice {
        hand,
        position: state.position,
        action,
        equity,
        strength,
        insight: base_insight(db.insights(), action, strength).to_string(),
        stack_bucket,
        stack_note: stack_bucket.insight(db.stack_insights()).to_string(),
        color_class: action.color_class(),
    })
}

/// Advice for all 169 hand classes at one seat, in chart order.
pub fn chart(
    db: &RangeDatabase,
    position: Position,
    stack_depth_bb: u32,
    is_facing_open: bool,
) -> Vec<Advice> {
    all_hands()
        .par_iter()
        .filter_map(|&hand| {
            let state = PlayerState::new(Some(hand), position, stack_depth_bb, is_facing_open);
            advise(db, &state)
        })
        .collect()
}
