use std::borrow::Cow;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use itertools::Itertools;

use crate::advice::{advise, chart, Action, PlayerState};
use crate::cards::{normalize, Hand};
use crate::config::{Position, RangeContext, RangeDatabase};
use crate::display::{action_grid, advice_card, print_error, range_grid, styled_action};
use crate::error::{PulseError, PulseResult};
use crate::ranges::{combo_count, range_pct, total_combos, CompiledRange};

#[derive(Parser)]
#[command(name = "pulse", version = "1.0.0", about = "Preflop advisor: open, 3-bet, call or fold from static range tables.")]
struct Cli {
    /// Custom range table (JSON) instead of the built-in 6-max table
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preflop advice for a hand at a position
    Advise {
        /// Your hand (e.g., AKs, QQ, T9o)
        hand: String,
        /// Your position (UTG, HJ, CO, BTN, SB, BB)
        position: Position,
        /// Effective stack size in bb
        #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
        stack: u32,
        /// Facing an open raise
        #[arg(long)]
        vs_open: bool,
        /// Print the advice as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the canonical form of a hand
    Normalize {
        /// Hand token (e.g., ak, 2As, QQ)
        hand: String,
    },
    /// Check whether a hand belongs to a range
    Check {
        /// Your hand (e.g., AJs)
        hand: String,
        /// Comma-separated range (e.g., "QQ+, AK, A5s-A2s")
        range: String,
    },
    /// Show a position's configured range
    Range {
        /// Position (UTG, HJ, CO, BTN, SB, BB)
        position: Position,
        /// Which range: open, 3bet or call
        #[arg(short, long, default_value = "open")]
        context: RangeContext,
    },
    /// Show the advised action for every hand at a position
    Chart {
        /// Position (UTG, HJ, CO, BTN, SB, BB)
        position: Position,
        /// Effective stack size in bb
        #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
        stack: u32,
        /// Facing an open raise
        #[arg(long)]
        vs_open: bool,
    },
}

pub fn run() {
    let cli = Cli::parse();
    match dispatch(cli) {
        Ok(out) => print!("{}", out),
        Err(e) => print_error(&e.to_string()),
    }
}

pub fn run_with_args(args: Vec<String>) {
    match render_with_args(args) {
        Ok(out) => print!("{}", out),
        Err(e) => print_error(&e.to_string()),
    }
}

/// Runs a command line and returns what it would print.
pub fn render_with_args(args: Vec<String>) -> PulseResult<String> {
    let cli = Cli::try_parse_from(args).map_err(|e| PulseError::InvalidValue(e.to_string()))?;
    dispatch(cli)
}

fn dispatch(cli: Cli) -> PulseResult<String> {
    let db = load_database(cli.config.as_deref())?;

    match cli.command {
        Commands::Advise {
            hand,
            position,
            stack,
            vs_open,
            json,
        } => cmd_advise(&db, &hand, position, stack, vs_open, json),
        Commands::Normalize { hand } => cmd_normalize(&hand),
        Commands::Check { hand, range } => cmd_check(&hand, &range),
        Commands::Range { position, context } => cmd_range(&db, position, context),
        Commands::Chart {
            position,
            stack,
            vs_open,
        } => Ok(cmd_chart(&db, position, stack, vs_open)),
    }
}

fn load_database(path: Option<&Path>) -> PulseResult<Cow<'static, RangeDatabase>> {
    match path {
        None => Ok(Cow::Borrowed(RangeDatabase::builtin())),
        Some(path) => RangeDatabase::load(path).map(Cow::Owned).map_err(|e| {
            PulseError::InvalidValue(format!("Cannot load range table {}: {}", path.display(), e))
        }),
    }
}

fn parse_hand(hand: &str) -> PulseResult<Hand> {
    normalize(hand).map_err(|e| {
        PulseError::InvalidValue(format!(
            "Invalid hand '{}': {}. Use format like AKs, QQ, T9o",
            hand, e
        ))
    })
}

fn cmd_advise(
    db: &RangeDatabase,
    hand: &str,
    position: Position,
    stack: u32,
    vs_open: bool,
    json: bool,
) -> PulseResult<String> {
    let parsed = parse_hand(hand)?;
    let state = PlayerState::new(Some(parsed), position, stack, vs_open);
    let advice = match advise(db, &state) {
        Some(a) => a,
        None => return Ok(String::new()),
    };

    if json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(&advice)?));
    }

    let spot = if vs_open { "vs open" } else { "first in" };
    let mut out = String::new();
    writeln!(out).ok();
    writeln!(
        out,
        "  {} {} in {} | {}bb | {}",
        "GTO".bold(),
        advice.hand.to_string().bold(),
        position.as_str().bold(),
        stack,
        spot,
    )
    .ok();
    writeln!(out).ok();
    writeln!(out, "{}", advice_card(&advice)).ok();

    let context = match advice.action {
        Action::Open => Some(RangeContext::Open),
        Action::ThreeBet => Some(RangeContext::ThreeBet),
        Action::Call => Some(RangeContext::Call),
        Action::Fold => None,
    };
    if let Some(context) = context {
        if let Some(expr) = db.range(position, context).matching_expr(&advice.hand) {
            writeln!(out, "  {} {} ({} range)", "Matched:".dimmed(), expr, context).ok();
        }
    }
    writeln!(out).ok();
    Ok(out)
}

fn cmd_normalize(hand: &str) -> PulseResult<String> {
    let h = parse_hand(hand)?;
    let mut out = String::new();
    writeln!(out).ok();
    writeln!(out, "  {} {}", "Canonical:".bold(), h.to_string().green().bold()).ok();
    writeln!(out, "  {} {} / {}", "Ranks:".bold(), h.high(), h.low()).ok();
    writeln!(out, "  {} {}", "Type:".bold(), h.hand_type().as_str()).ok();
    writeln!(out, "  {} {}", "Combos:".bold(), combo_count(&h)).ok();
    writeln!(out).ok();
    Ok(out)
}

fn cmd_check(hand: &str, range: &str) -> PulseResult<String> {
    let parsed = parse_hand(hand)?;
    let compiled = CompiledRange::parse(range);
    Ok(match compiled.matching_expr(&parsed) {
        Some(expr) => format!(
            "  {} {} is in range (matched {})\n",
            "YES".green().bold(),
            parsed,
            expr.bold()
        ),
        None => format!("  {} {} is not in range\n", "NO".red().bold(), parsed),
    })
}

fn cmd_range(db: &RangeDatabase, position: Position, context: RangeContext) -> PulseResult<String> {
    let range = db.range(position, context);
    if range.is_empty() {
        return Err(PulseError::InvalidValue(format!(
            "No {} range configured for {}",
            context, position
        )));
    }

    let hands = range.hands();
    let title = format!("{} {} range ({})", position, context, db.name());
    let mut out = String::new();
    writeln!(out).ok();
    writeln!(out, "{}", range_grid(&hands, &title)).ok();
    writeln!(
        out,
        "  {} {} hands, {} combos ({:.1}%)",
        "Total:".bold(),
        hands.len(),
        total_combos(&hands),
        range_pct(&hands),
    )
    .ok();
    writeln!(out, "  {} {}", "Entries:".bold(), range.exprs().iter().join(", ")).ok();
    writeln!(out).ok();
    Ok(out)
}

fn cmd_chart(db: &RangeDatabase, position: Position, stack: u32, vs_open: bool) -> String {
    let advice = chart(db, position, stack, vs_open);
    let spot = if vs_open { "vs open" } else { "first in" };
    let title = format!("{} {} | {}bb", position, spot, stack);

    let counts = advice.iter().map(|a| a.action).counts();
    let summary = [Action::ThreeBet, Action::Open, Action::Call, Action::Fold]
        .iter()
        .filter_map(|action| {
            counts
                .get(action)
                .map(|n| format!("{} {}", styled_action(*action), n))
        })
        .join(" | ");

    format!("\n{}\n  {}\n\n", action_grid(&advice, &title), summary)
}
