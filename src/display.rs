use std::collections::HashSet;

use colored::{ColoredString, Colorize};
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::advice::{Action, Advice, Strength};
use crate::cards::{grid_hand, Hand, GRID_RANKS};

fn grid_table() -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("")];
    for r in GRID_RANKS {
        header.push(Cell::new(r.to_char()).set_alignment(CellAlignment::Center));
    }
    table.set_header(header);
    table
}

fn render_grid<F>(title: &str, cell: F) -> String
where
    F: Fn(Hand) -> String,
{
    let mut table = grid_table();
    for (row, r1) in GRID_RANKS.iter().enumerate() {
        let mut cells = vec![Cell::new(r1.to_char().to_string().bold().to_string())];
        for col in 0..GRID_RANKS.len() {
            let hand = grid_hand(row, col);
            cells.push(Cell::new(cell(hand)).set_alignment(CellAlignment::Center));
        }
        table.add_row(cells);
    }
    format!("  {}\n{}", title.bold(), table)
}

pub fn range_grid(hands_in_range: &[Hand], title: &str) -> String {
    let in_range: HashSet<Hand> = hands_in_range.iter().copied().collect();
    render_grid(title, |hand| {
        let label = hand.canonical();
        if in_range.contains(&hand) {
            label.green().bold().to_string()
        } else {
            label.dimmed().to_string()
        }
    })
}

/// Chart of advised actions; `chart` must come from `advice::chart`.
pub fn action_grid(chart: &[Advice], title: &str) -> String {
    render_grid(title, |hand| {
        let label = hand.canonical();
        match chart.iter().find(|a| a.hand == hand) {
            Some(advice) => paint_action(advice.action, &label).to_string(),
            None => label.dimmed().to_string(),
        }
    })
}

pub fn equity_bar(equity: u8, width: usize) -> String {
    let equity = equity.min(100) as usize;
    let filled = equity * width / 100;
    let bar: String = "\u{2588}".repeat(filled) + &"\u{2591}".repeat(width - filled);
    let pct = format!("{}%", equity);

    if equity >= 60 {
        format!("{} {}", bar.green(), pct)
    } else if equity >= 45 {
        format!("{} {}", bar.yellow(), pct)
    } else {
        format!("{} {}", bar.red(), pct)
    }
}

/// Terminal colour for the four action categories.
fn paint_action(action: Action, text: &str) -> ColoredString {
    match action {
        Action::Fold => text.red(),
        Action::Call => text.yellow(),
        Action::Open => text.green().bold(),
        Action::ThreeBet => text.blue().bold(),
    }
}

pub fn styled_action(action: Action) -> String {
    paint_action(action, &action.as_str().to_uppercase())
        .bold()
        .to_string()
}

fn styled_strength(strength: Strength) -> String {
    match strength {
        Strength::Premium => strength.as_str().magenta().bold().to_string(),
        Strength::Strong => strength.as_str().cyan().to_string(),
        Strength::Weak => strength.as_str().dimmed().to_string(),
    }
}

pub fn advice_card(advice: &Advice) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Metric").set_alignment(CellAlignment::Left),
        Cell::new("Value").set_alignment(CellAlignment::Left),
    ]);
    table.add_row(vec![
        Cell::new("Action".bold().to_string()),
        Cell::new(styled_action(advice.action)),
    ]);
    table.add_row(vec![
        Cell::new("Strength".bold().to_string()),
        Cell::new(styled_strength(advice.strength)),
    ]);
    table.add_row(vec![
        Cell::new("Equity".bold().to_string()),
        Cell::new(equity_bar(advice.equity, 20)),
    ]);
    table.add_row(vec![
        Cell::new("Insight".bold().to_string()),
        Cell::new(&advice.insight),
    ]);
    table.add_row(vec![
        Cell::new("Stack".bold().to_string()),
        Cell::new(&advice.stack_note),
    ]);

    table.to_string()
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
