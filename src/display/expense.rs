//! Plain-text expense tables
//!
//! Used by the line-oriented shell, where output goes straight to stdout.

use chrono::NaiveDate;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::Expense;
use crate::services::Statistics;

use super::date::date_label;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Statistic")]
    name: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

/// Format expenses (already in display order) as a table
pub fn format_expense_table<'a, I>(
    expenses: I,
    today: NaiveDate,
    symbol: &str,
    long_date_format: &str,
) -> String
where
    I: IntoIterator<Item = &'a Expense>,
{
    let rows: Vec<ExpenseRow> = expenses
        .into_iter()
        .map(|e| ExpenseRow {
            id: e.id().to_string(),
            date: date_label(e.date(), today, long_date_format),
            description: truncate(e.description(), 40),
            amount: e.amount().format_with_symbol(symbol),
        })
        .collect();

    if rows.is_empty() {
        return "No expenses yet.\n".to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::psql())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    format!("{}\n", table)
}

/// Format statistics as a two-column table
pub fn format_statistics(stats: &Statistics, symbol: &str) -> String {
    let rows = vec![
        StatRow {
            name: "Count",
            value: stats.count.to_string(),
        },
        StatRow {
            name: "Total",
            value: stats.total.format_with_symbol(symbol),
        },
        StatRow {
            name: "Average",
            value: stats.average.format_with_symbol(symbol),
        },
        StatRow {
            name: "Largest",
            value: stats.max.format_with_symbol(symbol),
        },
        StatRow {
            name: "Smallest",
            value: stats.min.format_with_symbol(symbol),
        },
        StatRow {
            name: "Today (count)",
            value: stats.today_count.to_string(),
        },
        StatRow {
            name: "Today (total)",
            value: stats.today_total.format_with_symbol(symbol),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::psql());

    format!("{}\n", table)
}

/// One-line summary of an expense, for confirmations
pub fn format_expense_short(expense: &Expense, symbol: &str) -> String {
    format!(
        "{} {} {} ({})",
        expense.id(),
        expense.amount().format_with_symbol(symbol),
        expense.description(),
        expense.date()
    )
}

/// Truncate a string to at most `max_chars` characters
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
