//! Expense table view
//!
//! Most recent first, with friendly date labels

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::display::truncate;
use crate::tui::app::App;

/// Render the expense table
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!(" Expenses ({}) ", app.rows().len());
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.rows().is_empty() {
        let text = Paragraph::new("No expenses yet. Press 'a' to add one.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let widths = [
        Constraint::Length(12), // ID
        Constraint::Length(28), // Date
        Constraint::Min(16),    // Description
        Constraint::Length(14), // Amount
    ];

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let header = Row::new(vec![
        Cell::from("ID").style(bold),
        Cell::from("Date").style(bold),
        Cell::from("Description").style(bold),
        Cell::from(Line::from("Amount").right_aligned()).style(bold),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let symbol = app.currency_symbol();
    let rows: Vec<Row> = app
        .rows()
        .iter()
        .map(|expense| {
            let date_style = if expense.date() == app.today() {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(expense.id().to_string()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(app.date_label(expense.date())).style(date_style),
                Cell::from(truncate(expense.description(), 48)),
                Cell::from(
                    Line::from(expense.amount().format_with_symbol(symbol)).right_aligned(),
                ),
            ])
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(table, area, &mut state);
}
