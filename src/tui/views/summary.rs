//! Summary panel
//!
//! Session statistics and the most recent changes

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::display::truncate;
use crate::models::Money;
use crate::tui::app::App;
use crate::tui::layout::SummaryLayout;

/// Number of audit entries shown
const ACTIVITY_ROWS: usize = 8;

/// Render the summary panel
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let layout = SummaryLayout::new(area);
    render_statistics(frame, app, layout.statistics);
    render_activity(frame, app, layout.activity);
}

fn render_statistics(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.statistics();
    let symbol = app.currency_symbol();
    let money = |m: Money| m.format_with_symbol(symbol);

    let lines = vec![
        stat_line("Count", stats.count.to_string()),
        stat_line("Total", money(stats.total)),
        stat_line("Average", money(stats.average)),
        stat_line("Largest", money(stats.max)),
        stat_line("Smallest", money(stats.min)),
        Line::from(""),
        stat_line("Today", format!("{} ({})", money(stats.today_total), stats.today_count)),
    ];

    let block = Block::default()
        .title(" Statistics ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn stat_line(name: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", name), Style::default().fg(Color::White)),
        Span::styled(value, Style::default().fg(Color::Yellow)),
    ])
}

fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width.saturating_sub(13) as usize;
    let items: Vec<ListItem> = app
        .history
        .recent(ACTIVITY_ROWS)
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(truncate(&entry.summary(), width)),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(" Recent activity ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(List::new(items).block(block), area);
}
