//! Block explorer screen

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::core::units::format_ether;
use crate::core::{FetchState, Route};
use crate::modules::explorer::tx_details;

use super::{dimmed_if, draw_input, layout::centered_rect, LABEL};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    draw_block_panel(f, chunks[0], app);
    let editing = app.input_mode == InputMode::Editing && app.route == Route::Home;
    draw_input(
        f,
        chunks[1],
        "Search Transactions by Block",
        app.explorer.search(),
        editing,
    );
    draw_transactions(f, chunks[2], app);
    draw_pagination(f, chunks[3], app);

    if let Some(tx) = app.explorer.selected() {
        let popup = centered_rect(80, 50, area);
        f.render_widget(Clear, popup);
        let lines: Vec<Line> = tx_details(tx)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:<10} "), LABEL),
                    Span::raw(value),
                ])
            })
            .chain([
                Line::from(""),
                Line::from(Span::styled(
                    "Esc close  y copy hash  o copy link",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .collect();
        let paragraph = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .title("Transaction Details")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, popup);
    }
}

fn draw_block_panel(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.explorer.block_number() {
        Some(number) => Line::from(Span::styled(
            format!("#{number}"),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled("Loading...", LABEL)),
    };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Latest Ethereum Block"),
    );
    f.render_widget(paragraph, area);
}

fn draw_transactions(f: &mut Frame, area: Rect, app: &App) {
    let explorer = &app.explorer;
    let title = format!(
        "Transactions  (per page: {}, s to change)",
        explorer.pagination().page_size()
    );
    let block = Block::default().borders(Borders::ALL).title(title);

    let message = match explorer.transactions() {
        FetchState::Idle | FetchState::Loading => Some("Loading transactions..."),
        _ if explorer.records().is_empty() => Some("No transactions found."),
        _ => None,
    };
    if let Some(message) = message {
        let paragraph = Paragraph::new(Span::styled(message, LABEL)).block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = explorer
        .visible()
        .iter()
        .map(|tx| {
            let to = tx.to.as_deref().unwrap_or("Contract Creation");
            ListItem::new(vec![
                Line::from(vec![Span::styled("Tx Hash ", LABEL), Span::raw(tx.hash.clone())]),
                Line::from(vec![
                    Span::styled("From ", LABEL),
                    Span::raw(tx.from.clone()),
                    Span::styled("  To ", LABEL),
                    Span::raw(to.to_string()),
                ]),
                Line::from(vec![
                    Span::styled("Value ", LABEL),
                    Span::raw(format!("{} ETH", format_ether(tx.value))),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    state.select(Some(explorer.cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_pagination(f: &mut Frame, area: Rect, app: &App) {
    let explorer = &app.explorer;
    let enabled = Style::default().fg(Color::Cyan);
    let line = Line::from(vec![
        Span::styled("< Previous", dimmed_if(!explorer.has_previous_page(), enabled)),
        Span::raw(format!(
            "   Page {} of {}   ",
            explorer.pagination().page(),
            explorer.total_pages()
        )),
        Span::styled("Next >", dimmed_if(!explorer.has_next_page(), enabled)),
    ]);
    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
