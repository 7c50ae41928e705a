//! Navigation header: route tabs and the latest-block widget

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs as RataTabs};
use ratatui::Frame;

use crate::app::App;
use crate::core::{FetchState, Route};

/// Draw the tab bar; the active route is highlighted
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Route::ALL
        .iter()
        .map(|route| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", route.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(route.title()),
                Span::styled(
                    format!(" {}", route.path()),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let selected = Route::ALL
        .iter()
        .position(|r| *r == app.route)
        .unwrap_or(0);

    let title = Line::from(vec![
        Span::styled(
            " ethscope ",
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.endpoint.as_str(), Style::default().fg(Color::DarkGray)),
        Span::raw(" "),
    ]);

    let tabs = RataTabs::new(titles)
        .block(Block::default().borders(Borders::ALL).title(title))
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(" │ ");

    f.render_widget(tabs, area);
}

pub fn draw_latest_block(f: &mut Frame, area: Rect, app: &App) {
    let style = match app.latest_block.state() {
        FetchState::Loaded(_) => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
        FetchState::Errored(_) => Style::default().fg(Color::LightRed),
        _ => Style::default().fg(Color::DarkGray),
    };

    let paragraph = Paragraph::new(Line::from(Span::styled(app.latest_block.label(), style)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Latest Ethereum Block"),
        )
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
