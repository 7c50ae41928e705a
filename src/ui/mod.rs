use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod accounts;
pub mod explorer;
pub mod layout;
pub mod nft;
pub mod tabs;

use crate::app::{App, InputMode, StatusLevel};
use crate::core::Route;
use crate::modules::input::TextInput;

pub(crate) const LABEL: Style = Style::new().fg(Color::DarkGray);

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    tabs::draw_tab_bar(f, areas.tabs, app);
    tabs::draw_latest_block(f, areas.widget, app);

    match app.route {
        Route::Home => explorer::draw(f, areas.main, app),
        Route::Accounts => accounts::draw(f, areas.main, app),
        Route::Nft => nft::draw(f, areas.main, app),
    }

    draw_status_line(f, areas.status_line, app);
    draw_hint_line(f, areas.hint_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
}

/// Inert controls render dimmed
pub(crate) fn dimmed_if(inert: bool, style: Style) -> Style {
    if inert {
        Style::default().fg(Color::DarkGray)
    } else {
        style
    }
}

pub(crate) fn draw_input(f: &mut Frame, area: Rect, title: &str, input: &TextInput, editing: bool) {
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let mut spans = if input.is_empty() && !editing {
        vec![Span::styled(input.placeholder(), LABEL)]
    } else {
        vec![Span::raw(input.value().to_string())]
    };
    if editing {
        spans.push(Span::styled(
            "_",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border_style),
    );
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.status_text() {
        Some((text, level)) => {
            let color = match level {
                StatusLevel::Info => Color::LightGreen,
                StatusLevel::Warn => Color::LightYellow,
                StatusLevel::Error => Color::LightRed,
            };
            Line::from(vec![
                Span::styled("msg: ", LABEL),
                Span::styled(text.to_string(), Style::default().fg(color)),
            ])
        }
        None => Line::from(vec![
            Span::styled("Route ", LABEL),
            Span::raw(app.route.path()),
        ]),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_hint_line(f: &mut Frame, area: Rect, app: &App) {
    let hints = match (app.input_mode, app.route) {
        (InputMode::Editing, Route::Nft) => "Enter submit  Tab switch field  Esc cancel",
        (InputMode::Editing, _) => "Enter submit  Esc cancel  Ctrl-u clear",
        (InputMode::Normal, Route::Home) => {
            "i edit  j/k move  Enter details  n/p page  s page size  y/o copy  r reload  ? help  q quit"
        }
        (InputMode::Normal, Route::Accounts) => "i edit  j/k move  o copy link  r reload  ? help  q quit",
        (InputMode::Normal, Route::Nft) => "i edit  Enter fetch  ? help  q quit",
    };
    f.render_widget(Paragraph::new(Span::styled(hints, LABEL)), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = layout::centered_rect(64, 64, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Navigation"),
        Line::from("  1 / 2 / 3     Home / Accounts / NFT"),
        Line::from("  Tab / S-Tab   Next / previous route"),
        Line::from("  i or /        Edit the screen's input"),
        Line::from("  Enter         Submit (while editing)"),
        Line::from("  Esc           Cancel editing / close popup"),
        Line::from(""),
        Line::from("Home"),
        Line::from("  j / k         Move selection"),
        Line::from("  n / p         Next / previous page"),
        Line::from("  s             Cycle page size (5, 10, 20, 50)"),
        Line::from("  Enter         Transaction details"),
        Line::from("  y / o         Copy hash / explorer link"),
        Line::from("  r             Reload latest block"),
        Line::from(""),
        Line::from("Accounts"),
        Line::from("  j / k         Move selection"),
        Line::from("  o             Copy explorer link"),
        Line::from(""),
        Line::from("  ?             Toggle help"),
        Line::from("  q             Quit"),
        Line::from(""),
        Line::from(format!("Active route: {}", app.route.path())),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

/// Render `app` on a 120x40 test terminal and return the screen as text
#[cfg(test)]
pub(crate) fn render_to_string(app: &App) -> String {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    let backend = TestBackend::new(120, 40);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    buffer
        .content()
        .chunks(buffer.area.width as usize)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::RequestId;
    use crate::infrastructure::RuntimeCommand;
    use crate::infrastructure::RuntimeEvent;

    fn render(app: &App) -> String {
        render_to_string(app)
    }

    fn explorer_id(app: &mut App) -> RequestId {
        app.mount();
        app.take_commands()
            .into_iter()
            .find_map(|cmd| match cmd {
                RuntimeCommand::LoadLatestBlock { id } => Some(id),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_empty_block_renders_no_transactions() {
        let mut app = App::default();
        let id = explorer_id(&mut app);
        app.apply_event(RuntimeEvent::LatestBlockNumber {
            id,
            result: Ok(19_000_000),
        });
        app.apply_event(RuntimeEvent::BlockTransactions {
            id,
            number: 19_000_000,
            result: Ok(Vec::new()),
        });

        let screen = render(&app);
        assert!(screen.contains("#19000000"));
        assert!(screen.contains("No transactions found."));
        assert!(screen.contains("Page 1 of 0"));
    }

    #[test]
    fn test_loading_labels() {
        let mut app = App::default();
        app.mount();
        let screen = render(&app);
        assert!(screen.contains("Loading transactions..."));
        assert!(screen.contains("Loading..."));
    }

    #[test]
    fn test_help_popup() {
        let mut app = App::default();
        app.help_open = true;
        assert!(render(&app).contains("Cycle page size"));
    }
}
