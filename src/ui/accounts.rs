//! Account screen

use chrono::{DateTime, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::core::units::format_ether;
use crate::core::{FetchState, Route};
use crate::modules::accounts::{TransferRow, INVALID_ADDRESS_MESSAGE};

use super::{draw_input, LABEL};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
        ])
        .split(area);

    let editing = app.input_mode == InputMode::Editing && app.route == Route::Accounts;
    let title = if app.accounts.is_loading() {
        "Fetching..."
    } else {
        "Ethereum Account Details"
    };
    draw_input(f, chunks[0], title, app.accounts.address(), editing);
    draw_balance(f, chunks[1], app);
    draw_transfers(f, chunks[2], app);
}

fn draw_balance(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.accounts.balance() {
        FetchState::Idle => Line::from(Span::styled("No account selected", LABEL)),
        FetchState::Loading => Line::from(Span::styled("Fetching...", LABEL)),
        FetchState::Loaded(wei) => Line::from(vec![
            Span::styled("Balance: ", LABEL),
            Span::styled(
                format!("{} ETH", format_ether(*wei)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        FetchState::Errored(_) => Line::from(Span::styled(
            INVALID_ADDRESS_MESSAGE,
            Style::default().fg(Color::LightRed),
        )),
    };
    let title = match app.accounts.queried() {
        Some(address) => format!("Balance  {address}"),
        None => "Balance".to_string(),
    };
    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn draw_transfers(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Recent Transactions  (o copy link)");

    let notice = match app.accounts.transfers() {
        FetchState::Errored(reason) => Some(Span::styled(
            format!("Error fetching transfers: {reason}"),
            Style::default().fg(Color::LightRed),
        )),
        FetchState::Loaded(transfers) if transfers.is_empty() => {
            Some(Span::styled("No incoming transfers found.", LABEL))
        }
        _ => None,
    };
    if let Some(notice) = notice {
        let paragraph = Paragraph::new(Line::from(notice))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let rows = app.accounts.rows();
    if rows.is_empty() {
        f.render_widget(block, area);
        return;
    }

    let timestamps: Vec<Option<String>> = app
        .accounts
        .transfers()
        .loaded()
        .map(|transfers| {
            transfers
                .iter()
                .map(|t| t.block_timestamp.as_deref().and_then(format_timestamp))
                .collect()
        })
        .unwrap_or_default();

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| transfer_item(row, timestamps.get(idx).cloned().flatten()))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan))
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    state.select(Some(app.accounts.cursor()));
    f.render_stateful_widget(list, area, &mut state);
}

fn transfer_item(row: &TransferRow, timestamp: Option<String>) -> ListItem<'static> {
    let mut header = vec![
        Span::styled("Tx Hash: ", LABEL),
        Span::styled(row.hash.clone(), Style::default().fg(Color::LightBlue)),
    ];
    if let Some(timestamp) = timestamp {
        header.push(Span::styled(format!("  {timestamp}"), LABEL));
    }
    ListItem::new(vec![
        Line::from(header),
        Line::from(vec![Span::styled("From: ", LABEL), Span::raw(row.from.clone())]),
        Line::from(vec![Span::styled("To: ", LABEL), Span::raw(row.to.clone())]),
        Line::from(vec![Span::styled("Value: ", LABEL), Span::raw(row.value.clone())]),
        Line::from(Span::styled(row.link.clone(), Style::default().fg(Color::DarkGray))),
    ])
}

/// `2024-03-01T12:00:00.000Z` -> `2024-03-01 12:00 UTC`
fn format_timestamp(raw: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::infrastructure::{RuntimeCommand, RuntimeEvent};
    use crate::ui::render_to_string;

    /// Type `address` on the account screen and return the issued request id
    fn look_up(app: &mut App, address: &str) -> crate::core::RequestId {
        app.navigate(Route::Accounts);
        app.handle_key(KeyEvent::new(KeyCode::Char('i'), KeyModifiers::NONE));
        for c in address.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        match app.take_commands().pop() {
            Some(RuntimeCommand::LoadAccount { id, .. }) => id,
            other => panic!("expected an account lookup, got {other:?}"),
        }
    }

    #[test]
    fn test_failed_balance_renders_invalid_address() {
        let mut app = App::default();
        let id = look_up(&mut app, "nope");
        app.apply_event(RuntimeEvent::Balance {
            id,
            address: "nope".into(),
            result: Err("invalid address".into()),
        });

        let screen = render_to_string(&app);
        assert!(screen.contains(INVALID_ADDRESS_MESSAGE));
        assert!(!screen.contains("Fetching..."));
    }

    #[test]
    fn test_failed_transfers_keep_balance_and_show_error() {
        let mut app = App::default();
        let id = look_up(&mut app, "0xabc");
        app.apply_event(RuntimeEvent::Balance {
            id,
            address: "0xabc".into(),
            result: Ok(U256::from(1_500_000_000_000_000_000u64)),
        });
        app.apply_event(RuntimeEvent::Transfers {
            id,
            address: "0xabc".into(),
            result: Err("rate limited".into()),
        });

        let screen = render_to_string(&app);
        assert!(screen.contains("1.5 ETH"));
        assert!(screen.contains("Error fetching transfers: rate limited"));
    }

    #[test]
    fn test_no_transfers_message() {
        let mut app = App::default();
        let id = look_up(&mut app, "0xabc");
        app.apply_event(RuntimeEvent::Balance {
            id,
            address: "0xabc".into(),
            result: Ok(U256::ZERO),
        });
        app.apply_event(RuntimeEvent::Transfers {
            id,
            address: "0xabc".into(),
            result: Ok(Vec::new()),
        });

        let screen = render_to_string(&app);
        assert!(screen.contains("Balance: 0 ETH"));
        assert!(screen.contains("No incoming transfers found."));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-03-01T12:00:00.000Z").as_deref(),
            Some("2024-03-01 12:00 UTC")
        );
        assert_eq!(format_timestamp("yesterday"), None);
    }
}
