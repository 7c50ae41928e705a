//! NFT lookup screen

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::core::{FetchState, Route};
use crate::modules::nft::{NftField, NFT_ERROR_MESSAGE};

use super::{draw_input, LABEL};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
        ])
        .split(area);

    let nft = &app.nft;
    let editing = app.input_mode == InputMode::Editing && app.route == Route::Nft;
    draw_input(
        f,
        chunks[0],
        "Contract Address",
        nft.contract(),
        editing && nft.focus() == NftField::Contract,
    );
    draw_input(
        f,
        chunks[1],
        "Token ID",
        nft.token_id(),
        editing && nft.focus() == NftField::TokenId,
    );

    let hint = if nft.is_loading() {
        Span::styled("Fetching...", LABEL)
    } else {
        Span::styled(
            "Enter: Get NFT Data  Tab: switch field",
            Style::default().fg(Color::Cyan),
        )
    };
    f.render_widget(Paragraph::new(Line::from(hint)), chunks[2]);

    draw_result(f, chunks[3], app);
}

fn draw_result(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().borders(Borders::ALL).title("NFT Lookup");

    let text = match app.nft.metadata() {
        FetchState::Errored(_) => Text::from(Line::from(Span::styled(
            NFT_ERROR_MESSAGE,
            Style::default().fg(Color::LightRed),
        ))),
        FetchState::Loaded(_) => match app.nft.card() {
            Some(card) => {
                let image_style = if card.has_image {
                    Style::default().fg(Color::LightBlue)
                } else {
                    LABEL
                };
                Text::from(vec![
                    Line::from(Span::styled(
                        card.title,
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Image: ", LABEL),
                        Span::styled(card.image, image_style),
                    ]),
                    Line::from(""),
                    Line::from(card.description),
                ])
            }
            None => Text::default(),
        },
        FetchState::Idle | FetchState::Loading => Text::default(),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
