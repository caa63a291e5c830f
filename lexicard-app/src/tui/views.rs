use crate::tui::theme;
use lexicard_core::{Card, Deck, SessionScore, Tier, TierSizes};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub enum RightPane<'a> {
    Idle,
    Card { card: &'a Card, reveal: bool, flagged: bool },
    Empty(&'a str),
}

pub struct Progress<'a> {
    pub sizes: TierSizes,
    pub score: &'a SessionScore,
}

pub fn draw_ui(f: &mut Frame, area: Rect, decks: &[Deck], sel: usize, right: RightPane, progress: Option<Progress>) {
    let body = Rect { height: area.height.saturating_sub(1), ..area };
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(body);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(7)])
        .split(cols[0]);
    draw_decks(f, left[0], decks, sel);
    draw_progress(f, left[1], progress);
    draw_right(f, cols[1], right);

    let foot = Paragraph::new(Line::from(vec![
        Span::raw(" ↑/k ↓/j select  "),
        Span::raw(" Enter start  "),
        Span::raw(" space reveal  "),
        Span::raw(" y/1 correct  n/2 wrong  "),
        Span::raw(" s skip  f flag  "),
        Span::raw(" Esc back  q quit "),
    ]))
    .style(theme::status_bar());
    let fh = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };
    f.render_widget(foot, fh);
}

fn draw_decks(f: &mut Frame, area: Rect, decks: &[Deck], sel: usize) {
    let items: Vec<_> = decks
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let label = format!("{} ({})", d.name, d.cards.len());
            let s = if i == sel {
                Line::from(label).style(theme::highlighted())
            } else {
                Line::from(label)
            };
            ListItem::new(s)
        })
        .collect();

    let list = List::new(items).block(Block::default().title(Span::styled("Decks", theme::heading())).borders(Borders::ALL));
    f.render_widget(list, area);
}

fn draw_progress(f: &mut Frame, area: Rect, progress: Option<Progress>) {
    let lines = match progress {
        Some(p) => vec![
            tier_line("learn ", Tier::Learn, p.sizes.learn),
            tier_line("review", Tier::Review, p.sizes.review),
            tier_line("known ", Tier::Known, p.sizes.known),
            Line::from(vec![
                Span::raw("score  ").style(theme::heading()),
                Span::raw(format!("{} ({:.0}%)", p.score.tally, p.score.accuracy() * 100.0)),
            ]),
        ],
        None => vec![Line::from("no session").style(theme::muted())],
    };
    let p = Paragraph::new(lines).block(Block::default().title("Session").borders(Borders::ALL));
    f.render_widget(p, area);
}

fn tier_line(label: &str, t: Tier, n: usize) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label} ")),
        Span::styled(n.to_string(), theme::tier(t)),
    ])
}

fn draw_right(f: &mut Frame, area: Rect, pane: RightPane) {
    match pane {
        RightPane::Idle => {
            let p = Paragraph::new("Press Enter to start practicing the selected deck.")
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Practice").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Empty(msg) => {
            let p = Paragraph::new(msg)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Practice").borders(Borders::ALL));
            f.render_widget(p, area);
        }
        RightPane::Card { card, reveal, flagged } => {
            let mut text = vec![
                Line::from(Span::raw(card.target_word.as_str()).style(theme::heading())),
                Line::from(Span::raw(card.phonetic.as_str()).style(theme::muted())),
            ];
            if let Some(s) = &card.sound {
                text.push(Line::from(Span::raw(format!("audio: {s}")).style(theme::muted())));
            }
            text.push(Line::from(""));
            if reveal {
                text.push(Line::from(Span::raw(card.explain.as_str()).style(theme::revealed_answer())));
            } else {
                text.push(Line::from("What does this mean?"));
            }
            if flagged || card.check_for_correction {
                text.push(Line::from(""));
                text.push(Line::from(Span::raw("flagged for correction").style(theme::correction_flag())));
            }
            let p = Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().title("Practice").borders(Borders::ALL));
            f.render_widget(p, area);
        }
    }
}
