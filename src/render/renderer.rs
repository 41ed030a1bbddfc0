use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::BoardView;
use crate::game::GameSession;
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session, metrics), chunks[0]);

        let board_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::White))
            .title(" 2048 ");
        let board_area = board_block.inner(chunks[1]);
        frame.render_widget(board_block, chunks[1]);
        frame.render_widget(BoardView::new(session.board()), board_area);

        if session.is_lost() {
            let popup = centered(board_area, 36, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(session), popup);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_stats(&self, session: &GameSession, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(session.score().to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.max(session.score()).to_string(), value),
            Span::raw("    "),
            Span::styled("Moves: ", label),
            Span::styled(session.moves().to_string(), value),
            Span::raw("    "),
            Span::styled("Top tile: ", label),
            Span::styled(session.board().max_value().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.score().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("hjkl", Style::default().fg(Color::Cyan)),
            Span::raw(" to slide | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" new game | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
