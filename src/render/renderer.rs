use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Sparkline},
};

use crate::game::{GameState, Position};
use crate::metrics::TrainingStats;
use crate::render::Speed;

/// Draws the board, the training header and the score plot
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        stats: &TrainingStats,
        scores: &[u32],
        speed: Speed,
        status: &str,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(8), // Score plot
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, stats), chunks[0]);
        frame.render_widget(self.render_grid(state), chunks[1]);

        let plot_data = Self::plot_window(scores, chunks[2]);
        let plot = Sparkline::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Scores (mean {:.2}) ", stats.mean_score())),
            )
            .data(&plot_data)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(plot, chunks[2]);

        frame.render_widget(self.render_footer(speed, status), chunks[3]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let cell = state.block_size;
        let head = state.head();
        let mut lines = Vec::new();

        for row in 0..state.height / cell {
            let mut spans = Vec::new();

            for col in 0..state.width / cell {
                let pos = Position::new(col * cell, row * cell);

                let span = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let border_color = if state.is_alive {
            Color::White
        } else {
            Color::Red
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, stats: &TrainingStats) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Game: ", label),
            Span::styled((stats.total_episodes() + 1).to_string(), value),
            Span::raw("    "),
            Span::styled("Score: ", label),
            Span::styled(
                state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Record: ", label),
            Span::styled(stats.record().to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_footer<'a>(&self, speed: Speed, status: &'a str) -> Paragraph<'a> {
        let text = vec![
            Line::from(Span::styled(status, Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled("1-4", Style::default().fg(Color::Cyan)),
                Span::raw(format!(" speed ({}) | ", speed.as_str())),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    /// Most recent scores that fit inside the plot's borders
    fn plot_window(scores: &[u32], area: Rect) -> Vec<u64> {
        let visible = area.width.saturating_sub(2) as usize;
        let start = scores.len().saturating_sub(visible);
        scores[start..].iter().map(|&s| s as u64).collect()
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_plot_window_keeps_latest() {
        let scores: Vec<u32> = (0..10).collect();
        let area = Rect::new(0, 0, 6, 8);

        assert_eq!(Renderer::plot_window(&scores, area), vec![6, 7, 8, 9]);
        assert!(Renderer::plot_window(&[], area).is_empty());
    }

    #[test]
    fn test_render_draws_snake_and_food() {
        let state = GameEngine::with_seed(GameConfig::small(), 3).reset();
        let stats = TrainingStats::default();
        let renderer = Renderer::new();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                renderer.render(frame, &state, &stats, &[1, 2], Speed::Normal, "Games: 0")
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(content.contains('■'));
        assert!(content.contains('O'));
        assert!(content.contains("Record"));
        assert!(content.contains("Games: 0"));
    }
}
