use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CellKind, DrawList, Overlay};

const FOOD_COLOR: Color = Color::Rgb(223, 163, 49);
const DARK_CELL: Color = Color::Rgb(30, 30, 30);

/// Draws a [`DrawList`] into a terminal frame
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, draw: &DrawList) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(draw);
        frame.render_widget(stats, chunks[0]);

        // Two terminal columns per cell keep cells roughly square
        let board_area = centered_rect(
            (draw.grid_width.max(0) as u16) * 2 + 2,
            draw.grid_height.max(0) as u16 + 2,
            chunks[1],
        );
        frame.render_widget(self.render_grid(draw), board_area);

        if let Some(overlay) = draw.overlay {
            let lines = self.overlay_lines(overlay, draw);
            let height = lines.len() as u16 + 2;
            let width = lines.iter().map(Line::width).max().unwrap_or(0) as u16 + 4;
            let area = centered_rect(width, height, board_area);

            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(overlay_border(overlay)),
                ),
                area,
            );
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, draw: &DrawList) -> Paragraph<'static> {
        let lines: Vec<Line> = draw
            .flatten()
            .into_iter()
            .map(|row| Line::from(row.into_iter().map(cell_span).collect::<Vec<_>>()))
            .collect();

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, draw: &DrawList) -> Paragraph<'static> {
        let hud = draw.hud;
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(hud.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(hud.level.to_string(), value),
            Span::raw("    "),
            Span::styled("High score: ", label),
            Span::styled(hud.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn overlay_lines(&self, overlay: Overlay, draw: &DrawList) -> Vec<Line<'static>> {
        let key = |k: &'static str| {
            Span::styled(
                k,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        };
        let gray = |s: &'static str| Span::styled(s, Style::default().fg(Color::Gray));

        match overlay {
            Overlay::Start => vec![
                Line::from(Span::styled(
                    "SNAKE GAME",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(vec![gray("Press "), key("SPACE"), gray(" to start")]),
            ],
            Overlay::Paused => vec![
                Line::from(Span::styled(
                    "PAUSED",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![gray("Press "), key("P"), gray(" to resume")]),
            ],
            Overlay::GameOver {
                score,
                new_high_score,
            } => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        "GAME OVER",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                        Span::styled(score.to_string(), Style::default().fg(Color::White)),
                    ]),
                ];
                if new_high_score {
                    lines.push(Line::from(Span::styled(
                        "New high score!",
                        Style::default().fg(Color::Magenta),
                    )));
                } else {
                    lines.push(Line::from(Span::styled(
                        format!("High score: {}", draw.hud.high_score),
                        Style::default().fg(Color::Gray),
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from(vec![
                    gray("Press "),
                    key("R"),
                    gray(" to play again or "),
                    Span::styled(
                        "Q",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    gray(" to quit"),
                ]));
                lines
            }
        }
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
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

fn cell_span(kind: CellKind) -> Span<'static> {
    match kind {
        CellKind::Background { dark } => {
            let style = if dark {
                Style::default().bg(DARK_CELL)
            } else {
                Style::default()
            };
            Span::styled("  ", style)
        }
        CellKind::SnakeHead => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        CellKind::SnakeBody => Span::styled("□ ", Style::default().fg(Color::Green)),
        CellKind::Food => Span::styled(
            "● ",
            Style::default().fg(FOOD_COLOR).add_modifier(Modifier::BOLD),
        ),
        CellKind::BigFood => Span::styled(
            "◆ ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    }
}

fn overlay_border(overlay: Overlay) -> Style {
    match overlay {
        Overlay::GameOver { .. } => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
