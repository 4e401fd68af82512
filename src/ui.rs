use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{pomodoro::Mode, App};

const CLOCK_GLYPH_ROWS: u16 = 5;
const VERTICAL_PADDING: u16 = 1;

/// Block-glyph rows for one clock character. Each glyph is 5 rows tall.
fn clock_glyph(c: char) -> [&'static str; 5] {
    match c {
        '0' => ["█████", "█   █", "█   █", "█   █", "█████"],
        '1' => ["   █ ", "  ██ ", "   █ ", "   █ ", "  ███"],
        '2' => ["█████", "    █", "█████", "█    ", "█████"],
        '3' => ["█████", "    █", " ████", "    █", "█████"],
        '4' => ["█  █ ", "█  █ ", "█████", "   █ ", "   █ "],
        '5' => ["█████", "█    ", "█████", "    █", "█████"],
        '6' => ["█████", "█    ", "█████", "█   █", "█████"],
        '7' => ["█████", "    █", "   █ ", "  █  ", "  █  "],
        '8' => ["█████", "█   █", "█████", "█   █", "█████"],
        '9' => ["█████", "█   █", "█████", "    █", "█████"],
        ':' => ["     ", "  █  ", "     ", "  █  ", "     "],
        _ => ["     ", "     ", "     ", "     ", "     "],
    }
}

/// Assembles the `MM:SS` string into rows of block glyphs.
fn clock_rows(clock: &str) -> Vec<String> {
    (0..5)
        .map(|row| {
            clock
                .chars()
                .map(|c| clock_glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn mode_selector_line(active: Mode) -> Line<'static> {
    let active_style = Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD);
    let inactive_style = Style::default().add_modifier(Modifier::DIM);

    let mut spans = vec![];
    for (i, mode) in Mode::all().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if mode == active {
            active_style
        } else {
            inactive_style
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
    }

    Line::from(spans)
}

fn hint_line(running: bool) -> Line<'static> {
    let hint_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC);

    let primary = if running { "pause" } else { "start" };
    Line::from(Span::styled(
        format!("(space) {} (r)eset (1/2/3, tab) mode (q)uit", primary),
        hint_style,
    ))
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let timer = &self.timer;
        let clock = timer.to_string();

        let clock_style = if timer.running {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::DIM)
        };

        // Fall back to a plain one-line clock when the glyph rows don't fit.
        let glyph_width = clock_rows(&clock)
            .first()
            .map(|row| row.width())
            .unwrap_or(0) as u16;
        let use_glyphs = area.width >= glyph_width
            && area.height >= CLOCK_GLYPH_ROWS + 2 * (VERTICAL_PADDING + 1) + 2;

        let clock_lines = if use_glyphs {
            clock_rows(&clock)
                .into_iter()
                .map(|row| Line::from(Span::styled(row, clock_style)))
                .collect::<Vec<Line>>()
        } else {
            vec![Line::from(Span::styled(clock, clock_style))]
        };

        let clock_height = clock_lines.len() as u16;
        let top = (area.height.saturating_sub(
            clock_height + 2 * VERTICAL_PADDING + 2, // selector + hints
        )) / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(top),
                    Constraint::Length(1), // mode selector
                    Constraint::Length(VERTICAL_PADDING),
                    Constraint::Length(clock_height),
                    Constraint::Length(VERTICAL_PADDING),
                    Constraint::Length(1), // hints
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        Paragraph::new(mode_selector_line(timer.mode))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(clock_lines)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(hint_line(timer.running))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}
