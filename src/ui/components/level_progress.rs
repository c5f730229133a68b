use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::summary::LevelProgress;
use crate::ui::theme::Theme;

/// Sidebar listing every level with its resume cursor as a bar.
pub struct LevelProgressList<'a> {
    levels: &'a [LevelProgress],
    notebook_size: usize,
    theme: &'a Theme,
}

impl<'a> LevelProgressList<'a> {
    pub fn new(levels: &'a [LevelProgress], notebook_size: usize, theme: &'a Theme) -> Self {
        Self {
            levels,
            notebook_size,
            theme,
        }
    }
}

impl Widget for LevelProgressList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                " Progress ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 8 || inner.height == 0 {
            return;
        }

        let bar_width = (inner.width as usize).saturating_sub(4);
        let mut lines = Vec::new();
        for level in self.levels {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(" {}", level.name),
                    Style::default().fg(colors.fg()),
                ),
                Span::styled(
                    format!("  {}/{} {:.0}%", level.cursor, level.total, level.ratio() * 100.0),
                    Style::default().fg(colors.muted()),
                ),
            ]));
            let (filled, empty) = bar_parts(level.cursor, level.total, bar_width);
            lines.push(Line::from(vec![
                Span::raw(" "),
                Span::styled(filled, Style::default().fg(colors.bar_filled())),
                Span::styled(empty, Style::default().fg(colors.bar_empty())),
            ]));
        }

        lines.push(Line::from(""));
        let notebook_color = if self.notebook_size == 0 {
            colors.muted()
        } else {
            colors.warning()
        };
        lines.push(Line::from(Span::styled(
            format!(" Wrong notebook: {}", self.notebook_size),
            Style::default().fg(notebook_color),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

fn bar_parts(done: usize, total: usize, width: usize) -> (String, String) {
    if total == 0 {
        return (String::new(), "\u{2591}".repeat(width));
    }
    let filled = (done.min(total) * width / total).min(width);
    ("\u{2588}".repeat(filled), "\u{2591}".repeat(width - filled))
}
