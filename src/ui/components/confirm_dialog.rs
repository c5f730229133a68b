use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// Small centered popup asking a yes/no question.
pub struct ConfirmDialog<'a> {
    pub message: String,
    pub theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(message: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            message: message.into(),
            theme,
        }
    }

    fn dialog_area(&self, area: Rect) -> Rect {
        let text_width = self.message.chars().count() as u16 + 6;
        let width = text_width.clamp(34, 60).min(area.width);
        let height = 6u16.min(area.height);
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let dialog_area = self.dialog_area(area);

        Clear.render(dialog_area, buf);
        let dialog = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  {}  ", self.message),
                Style::default().fg(colors.fg()),
            )),
            Line::from(Span::styled(
                "  [y] Yes  [n] No",
                Style::default().fg(colors.muted()),
            )),
        ])
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(colors.bg()))
        .block(
            Block::bordered()
                .title(" Confirm ")
                .border_style(Style::default().fg(colors.error()))
                .style(Style::default().bg(colors.bg())),
        );
        dialog.render(dialog_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_stays_inside_small_areas() {
        let theme = Theme::default();
        let dialog = ConfirmDialog::new("Clear all saved words?", &theme);
        let area = Rect::new(0, 0, 20, 4);
        let inner = dialog.dialog_area(area);
        assert!(inner.width <= 20);
        assert!(inner.height <= 4);
    }

    #[test]
    fn renders_message() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        ConfirmDialog::new("Remove #2?", &theme).render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Remove #2?"));
        assert!(text.contains("Confirm"));
    }
}
