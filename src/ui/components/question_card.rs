use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::question::QuestionCard;
use crate::ui::theme::Theme;

/// Renders a question: the term, numbered options and, once answered, the feedback.
pub struct QuestionView<'a> {
    card: &'a QuestionCard,
    title: String,
    theme: &'a Theme,
}

impl<'a> QuestionView<'a> {
    pub fn new(card: &'a QuestionCard, title: impl Into<String>, theme: &'a Theme) -> Self {
        Self {
            card,
            title: title.into(),
            theme,
        }
    }
}

impl Widget for QuestionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let card = self.card;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .title_bottom(Line::from(Span::styled(
                format!(" {}/{} ", card.position + 1, card.total),
                Style::default().fg(colors.muted()),
            )))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(card.options.len() as u16 + 1),
                Constraint::Min(0),
            ])
            .split(inner);

        let prompt = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                card.entry.term.as_str(),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        prompt.render(layout[0], buf);

        let outcome = card.outcome();
        let correct = card.correct_option();
        let option_lines: Vec<Line> = card
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = match outcome {
                    Some(_) if Some(i) == correct => Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD),
                    Some(o) if o.selected == i => Style::default()
                        .fg(colors.error())
                        .add_modifier(Modifier::CROSSED_OUT),
                    Some(_) => Style::default().fg(colors.muted()),
                    None => Style::default().fg(colors.fg()),
                };
                Line::from(vec![
                    Span::styled(format!("  [{}] ", i + 1), Style::default().fg(colors.accent())),
                    Span::styled(option.translation.as_str(), style),
                ])
            })
            .collect();
        Paragraph::new(option_lines).render(layout[1], buf);

        let mut feedback_lines = Vec::new();
        if let (Some(outcome), Some(text)) = (outcome, card.feedback()) {
            let color = if outcome.correct {
                colors.success()
            } else {
                colors.error()
            };
            feedback_lines.push(Line::from(Span::styled(
                format!("  {text}"),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
            if card.saved_to_notebook() {
                feedback_lines.push(Line::from(Span::styled(
                    "  Saved to wrong notebook",
                    Style::default().fg(colors.warning()),
                )));
            }
        }
        Paragraph::new(feedback_lines)
            .wrap(Wrap { trim: false })
            .render(layout[2], buf);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::vocab::entry::VocabEntry;

    fn render_text(card: &QuestionCard) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 16);
        let mut buf = Buffer::empty(area);
        QuestionView::new(card, "Level 1", &theme).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn card() -> QuestionCard {
        let pool = vec![
            VocabEntry::new("apple", "apfel"),
            VocabEntry::new("pear", "birne"),
        ];
        QuestionCard::new(&pool[0], &pool, 0, 2, &mut SmallRng::seed_from_u64(8))
    }

    #[test]
    fn shows_term_and_options() {
        let text = render_text(&card());
        assert!(text.contains("apple"));
        assert!(text.contains("apfel"));
        assert!(text.contains("birne"));
        assert!(text.contains("1/2"));
        assert!(!text.contains("Correct!"));
    }

    #[test]
    fn shows_feedback_after_answer() {
        let mut card = card();
        let correct = card.correct_option().unwrap();
        card.answer(correct);
        assert!(render_text(&card).contains("Correct!"));
    }
}
