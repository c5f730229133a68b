use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::WrongNotebook;
use crate::ui::theme::Theme;
use crate::vocab::word_store::WordStore;

/// Table of saved wrong answers with a movable selection.
pub struct NotebookList<'a> {
    notebook: &'a WrongNotebook,
    words: &'a WordStore,
    selected: usize,
    theme: &'a Theme,
}

impl<'a> NotebookList<'a> {
    pub fn new(
        notebook: &'a WrongNotebook,
        words: &'a WordStore,
        selected: usize,
        theme: &'a Theme,
    ) -> Self {
        Self {
            notebook,
            words,
            selected,
            theme,
        }
    }

    fn level_label(&self, index: usize) -> String {
        match self.notebook.get(index).and_then(|e| e.level.as_ref()) {
            Some(level) => self.words.level_name(level).to_string(),
            None => String::new(),
        }
    }
}

impl Widget for NotebookList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(Line::from(Span::styled(
                " Wrong Notebook ",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from(Span::styled(
            format!(" {}", self.notebook.summary()),
            Style::default().fg(colors.fg()),
        ))];

        if self.notebook.is_empty() {
            Paragraph::new(lines).render(inner, buf);
            return;
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "  {:>3}  {:<18}  {:<14}  {:<10}  {}",
                "#", "Term", "Translation", "Level", "Added"
            ),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "  ──────────────────────────────────────────────────────────────",
            Style::default().fg(colors.border()),
        )));

        // Keep the selection visible when the list is taller than the area.
        let visible = (inner.height as usize).saturating_sub(lines.len()).max(1);
        let first = self.selected.saturating_sub(visible - 1);

        for (i, entry) in self
            .notebook
            .entries()
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
        {
            let added = entry
                .added_at
                .map(|t| t.format("%m/%d %H:%M").to_string())
                .unwrap_or_default();
            let row = format!(
                "  {:>3}  {:<18}  {:<14}  {:<10}  {}",
                i + 1,
                entry.term,
                entry.translation,
                self.level_label(i),
                added
            );
            let style = if i == self.selected {
                Style::default()
                    .fg(colors.fg())
                    .bg(colors.accent_dim())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(Span::styled(row, style)));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::entry::{LevelDef, LevelId, VocabEntry};

    fn render_text(notebook: &WrongNotebook, words: &WordStore) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 12);
        let mut buf = Buffer::empty(area);
        NotebookList::new(notebook, words, 0, &theme).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn shows_level_names_and_placeholder() {
        let words = WordStore::from_levels(vec![(
            LevelDef::new("level1", "Level 1", "builtin:level1.csv"),
            vec![VocabEntry::new("apple", "apfel")],
        )]);
        let mut notebook = WrongNotebook::default();
        notebook.add(&VocabEntry::new("apple", "apfel"), Some(LevelId::new("level1")));
        notebook.add(&VocabEntry::new("pear", "birne"), None);

        let theme = Theme::default();
        let list = NotebookList::new(&notebook, &words, 0, &theme);
        assert_eq!(list.level_label(0), "Level 1");
        assert_eq!(list.level_label(1), "");

        let text = render_text(&notebook, &words);
        assert!(text.contains("2 items saved"));
        assert!(text.contains("Level 1"));
        assert!(text.contains("pear"));
    }

    #[test]
    fn empty_notebook_shows_summary_only() {
        let words = WordStore::from_levels(Vec::new());
        let text = render_text(&WrongNotebook::default(), &words);
        assert!(text.contains("No wrong items recorded yet."));
        assert!(!text.contains("Translation"));
    }
}
