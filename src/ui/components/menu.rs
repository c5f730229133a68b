use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::summary::LevelProgress;
use crate::ui::theme::Theme;
use crate::vocab::entry::LevelId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuAction {
    StartLevel(LevelId),
    Review,
    Notebook,
    Quit,
}

pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub description: String,
    pub action: MenuAction,
}

pub struct Menu<'a> {
    pub items: Vec<MenuItem>,
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> Menu<'a> {
    /// One entry per level (keys 1-9), then review, notebook and quit.
    pub fn new(theme: &'a Theme, levels: &[LevelProgress]) -> Self {
        let mut items: Vec<MenuItem> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| MenuItem {
                key: if i < 9 { (i + 1).to_string() } else { String::new() },
                label: level.name.clone(),
                description: level_description(level),
                action: MenuAction::StartLevel(level.id.clone()),
            })
            .collect();

        items.push(MenuItem {
            key: "r".to_string(),
            label: "Review Wrong Answers".to_string(),
            description: "Practice the words in your wrong notebook".to_string(),
            action: MenuAction::Review,
        });
        items.push(MenuItem {
            key: "n".to_string(),
            label: "Wrong Notebook".to_string(),
            description: "Browse, remove or clear saved words".to_string(),
            action: MenuAction::Notebook,
        });
        items.push(MenuItem {
            key: "q".to_string(),
            label: "Quit".to_string(),
            description: String::new(),
            action: MenuAction::Quit,
        });

        Self {
            items,
            selected: 0,
            theme,
        }
    }

    /// Refresh level descriptions after progress changed.
    pub fn update_progress(&mut self, levels: &[LevelProgress]) {
        for item in &mut self.items {
            if let MenuAction::StartLevel(id) = &item.action {
                if let Some(level) = levels.iter().find(|l| &l.id == id) {
                    item.description = level_description(level);
                }
            }
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % self.items.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len() - 1;
        }
    }

    pub fn selected_action(&self) -> Option<&MenuAction> {
        self.items.get(self.selected).map(|item| &item.action)
    }

    pub fn action_for_key(&self, key: char) -> Option<&MenuAction> {
        self.items
            .iter()
            .find(|item| item.key.len() == 1 && item.key.starts_with(key))
            .map(|item| &item.action)
    }
}

fn level_description(level: &LevelProgress) -> String {
    if level.total == 0 {
        "No words loaded".to_string()
    } else {
        format!("{} words, resume at {}/{}", level.total, level.cursor, level.total)
    }
}

impl Widget for &Menu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "lexdr",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Vocabulary Flashcards",
                Style::default().fg(colors.fg()),
            )),
        ];

        let title = Paragraph::new(title_lines).alignment(Alignment::Center);
        title.render(layout[0], buf);

        let menu_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.items
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[2]);

        for (i, item) in self.items.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{key}] {label}", key = item.key, label = item.label);
            let desc_text = format!("       {}", item.description);

            let lines = vec![
                Line::from(Span::styled(
                    &*label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    &*desc_text,
                    Style::default().fg(colors.muted()),
                )),
            ];

            let p = Paragraph::new(lines);
            if i < menu_layout.len() {
                p.render(menu_layout[i], buf);
            }
        }
    }
}
