use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use todo_core::Filter;

use crate::ui::controls::ClearCompleted;

/// Remaining-items counter.
#[derive(Debug, Clone, Copy)]
pub struct Counter {
    remaining: usize,
}

impl Counter {
    pub fn new(remaining: usize) -> Self {
        Self { remaining }
    }

    pub fn line(&self) -> Line<'static> {
        let noun = if self.remaining == 1 { "item" } else { "items" };
        Line::from(vec![
            Span::styled(
                self.remaining.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {} left", noun)),
        ])
    }
}

impl Widget for Counter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}

/// `All  Active  Completed`, with the selected filter highlighted.
#[derive(Debug, Clone, Copy)]
pub struct FilterLinks {
    selected: Filter,
}

impl FilterLinks {
    pub fn new(selected: Filter) -> Self {
        Self { selected }
    }

    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (index, filter) in Filter::ALL.into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::raw("  "));
            }
            let style = if filter == self.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(filter.label(), style));
        }
        Line::from(spans)
    }
}

impl Widget for FilterLinks {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.line().render(area, buf);
    }
}

/// Counter, filters and clear-completed on one row. Hidden when the list is
/// empty.
#[derive(Debug, Clone, Copy)]
pub struct Footer {
    pub total: usize,
    pub remaining: usize,
    pub completed: usize,
    pub filter: Filter,
}

impl Widget for Footer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.total == 0 || area.is_empty() {
            return;
        }
        let [counter, filters, clear] = Layout::horizontal([
            Constraint::Length(16),
            Constraint::Min(26),
            Constraint::Length(22),
        ])
        .areas(area);

        Counter::new(self.remaining).render(counter, buf);
        FilterLinks::new(self.filter).render(filters, buf);
        ClearCompleted::new(self.completed).render(clear, buf);
    }
}
