use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use todo_core::TextField;

/// Single-line view of a [`TextField`]: the value, or the placeholder in a
/// dim style while the value is empty. Scrolls horizontally to keep the
/// cursor in view.
pub struct TextInput<'a> {
    field: &'a TextField,
    focused: bool,
    block: Option<Block<'a>>,
}

impl<'a> TextInput<'a> {
    pub fn new(field: &'a TextField) -> Self {
        Self {
            field,
            focused: false,
            block: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn inner(&self, area: Rect) -> Rect {
        match &self.block {
            Some(block) => block.inner(area),
            None => area,
        }
    }

    /// First visible char so the cursor stays inside `width` columns.
    fn scroll_offset(&self, width: u16) -> usize {
        let width = usize::from(width.max(1));
        self.field.cursor().saturating_sub(width - 1)
    }

    /// Terminal cell for the cursor, if focused and the area is not empty.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        let inner = self.inner(area);
        if !self.focused || inner.width == 0 || inner.height == 0 {
            return None;
        }
        let column = self.field.cursor() - self.scroll_offset(inner.width);
        Some(Position::new(inner.x + column as u16, inner.y))
    }
}

impl Widget for TextInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.inner(area);
        let line = if self.field.is_empty() {
            let placeholder = self.field.placeholder().unwrap_or_default();
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            let visible: String = self
                .field
                .value()
                .chars()
                .skip(self.scroll_offset(inner.width))
                .collect();
            Line::from(visible)
        };

        let mut paragraph = Paragraph::new(line);
        if let Some(block) = self.block {
            paragraph = paragraph.block(block);
        }
        paragraph.render(area, buf);
    }
}
