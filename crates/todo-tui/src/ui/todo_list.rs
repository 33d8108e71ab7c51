use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Widget},
};
use todo_core::{TextField, Todo, TodoId};

use crate::ui::controls::{Checkbox, DestroyButton};
use crate::ui::text_input::TextInput;

/// One row: checkbox, then the title or the inline edit field, then the
/// destroy marker while selected.
pub struct TodoItem<'a> {
    todo: &'a Todo,
    selected: bool,
    editing: Option<&'a TextField>,
}

impl<'a> TodoItem<'a> {
    pub fn new(todo: &'a Todo) -> Self {
        Self {
            todo,
            selected: false,
            editing: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn editing(mut self, field: Option<&'a TextField>) -> Self {
        self.editing = field;
        self
    }

    fn title_style(&self) -> Style {
        let mut style = Style::default();
        if self.todo.completed {
            style = style
                .fg(Color::DarkGray)
                .add_modifier(Modifier::CROSSED_OUT);
        }
        if self.selected {
            style = style.add_modifier(Modifier::BOLD);
        }
        style
    }

    /// Columns used by the checkbox, the title and the destroy marker.
    fn split(area: Rect) -> [Rect; 3] {
        Layout::horizontal([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(area)
    }

    /// Where the edit cursor goes, when this row is being edited.
    pub fn cursor_position(&self, area: Rect) -> Option<ratatui::layout::Position> {
        let [_, title, _] = Self::split(area);
        self.editing
            .and_then(|field| TextInput::new(field).focused(true).cursor_position(title))
    }
}

impl Widget for TodoItem<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let [checkbox, title, destroy] = Self::split(area);

        if self.selected {
            buf.set_style(area, Style::default().bg(Color::Rgb(40, 40, 48)));
        }
        Checkbox::new(self.todo.completed).render(checkbox, buf);

        match self.editing {
            Some(field) => TextInput::new(field).focused(true).render(title, buf),
            None => Span::styled(self.todo.title.as_str(), self.title_style()).render(title, buf),
        }

        if self.selected && self.editing.is_none() {
            DestroyButton.render(destroy, buf);
        }
    }
}

/// Renders the given items in order, scrolled so the selection is visible.
pub struct TodoList<'a> {
    items: Vec<&'a Todo>,
    selected: Option<usize>,
    editing: Option<(TodoId, &'a TextField)>,
    block: Option<Block<'a>>,
}

impl<'a> TodoList<'a> {
    pub fn new(items: Vec<&'a Todo>) -> Self {
        Self {
            items,
            selected: None,
            editing: None,
            block: None,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn editing(mut self, editing: Option<(TodoId, &'a TextField)>) -> Self {
        self.editing = editing;
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

    fn offset(&self, height: u16) -> usize {
        let height = usize::from(height.max(1));
        self.selected
            .map(|selected| (selected + 1).saturating_sub(height))
            .unwrap_or(0)
    }

    fn field_for(&self, todo: &Todo) -> Option<&'a TextField> {
        self.editing
            .filter(|(id, _)| *id == todo.id)
            .map(|(_, field)| field)
    }

    fn row_area(inner: Rect, row: usize) -> Rect {
        Rect::new(inner.x, inner.y + row as u16, inner.width, 1)
    }

    /// Cursor cell of the inline editor, if an item is being edited and is
    /// on screen.
    pub fn cursor_position(&self, area: Rect) -> Option<ratatui::layout::Position> {
        let inner = self.inner(area);
        let offset = self.offset(inner.height);
        self.items
            .iter()
            .skip(offset)
            .take(usize::from(inner.height))
            .enumerate()
            .find_map(|(row, todo)| {
                let field = self.field_for(todo)?;
                TodoItem::new(todo)
                    .editing(Some(field))
                    .cursor_position(Self::row_area(inner, row))
            })
    }
}

impl Widget for TodoList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.inner(area);
        let offset = self.offset(inner.height);

        for (row, (index, todo)) in self
            .items
            .iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(inner.height))
            .enumerate()
        {
            TodoItem::new(todo)
                .selected(self.selected == Some(index))
                .editing(self.field_for(todo))
                .render(Self::row_area(inner, row), buf);
        }

        if let Some(block) = self.block {
            block.render(area, buf);
        }
    }
}
