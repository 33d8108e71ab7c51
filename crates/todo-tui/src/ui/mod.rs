use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, FocusArea};
use crate::ui::controls::ToggleAll;
use crate::ui::footer::Footer;
use crate::ui::text_input::TextInput;
use crate::ui::todo_list::TodoList;

pub mod controls;
pub mod footer;
pub mod text_input;
pub mod todo_list;

const NEW_TODO_HELP: &str = "Enter add · Tab list · Ctrl-C quit";
const LIST_HELP: &str =
    "Enter edit · Space toggle · d destroy · a all · c clear · 1/2/3 filter · Tab new · q quit";
const EDIT_HELP: &str = "Enter save · Esc cancel";

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

pub fn render(f: &mut Frame, state: &AppState) {
    let help_height = u16::from(state.show_help);
    let [header, list, footer, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(help_height),
    ])
    .areas(f.area());

    render_header(f, state, header);
    render_list(f, state, list);

    f.render_widget(
        Footer {
            total: state.store.len(),
            remaining: state.store.remaining(),
            completed: state.store.completed(),
            filter: state.filter,
        },
        footer,
    );

    if state.show_help {
        render_help(f, state, help);
    }
}

fn render_header(f: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == FocusArea::NewTodo && state.editing.is_none();
    let block = Block::default()
        .title(Span::styled(
            " todos ",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style(focused));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [toggle_all, input] =
        Layout::horizontal([Constraint::Length(4), Constraint::Min(1)]).areas(inner);

    f.render_widget(
        ToggleAll::new(state.store.all_completed(), !state.store.is_empty()),
        toggle_all,
    );

    let text_input = TextInput::new(&state.new_todo).focused(focused);
    if let Some(position) = text_input.cursor_position(input) {
        f.set_cursor_position(position);
    }
    f.render_widget(text_input, input);
}

fn render_list(f: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == FocusArea::List || state.editing.is_some();
    let block = Block::default()
        .title(format!(" {} ", state.filter.label()))
        .borders(Borders::ALL)
        .border_style(border_style(focused));

    let selected = (focused && !state.store.is_empty()).then_some(state.selected);
    let list = TodoList::new(state.visible_todos())
        .selected(selected)
        .editing(
            state
                .editing
                .as_ref()
                .map(|session| (session.id, &session.field)),
        )
        .block(block);

    if let Some(position) = list.cursor_position(area) {
        f.set_cursor_position(position);
    }
    f.render_widget(list, area);
}

fn render_help(f: &mut Frame, state: &AppState, area: Rect) {
    let text = if state.editing.is_some() {
        EDIT_HELP
    } else {
        match state.focus {
            FocusArea::NewTodo => NEW_TODO_HELP,
            FocusArea::List => LIST_HELP,
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(text)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use todo_core::config::UiConfig;
    use todo_core::Key;

    fn draw(state: &AppState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        terminal
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_app_shows_placeholder_and_no_footer() {
        let state = AppState::new(&UiConfig::default());
        let screen = screen(&draw(&state));

        assert!(screen.contains("todos"));
        assert!(screen.contains("What needs to be done?"));
        assert!(!screen.contains("items left"));
        assert!(screen.contains(NEW_TODO_HELP));
    }

    #[test]
    fn test_items_and_footer_render() {
        let mut state = AppState::new(&UiConfig::default());
        for c in "Walk the dog".chars() {
            state.handle_key(Key::Char(c));
        }
        state.handle_key(Key::Enter);
        let screen = screen(&draw(&state));

        assert!(screen.contains("[ ] Walk the dog"));
        assert!(screen.contains("1 item left"));
        assert!(screen.contains("All  Active  Completed"));
    }

    #[test]
    fn test_cursor_follows_new_todo_field() {
        let mut state = AppState::new(&UiConfig::default());
        for c in "ab".chars() {
            state.handle_key(Key::Char(c));
        }
        let mut terminal = draw(&state);

        // Border, then the toggle-all column, then two chars
        assert_eq!(
            terminal.get_cursor_position().unwrap(),
            ratatui::layout::Position::new(7, 1)
        );
    }

    #[test]
    fn test_help_hidden_when_disabled() {
        let ui = UiConfig {
            show_help: false,
            ..UiConfig::default()
        };
        let state = AppState::new(&ui);
        let screen = screen(&draw(&state));
        assert!(!screen.contains(NEW_TODO_HELP));
    }
}
