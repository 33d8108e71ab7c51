/// Keys the text fields understand, independent of the terminal backend.
///
/// Chords and keys with no editing meaning arrive as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    Tab,
    Esc,
    Other,
}

impl Key {
    /// Only Enter commits; Tab, Esc and friends never do.
    pub fn is_commit(self) -> bool {
        matches!(self, Key::Enter)
    }
}
