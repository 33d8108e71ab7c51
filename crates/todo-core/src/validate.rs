/// Minimum number of characters a trimmed title needs before it is committed.
pub const MIN_LENGTH: usize = 2;

/// Check an already-trimmed `text` against a minimum length.
///
/// Length is counted in Unicode scalar values, so `"é!"` is two characters
/// regardless of its byte length.
pub fn is_valid(text: &str, min: usize) -> bool {
    text.chars().count() >= min
}
