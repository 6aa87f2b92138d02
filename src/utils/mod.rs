//! Small display helpers.

/// Returns the substring before the first space, or the input unchanged when
/// it is empty or contains none. Used to shorten raw user agent strings for
/// display.
pub fn first_word(text: &str) -> &str {
    match text.split_once(' ') {
        Some((first, _)) => first,
        None => text,
    }
}
