//! Splitting of combined "surname and given name" values.

use crate::text::sanitize_text;

/// Splits a combined name into `(surname, given_name)`.
///
/// With a comma, the left side is the surname and the right side the given
/// name. Without one, the last word is the given name and every earlier word
/// the surname, so `"De La Cruz Juan"` gives `("De La Cruz", "Juan")`. A
/// multi-word given name without a comma is therefore split wrongly; use
/// separate surname / given-name columns for such files.
pub fn split_full_name(value: &str) -> (String, String) {
    let text = sanitize_text(value);
    if let Some((surname, given)) = text.split_once(',') {
        return (surname.trim().to_string(), given.trim().to_string());
    }

    let mut words: Vec<&str> = text.split_whitespace().collect();
    match words.len() {
        0 => (String::new(), String::new()),
        1 => (words[0].to_string(), String::new()),
        _ => {
            let given = words.pop().unwrap_or_default().to_string();
            (words.join(" "), given)
        }
    }
}
