// Input text rules shared by the controller and the front end.

/// Length as the user perceives it: Unicode scalar values, not bytes.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// True when the text has something other than whitespace in it.
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Single-line preview for logs and compact rendering.
pub fn preview_text(text: &str, max_chars: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if char_count(&flat) <= max_chars {
        return flat;
    }

    let mut out: String = flat.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
