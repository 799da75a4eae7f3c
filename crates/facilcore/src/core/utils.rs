/// Longest directory name produced for a course or section, in characters
pub const MAX_DIR_NAME_CHARS: usize = 120;

/// Cleans a course or section title so it can be used as a path component.
///
/// Replaced characters:
/// - `/`, `\` -> `_` (path separators)
/// - `:`, `*`, `?`, `<`, `>`, `|` -> `_` (reserved on Windows)
/// - `"` -> `'`
/// - control characters -> `_`
///
/// Runs of whitespace (non-breaking spaces from pasted titles included)
/// collapse to one space. The result is capped at [`MAX_DIR_NAME_CHARS`],
/// then leading and trailing whitespace and dots are trimmed. An empty
/// result becomes `unnamed`.
///
/// # Example
///
/// ```
/// use facilcore::core::utils::escape_filename;
///
/// assert_eq!(escape_filename("Rust: Ownership/Borrowing"), "Rust_ Ownership_Borrowing");
/// assert_eq!(escape_filename("Módulo\u{a0}\u{a0}1 "), "Módulo 1");
/// assert_eq!(escape_filename("  ..  "), "unnamed");
/// ```
pub fn escape_filename(title: &str) -> String {
    let mut cleaned = String::with_capacity(title.len());
    let mut pending_space = false;

    for c in title.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !cleaned.is_empty() {
            cleaned.push(' ');
        }
        pending_space = false;

        cleaned.push(match c {
            '/' | '\\' | ':' | '*' | '?' | '<' | '>' | '|' => '_',
            '"' => '\'',
            c if c.is_control() => '_',
            c => c,
        });
    }

    let capped: String = cleaned.chars().take(MAX_DIR_NAME_CHARS).collect();
    let trimmed = capped.trim_matches(|c: char| c.is_whitespace() || c == '.');

    if trimmed.is_empty() {
        "unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}
