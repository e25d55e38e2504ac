// Utility functions

/// Replaces newlines with spaces and drops tabs.
pub fn clean_spaces(text: &str) -> String {
    text.replace('\n', " ").replace('\t', "")
}

/// Drops the first space-separated word ("Best Beer Bar" -> "Beer Bar").
pub fn strip_label(text: &str) -> String {
    text.split(' ').skip(1).collect::<Vec<_>>().join(" ").trim().to_string()
}
