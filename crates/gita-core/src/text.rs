use std::sync::LazyLock;

use regex::Regex;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*").expect("parenthetical pattern is valid"));

/// Strip markdown bold markers and parenthetical notes from model output.
///
/// Every `**` is removed first, then every `(...)` span together with the
/// whitespace around it. The result is trimmed.
///
/// ```
/// use gita_core::clean_text;
///
/// assert_eq!(clean_text("**ధర్మ** క్షేత్రే (కురుక్షేత్రం) "), "ధర్మ క్షేత్రే");
/// ```
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let unbolded = text.replace("**", "");
    PARENTHETICAL.replace_all(&unbolded, "").trim().to_owned()
}
