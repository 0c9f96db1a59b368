//! Escaping utilities for Markdown report generation.
//!
//! Contract data (symbol names, signatures, struct tags, doc comments)
//! comes straight from the compared sources. Go signatures are full of
//! characters Markdown treats specially: `*` in pointer types, `[` and
//! `]` in slices and generics, backquotes in struct tags, and `|` in
//! union constraints. All of it is escaped before it reaches a table.

/// Escape a string for safe inclusion in Markdown table cells.
///
/// Pipes would split the cell, newlines would end the row.
///
/// # Examples
///
/// ```
/// use contract_tools::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("~int | ~string"), "~int \\| ~string");
/// assert_eq!(escape_markdown_table("line1\nline2"), "line1 line2");
/// assert_eq!(escape_markdown_table("[]*User"), "\\[\\]\\*User");
/// ```
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in Markdown inline content.
///
/// # Examples
///
/// ```
/// use contract_tools::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**bold**"), "\\*\\*bold\\*\\*");
/// assert_eq!(escape_markdown_inline("# heading"), "\\# heading");
/// ```
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '!' => result.push_str("\\!"),
            '~' => result.push_str("\\~"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Wrap a signature in a code span inside a table cell.
///
/// The fence is one backquote longer than the longest backquote run in
/// the text, so struct tags survive intact.
///
/// # Examples
///
/// ```
/// use contract_tools::reports::escape::markdown_code_cell;
///
/// assert_eq!(markdown_code_cell("func Run() error"), "`func Run() error`");
/// assert_eq!(markdown_code_cell("ID string `json:\"id\"`"), "`` ID string `json:\"id\"` ``");
/// ```
pub fn markdown_code_cell(s: &str) -> String {
    let flat: String = s
        .chars()
        .filter(|c| *c != '\r')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect::<String>()
        .replace('|', "\\|");

    let mut longest = 0;
    let mut run = 0;
    for c in flat.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    if longest == 0 {
        return format!("`{flat}`");
    }
    let fence = "`".repeat(longest + 1);
    format!("{fence} {flat} {fence}")
}

/// Helper to render an optional signature as a code cell, returning "-" for None.
pub fn code_cell_opt(s: Option<&str>) -> String {
    match s {
        Some(v) if !v.is_empty() => markdown_code_cell(v),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_table_separators() {
        assert_eq!(escape_markdown_table("a | b"), "a \\| b");
        assert_eq!(escape_markdown_table("a\r\nb"), "a b");
        assert_eq!(escape_markdown_table("map[string]any"), "map\\[string\\]any");
    }

    #[test]
    fn test_escape_table_html_like() {
        assert_eq!(escape_markdown_table("<-chan int"), "&lt;-chan int");
    }

    #[test]
    fn test_escape_inline_plain_text_unchanged() {
        assert_eq!(escape_markdown_inline("users"), "users");
        assert_eq!(escape_markdown_inline("github.com/acme/api"), "github.com/acme/api");
    }

    #[test]
    fn test_code_cell_fences() {
        assert_eq!(markdown_code_cell("[]*User"), "`[]*User`");
        assert_eq!(markdown_code_cell("a ``b`` c"), "``` a ``b`` c ```");
        assert_eq!(markdown_code_cell("T ~int | ~string"), "`T ~int \\| ~string`");
        assert_eq!(markdown_code_cell("line1\nline2"), "`line1 line2`");
    }

    #[test]
    fn test_code_cell_opt() {
        assert_eq!(code_cell_opt(None), "-");
        assert_eq!(code_cell_opt(Some("")), "-");
        assert_eq!(code_cell_opt(Some("int")), "`int`");
    }
}
