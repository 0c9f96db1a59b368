//! Text normalization for type signatures and values.

/// Collapse runs of whitespace to a single space and trim the ends.
///
/// Whitespace directly inside brackets and around commas is dropped, so
/// `map[ string ]int` and `map[string]int` normalize identically.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        let closes = matches!(ch, ')' | ']' | '}' | ',');
        if pending_space && !closes && !out.ends_with(['(', '[', '{']) {
            out.push(' ');
        }
        pending_space = false;
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_runs() {
        assert_eq!(
            normalize_whitespace("  func(a  int,\n\tb string) error "),
            "func(a int, b string) error"
        );
    }

    #[test]
    fn test_bracket_padding() {
        assert_eq!(normalize_whitespace("map[ string ]int"), "map[string]int");
        assert_eq!(normalize_whitespace("struct {\n\tX int\n}"), "struct {X int}");
    }
}
