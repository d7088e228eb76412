//! Source line normalizer (C2): turns one raw source line into the
//! canonical whitespace-separated form the rest of the assembler tokenizes.

/// Strips any `#`-comment, trims, replaces commas with spaces, and
/// collapses whitespace runs to a single space.
///
/// # Examples
/// ```
/// use masm::normalize::normalize_line;
///
/// assert_eq!(normalize_line("  add $t0, $a0,  $a1  # sum"), "add $t0 $a0 $a1");
/// assert_eq!(normalize_line("loop:"), "loop:");
/// assert_eq!(normalize_line("# just a comment"), "");
/// ```
pub fn normalize_line(line: &str) -> String {
    let without_comment = match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    };

    without_comment
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comment() {
        assert_eq!(normalize_line("halt # done"), "halt");
    }

    #[test]
    fn collapses_commas_and_whitespace() {
        assert_eq!(
            normalize_line("add   $t0,$a0 ,$a1"),
            "add $t0 $a0 $a1"
        );
    }

    #[test]
    fn empty_and_comment_only_lines_normalize_to_empty() {
        assert_eq!(normalize_line(""), "");
        assert_eq!(normalize_line("   "), "");
        assert_eq!(normalize_line("# comment"), "");
    }

    #[test]
    fn preserves_a_bare_label() {
        assert_eq!(normalize_line("done:"), "done:");
    }
}
