/// Escape backticks, which open inline code and command substitution: `` ` `` → `` \` ``.
pub(crate) fn escape_backticks(s: &str) -> String {
    escape_chars(s, &['`'])
}

/// Escape parentheses, which break shell and Markdown link syntax: `(` → `\(`, `)` → `\)`.
pub(crate) fn escape_parens(s: &str) -> String {
    escape_chars(s, &['(', ')'])
}

/// Replace line-ending and tab characters with two-character literals.
/// `\n` becomes backslash-n, `\t` becomes backslash-t and `\r` is dropped.
pub(crate) fn escape_controls(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

fn escape_chars(s: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
