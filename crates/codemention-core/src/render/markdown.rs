//! Markdown escaping for paths and glob patterns

/// Escape characters that Markdown would read as emphasis, headings,
/// links or inline code.
///
/// `*`, `#`, `(`, `)`, `[`, `]`, `_` and `` ` `` get a backslash; `<` and
/// `>` become HTML entities. Slashes are left alone so paths stay readable.
pub fn markdown_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match c {
            '*' | '#' | '(' | ')' | '[' | ']' | '_' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_glob_stars() {
        assert_eq!(markdown_escape("db/migrate/**"), r"db/migrate/\*\*");
        assert_eq!(markdown_escape("spec/*.rb"), r"spec/\*.rb");
    }

    #[test]
    fn test_escapes_underscores_and_brackets() {
        assert_eq!(
            markdown_escape("spec/spec_helper.rb"),
            r"spec/spec\_helper.rb"
        );
        assert_eq!(markdown_escape("src/[id]/(x).ts"), r"src/\[id\]/\(x\).ts");
        assert_eq!(markdown_escape("#1 `code`"), r"\#1 \`code\`");
    }

    #[test]
    fn test_angle_brackets_become_entities() {
        assert_eq!(markdown_escape("a<b>c"), "a&lt;b&gt;c");
    }

    #[test]
    fn test_plain_paths_untouched() {
        assert_eq!(
            markdown_escape(".github/codemention.yml"),
            ".github/codemention.yml"
        );
    }
}
