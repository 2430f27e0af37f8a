//! Line-numbered, keyword-highlighted rendering of a function body

use regex::Regex;
use std::sync::OnceLock;

/// C++ keywords rendered with the `keyword` class
pub const KEYWORDS: &[&str] = &[
    "bool", "return", "if", "else", "for", "while", "try", "catch", "throw", "auto", "const",
    "static", "inline", "virtual", "override", "final", "public", "private", "protected",
    "class", "struct", "enum", "template", "typename", "namespace", "using", "import",
    "export", "module",
];

/// One alternation per token class. Matches never overlap, so a keyword
/// inside a string literal stays part of the string.
fn token_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r#"(?P<keyword>\b(?:{})\b)|(?P<number>\b\d+\b)|(?P<string>"[^"]*")"#,
            KEYWORDS.join("|")
        );
        Regex::new(&pattern).expect("token pattern is valid")
    })
}

/// Escape text for embedding in HTML element content or attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape one source line and wrap keywords, numbers and string literals
pub fn highlight_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut last = 0;

    for caps in token_pattern().captures_iter(line) {
        let Some(m) = caps.get(0) else { continue };
        let class = if caps.name("keyword").is_some() {
            "keyword"
        } else if caps.name("number").is_some() {
            "number"
        } else {
            "string"
        };
        out.push_str(&escape_html(&line[last..m.start()]));
        out.push_str(&format!(
            r#"<span class="{}">{}</span>"#,
            class,
            escape_html(m.as_str())
        ));
        last = m.end();
    }
    out.push_str(&escape_html(&line[last..]));
    out
}

/// Render `code` as a code block tagged with the file it came from
pub fn format_code(code: &str, file_name: &str) -> String {
    let lines: Vec<String> = code
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .enumerate()
        .map(|(i, line)| {
            format!(
                r#"<div class="code-line"><span class="line-number">{:>3}</span> {}</div>"#,
                i + 1,
                highlight_line(line)
            )
        })
        .collect();

    format!(
        r#"<div class="code-block" data-filename="{}">{}</div>"#,
        escape_html(file_name),
        lines.join("\n")
    )
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arbitrary_cpp_line() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                "return", "if", "auto", "x", "42", "\"str\"", "\"", "<", ">", "&", "'", " ",
                "(", ")", ";", "==", "v2",
            ]),
            0..30,
        )
        .prop_map(|parts| parts.concat())
    }

    fn strip_tags(s: &str) -> String {
        let re = Regex::new(r"<[^>]*>").unwrap();
        re.replace_all(s, "").into_owned()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn highlighting_preserves_escaped_text(ref line in arbitrary_cpp_line()) {
            let out = highlight_line(line);
            prop_assert_eq!(strip_tags(&out), escape_html(line));
        }

        #[test]
        fn highlighting_never_panics(ref line in ".{0,200}") {
            let _ = highlight_line(line);
        }
    }
}
