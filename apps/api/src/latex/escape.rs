//! LaTeX Escaper: plain text and URLs into template-safe LaTeX.

/// Escapes plain text for use inside the résumé template.
///
/// Handles `\ & % $ # _ { } ~ ^`. Done in one pass over the input, so the
/// backslashes introduced by a replacement are never escaped a second time.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            c => out.push(c),
        }
    }
    out
}

/// Escapes the characters that break an `\href` target: `%` and `#`.
/// Everything else in a URL is passed through as written.
pub fn escape_url(url: &str) -> String {
    url.replace('%', r"\%").replace('#', r"\#")
}
