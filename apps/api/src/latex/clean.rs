//! Text Cleaner — reduces a LaTeX fragment to readable plain text.
//!
//! Lossy and best-effort: this is not a LaTeX parser. Formatting macros are
//! unwrapped, every other command name is dropped while its arguments are
//! kept, and typographic escapes are normalised.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref INLINE_FORMAT: Regex =
        Regex::new(r"\\(?:textbf|textit|small|emph|underline)\{([^{}]*)\}")
            .expect("inline format pattern");
    static ref HREF: Regex =
        Regex::new(r"\\href\{[^{}]*\}\{([^{}]*)\}").expect("href pattern");
}

/// Cleans a raw LaTeX fragment into plain text.
pub fn clean(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let unwrapped = unwrap_formatting(text);
    let stripped = strip_commands(&unwrapped).replace("--", "\u{2013}");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unwraps innermost formatting macros until a pass changes nothing, so
/// arbitrarily deep nesting (bold inside italic inside a link) is handled.
fn unwrap_formatting(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let linked = HREF.replace_all(&current, "$1");
        let next = INLINE_FORMAT.replace_all(&linked, "$1").into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Single scan that drops command names, braces and comments, and restores
/// escaped special characters.
fn strip_commands(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.peek().copied() {
                Some(n) if n.is_ascii_alphabetic() => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if !n.is_ascii_alphabetic() {
                            break;
                        }
                        name.push(n);
                        chars.next();
                    }
                    if let Some(symbol) = text_symbol(&name) {
                        out.push(symbol);
                    }
                }
                Some(n @ ('&' | '%' | '$' | '#' | '_' | '{' | '}')) => {
                    out.push(n);
                    chars.next();
                }
                Some(_) => {
                    // `\\`, `\ `, `\,` and friends are spacing.
                    out.push(' ');
                    chars.next();
                }
                None => {}
            },
            '{' | '}' => {}
            '~' => out.push(' '),
            '%' => {
                for rest in chars.by_ref() {
                    if rest == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            c => out.push(c),
        }
    }
    out
}

fn text_symbol(command: &str) -> Option<char> {
    match command {
        "textbackslash" => Some('\\'),
        "textasciitilde" => Some('~'),
        "textasciicircum" => Some('^'),
        _ => None,
    }
}
