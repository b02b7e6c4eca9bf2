//! Brace-aware scanning over LaTeX source.
//!
//! All offsets are byte offsets. `{` and `}` are ASCII, so any offset produced
//! here lands on a char boundary and is safe to slice with.

use crate::latex::template::RESUME_ITEM;

/// Returns the index of the `}` that closes the `{` at `open`.
///
/// `None` if `open` is not a `{` or the input ends before depth returns to zero.
pub fn find_matching_brace(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            // `\{`, `\}` and `\\` are literals, never structure.
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Captures `n` consecutive `{...}` arguments starting at `pos`, allowing
/// whitespace before each. Returns the argument bodies and the offset just
/// past the last closing brace.
pub fn capture_args(src: &str, pos: usize, n: usize) -> Option<(Vec<&str>, usize)> {
    let mut args = Vec::with_capacity(n);
    let mut cursor = pos;
    for _ in 0..n {
        let open = skip_whitespace(src, cursor);
        let close = find_matching_brace(src, open)?;
        args.push(&src[open + 1..close]);
        cursor = close + 1;
    }
    Some((args, cursor))
}

/// Bodies of every `\resumeItem{...}` in `src`, in order. Unterminated items are skipped.
pub fn resume_items(src: &str) -> Vec<&str> {
    macro_arguments(src, RESUME_ITEM)
}

/// First-argument bodies of every occurrence of `macro_name` (which includes
/// the leading backslash) that is followed by a brace group.
pub fn macro_arguments<'a>(src: &'a str, macro_name: &str) -> Vec<&'a str> {
    let mut found = Vec::new();
    for (at, _) in src.match_indices(macro_name) {
        let after = at + macro_name.len();
        if !is_command_end(src, after) {
            continue;
        }
        if let Some((args, _)) = capture_args(src, after, 1) {
            found.push(args[0]);
        }
    }
    found
}

/// Splits `src` on `sep` wherever brace depth is zero.
pub fn split_top_level(src: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in src.char_indices() {
        if std::mem::take(&mut escaped) {
            continue;
        }
        match c {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => depth -= 1,
            c if c == sep && depth <= 0 => {
                parts.push(&src[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&src[start..]);
    parts
}

/// Offsets of every occurrence of `macro_name` that is a whole command, i.e.
/// `\resumeSubheading` but not `\resumeSubheadingX`.
pub fn command_positions(src: &str, macro_name: &str) -> Vec<usize> {
    src.match_indices(macro_name)
        .map(|(at, _)| at)
        .filter(|&at| is_command_end(src, at + macro_name.len()))
        .collect()
}

fn is_command_end(src: &str, at: usize) -> bool {
    !src[at..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}

fn skip_whitespace(src: &str, pos: usize) -> usize {
    let rest = &src[pos.min(src.len())..];
    pos + (rest.len() - rest.trim_start().len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_brace_skips_escaped_braces() {
        let src = r"{a \{ b \} c \}}";
        assert_eq!(find_matching_brace(src, 0), Some(src.len() - 1));
        assert_eq!(find_matching_brace(r"{x\\}", 0), Some(4));
    }

    #[test]
    fn test_matching_brace_flat() {
        assert_eq!(find_matching_brace("{abc}", 0), Some(4));
    }

    #[test]
    fn test_matching_brace_nested() {
        let src = r"\resumeItem{a \textbf{b{c}} d}";
        let open = src.find('{').unwrap();
        let close = find_matching_brace(src, open).unwrap();
        assert_eq!(&src[open + 1..close], r"a \textbf{b{c}} d");
    }

    #[test]
    fn test_matching_brace_unterminated() {
        assert_eq!(find_matching_brace("{a{b}", 0), None);
    }

    #[test]
    fn test_matching_brace_not_on_open() {
        assert_eq!(find_matching_brace("abc}", 0), None);
        assert_eq!(find_matching_brace("", 0), None);
    }

    #[test]
    fn test_capture_args_skips_whitespace() {
        let src = "\\resumeSubheading\n  {MIT}{2020 -- 2024}\n  {B.S.}{}";
        let (args, end) = capture_args(src, "\\resumeSubheading".len(), 4).unwrap();
        assert_eq!(args, vec!["MIT", "2020 -- 2024", "B.S.", ""]);
        assert_eq!(end, src.len());
    }

    #[test]
    fn test_capture_args_missing_argument() {
        assert!(capture_args("{a}{b} text", 0, 3).is_none());
    }

    #[test]
    fn test_resume_items_nested() {
        let src = r"\resumeItem{one} \resumeItem{two \textbf{b{c}}} \resumeItem{broken";
        assert_eq!(resume_items(src), vec!["one", r"two \textbf{b{c}}"]);
    }

    #[test]
    fn test_resume_items_ignores_longer_commands() {
        let src = r"\resumeItemListStart \resumeItem{kept} \resumeItemListEnd";
        assert_eq!(resume_items(src), vec!["kept"]);
    }

    #[test]
    fn test_split_top_level_respects_braces() {
        let parts = split_top_level(r"\textbf{Doe, J. and Roe, R.}, Title, Venue, 2021", ',');
        assert_eq!(
            parts,
            vec![r"\textbf{Doe, J. and Roe, R.}", " Title", " Venue", " 2021"]
        );
    }

    #[test]
    fn test_command_positions_whole_word() {
        let src = r"\resumeSubheading{a} \resumeSubHeadingListEnd \resumeSubheading{b}";
        assert_eq!(command_positions(src, r"\resumeSubheading").len(), 2);
    }
}
