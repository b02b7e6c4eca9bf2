//! Extractor — parses a résumé written against the template into a
//! [`ResumeDocument`].
//!
//! Each section extractor is independent: if its macros are missing it
//! contributes an empty value and the others carry on. The only
//! document-fatal condition is a `\section{` whose heading never closes,
//! because every later section boundary depends on it. That case is logged
//! and the sections read so far are returned.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::latex::braces::{
    capture_args, command_positions, find_matching_brace, resume_items, split_top_level,
};
use crate::latex::clean::clean;
use crate::latex::template::{
    Section, END_DOCUMENT, RESUME_PROJECT_HEADING, RESUME_SUBHEADING, SECTION,
    SUBHEADING_LIST_END,
};
use crate::models::resume::{
    AchievementEntry, Contact, EducationEntry, ExperienceEntry, Markup, ProjectEntry,
    PublicationEntry, ResearchEntry, ResumeDocument, SkillRow,
};

/// Name used when the document has no `\Huge \scshape` title.
pub const DEFAULT_FALLBACK_NAME: &str = "Resume Owner";

const BEGIN_DOCUMENT: &str = r"\begin{document}";
const HUGE: &str = r"\Huge";
const TEXTBF: &str = r"\textbf";
const END_ENV: &str = r"\end{";

/// One run of header text: plain characters, escaped specials, or the
/// `\text...{}` symbols the escaper produces. Stops at `~`, `$`, any other
/// command, or a line end.
const HEADER_TEXT: &str =
    r"(?:[^~\\\n{}$]|\\[&%$#_{}]|\\text(?:backslash|asciitilde|asciicircum)\{\})+";

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"\\href\{mailto:([^}]+)\}").expect("email pattern");
    static ref PHONE: Regex = Regex::new(&format!(r"\\faPhone\\?[ \t]*({HEADER_TEXT})"))
        .expect("phone pattern");
    static ref LINKEDIN: Regex =
        Regex::new(r"linkedin\.com/in/([^}~\s/\\]+)").expect("linkedin pattern");
    static ref GITHUB: Regex = Regex::new(r"github\.com/([^}~\s/\\]+)").expect("github pattern");
    static ref WEBSITE: Regex =
        Regex::new(r"\\faGlobe\\?\s*\\href\{([^}]+)\}").expect("website pattern");
    static ref LOCATION: Regex =
        Regex::new(&format!(r"\\faMapMarker\*?\\?[ \t]*({HEADER_TEXT})"))
            .expect("location pattern");
    static ref HREF_TARGET: Regex = Regex::new(r"\\href\{([^}]+)\}").expect("href pattern");
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unterminated \\section heading at byte {offset}")]
    UnterminatedHeading { offset: usize },
}

/// Result of one extraction: the document plus what the caller needs to
/// judge how much of it is real.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub document: ResumeDocument,
    /// False when the contact name is the fallback rather than read from the source.
    pub name_found: bool,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Extractor {
    fallback_name: String,
}

impl Default for Extractor {
    fn default() -> Self {
        Extractor::new(DEFAULT_FALLBACK_NAME)
    }
}

impl Extractor {
    pub fn new(fallback_name: impl Into<String>) -> Self {
        Extractor {
            fallback_name: fallback_name.into(),
        }
    }

    pub fn extract(&self, latex: &str) -> Extraction {
        let source = strip_comments(latex);
        let mut document = ResumeDocument::with_name(self.fallback_name.clone());
        let mut warnings = Vec::new();

        let name_found = extract_contact(&source, &mut document.contact);
        if !name_found {
            warnings.push(format!(
                "no name found; using fallback '{}'",
                self.fallback_name
            ));
        }

        if let Err(e) = extract_sections(&source, &mut document) {
            warn!("LaTeX extraction stopped early: {e}");
            warnings.push(e.to_string());
        }

        debug!(
            "Extracted resume: {} education, {} skills, {} experience, {} projects, {} research, {} publications, {} achievements",
            document.education.len(),
            document.skills.len(),
            document.experience.len(),
            document.projects.len(),
            document.research.len(),
            document.publications.len(),
            document.achievements.len(),
        );

        Extraction {
            document,
            name_found,
            warnings,
        }
    }
}

/// Parses a LaTeX résumé using the default fallback name. Never fails.
pub fn parse_latex_resume(latex: &str) -> ResumeDocument {
    Extractor::default().extract(latex).document
}

// ────────────────────────────────────────────────────────────────────────────
// Section index
// ────────────────────────────────────────────────────────────────────────────

struct SectionSpan<'a> {
    heading: &'a str,
    body: &'a str,
}

/// Splits the document into `\section{...}` spans. A body runs to the next
/// section, to `\end{document}`, or to the end of input.
///
/// An unterminated heading ends the index: the spans before it are kept
/// (the last one running up to the broken heading) and the error is returned
/// alongside them.
fn index_sections(src: &str) -> (Vec<SectionSpan<'_>>, Option<ExtractError>) {
    let mut doc_end = src.rfind(END_DOCUMENT).unwrap_or(src.len());
    let mut heads: Vec<(usize, &str, usize)> = Vec::new();
    let mut stopped = None;

    for at in command_positions(src, SECTION) {
        let mut cursor = at + SECTION.len();
        if src[cursor..].starts_with('*') {
            cursor += 1;
        }
        let open = cursor + (src[cursor..].len() - src[cursor..].trim_start().len());
        if !src[open..].starts_with('{') {
            // `\titleformat{\section}` and the like.
            continue;
        }
        let Some(close) = find_matching_brace(src, open) else {
            doc_end = doc_end.min(at);
            stopped = Some(ExtractError::UnterminatedHeading { offset: at });
            break;
        };
        heads.push((at, src[open + 1..close].trim(), close + 1));
    }

    let spans: Vec<SectionSpan<'_>> = heads
        .iter()
        .enumerate()
        .map(|(i, &(_, heading, body_start))| {
            let next = heads.get(i + 1).map_or(src.len(), |h| h.0);
            let end = next.min(doc_end).max(body_start);
            SectionSpan {
                heading,
                body: &src[body_start..end],
            }
        })
        .collect();
    (spans, stopped)
}

fn section_body<'a>(spans: &[SectionSpan<'a>], section: Section) -> Option<&'a str> {
    spans
        .iter()
        .find(|s| s.heading == section.heading())
        .map(|s| s.body)
}

fn extract_sections(src: &str, doc: &mut ResumeDocument) -> Result<(), ExtractError> {
    let (spans, stopped) = index_sections(src);

    if let Some(body) = section_body(&spans, Section::Summary) {
        doc.summary = extract_summary(body);
    }
    if let Some(body) = section_body(&spans, Section::Education) {
        doc.education = extract_education(body);
    }
    if let Some(body) = section_body(&spans, Section::Skills) {
        doc.skills = extract_skills(body);
    }
    if let Some(body) = section_body(&spans, Section::Experience) {
        doc.experience = extract_experience(body);
    }
    if let Some(body) = section_body(&spans, Section::Projects) {
        doc.projects = extract_projects(body);
    }
    if let Some(body) = section_body(&spans, Section::Research) {
        doc.research = extract_research(body);
    }
    if let Some(body) = section_body(&spans, Section::Publications) {
        doc.publications = extract_publications(body);
    }
    if let Some(body) = section_body(&spans, Section::Achievements) {
        doc.achievements = extract_achievements(body);
    }
    stopped.map_or(Ok(()), Err)
}

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

/// Fills `contact` from the document body. Returns whether a name was found.
fn extract_contact(src: &str, contact: &mut Contact) -> bool {
    // The preamble credits the template's GitHub repo; only the body counts.
    let body = src
        .find(BEGIN_DOCUMENT)
        .map_or(src, |p| &src[p + BEGIN_DOCUMENT.len()..]);

    contact.email = first_capture(&EMAIL, body).map(|e| unescape_url(&e));
    contact.phone = first_capture(&PHONE, body)
        .map(|p| clean(&p))
        .filter(|p| !p.is_empty());
    contact.linkedin =
        first_capture(&LINKEDIN, body).map(|h| format!("https://linkedin.com/in/{h}"));
    contact.github = first_capture(&GITHUB, body).map(|h| format!("https://github.com/{h}"));
    contact.website = first_capture(&WEBSITE, body).map(|w| unescape_url(&w));
    contact.location = first_capture(&LOCATION, body)
        .map(|l| clean(&l))
        .filter(|l| !l.is_empty());

    match extract_name(body) {
        Some(name) => {
            contact.name = name;
            true
        }
        None => false,
    }
}

/// The text of the `{\Huge \scshape ...}` group, cleaned. Without an
/// enclosing group the name runs to the first `\\` or line end.
fn extract_name(body: &str) -> Option<String> {
    let at = command_positions(body, HUGE).into_iter().next()?;
    let before = body[..at].trim_end();
    let group = before
        .strip_suffix('{')
        .and_then(|open| find_matching_brace(body, open.len()))
        .map(|close| &body[before.len()..close]);
    let raw = group.unwrap_or_else(|| {
        let rest = &body[at..];
        let end = [rest.find(r"\\"), rest.find('\n')]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(rest.len());
        &rest[..end]
    });
    let name = clean(raw);
    (!name.is_empty()).then_some(name)
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

fn unescape_url(url: &str) -> String {
    url.replace(r"\%", "%").replace(r"\#", "#")
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn extract_summary(body: &str) -> Option<Markup> {
    let at = command_positions(body, r"\small").into_iter().next()?;
    let (args, _) = capture_args(body, at + r"\small".len(), 1)?;
    let text = clean(args[0]);
    (!text.is_empty()).then(|| Markup::Plain(text))
}

/// One `\resumeSubheading{..}{..}{..}{..}` block and the bullet bodies that follow it.
struct SubheadingBlock<'a> {
    args: Vec<&'a str>,
    bullets: Vec<&'a str>,
}

/// Shared production for Education, Experience and Research.
fn subheading_blocks(body: &str) -> Vec<SubheadingBlock<'_>> {
    let starts = command_positions(body, RESUME_SUBHEADING);
    let mut blocks = Vec::with_capacity(starts.len());
    for (i, &at) in starts.iter().enumerate() {
        let Some((args, end)) = capture_args(body, at + RESUME_SUBHEADING.len(), 4) else {
            continue;
        };
        let next = starts.get(i + 1).copied().unwrap_or(body.len()).max(end);
        let limit = body[end..next]
            .find(SUBHEADING_LIST_END)
            .map_or(next, |p| end + p);
        blocks.push(SubheadingBlock {
            args,
            bullets: resume_items(&body[end..limit]),
        });
    }
    blocks
}

fn clean_bullets(bullets: &[&str]) -> Vec<Markup> {
    bullets
        .iter()
        .map(|b| clean(b))
        .filter(|b| !b.is_empty())
        .map(Markup::Plain)
        .collect()
}

fn extract_education(body: &str) -> Vec<EducationEntry> {
    subheading_blocks(body)
        .into_iter()
        .map(|b| EducationEntry {
            institution: clean(b.args[0]),
            dates: clean(b.args[1]),
            degree: clean(b.args[2]),
            details: clean(b.args[3]),
        })
        .collect()
}

fn extract_experience(body: &str) -> Vec<ExperienceEntry> {
    subheading_blocks(body)
        .into_iter()
        .map(|b| ExperienceEntry {
            title: clean(b.args[0]),
            dates: clean(b.args[1]),
            company: clean(b.args[2]),
            location: clean(b.args[3]),
            bullets: clean_bullets(&b.bullets),
        })
        .collect()
}

fn extract_research(body: &str) -> Vec<ResearchEntry> {
    subheading_blocks(body)
        .into_iter()
        .map(|b| ResearchEntry {
            title: clean(b.args[0]),
            dates: clean(b.args[1]),
            organization: clean(b.args[2]),
            location: clean(b.args[3]),
            bullets: clean_bullets(&b.bullets),
        })
        .collect()
}

fn extract_skills(body: &str) -> Vec<SkillRow> {
    let mut rows = Vec::new();
    let mut cursor = 0;
    for at in command_positions(body, TEXTBF) {
        if at < cursor {
            continue;
        }
        let Some(row) = skill_row(body, at + TEXTBF.len()) else {
            continue;
        };
        cursor = row.end;
        let category = clean(row.category)
            .trim_end_matches(':')
            .trim_end()
            .to_string();
        if !category.is_empty() {
            rows.push(SkillRow {
                category,
                items: Markup::Plain(clean(row.items)),
            });
        }
    }
    rows
}

struct RawSkillRow<'a> {
    category: &'a str,
    items: &'a str,
    end: usize,
}

/// `\textbf{Category:} & items \\` or `\textbf{Category}:} & items \\`,
/// read from just after `\textbf`. The items run to the next top-level `\\`,
/// so they may span lines.
fn skill_row(body: &str, pos: usize) -> Option<RawSkillRow<'_>> {
    let (args, after) = capture_args(body, pos, 1)?;
    let mut rest = body[after..].trim_start();
    for marker in [':', '}'] {
        rest = rest.strip_prefix(marker).unwrap_or(rest).trim_start();
    }
    let items_start = body.len() - rest.strip_prefix('&')?.len();
    let items_end = row_end(body, items_start);
    Some(RawSkillRow {
        category: args[0],
        items: &body[items_start..items_end],
        end: items_end,
    })
}

/// Offset of the first `\\` or `\end{` at brace depth zero, or the end of `src`.
fn row_end(src: &str, from: usize) -> usize {
    let bytes = src.as_bytes();
    let mut depth = 0i32;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if depth <= 0
                && (bytes.get(i + 1) == Some(&b'\\') || src[i..].starts_with(END_ENV)) =>
            {
                return i;
            }
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    src.len()
}

fn extract_projects(body: &str) -> Vec<ProjectEntry> {
    let starts = command_positions(body, RESUME_PROJECT_HEADING);
    let mut projects = Vec::with_capacity(starts.len());
    for (i, &at) in starts.iter().enumerate() {
        let Some((args, end)) = capture_args(body, at + RESUME_PROJECT_HEADING.len(), 2) else {
            continue;
        };
        let title = args[0];
        let url = HREF_TARGET
            .captures(title)
            .and_then(|c| c.get(1))
            .map(|m| unescape_url(m.as_str().trim()))
            .filter(|u| !u.is_empty());

        // `{\textbf{Name} - \href{url}{\textbf{Link}}}`: the name is whatever precedes the link.
        let name = match title.find(r"\href") {
            Some(p) => {
                let before = title[..p].trim_end().trim_end_matches('-');
                let name = clean(before);
                if name.is_empty() {
                    clean(title)
                } else {
                    name
                }
            }
            None => clean(title),
        };

        let next = starts.get(i + 1).copied().unwrap_or(body.len()).max(end);
        projects.push(ProjectEntry {
            name,
            url,
            year: clean(args[1]),
            bullets: clean_bullets(&resume_items(&body[end..next])),
        });
    }
    projects
}

fn extract_publications(body: &str) -> Vec<PublicationEntry> {
    resume_items(body)
        .into_iter()
        .filter_map(|item| {
            let parts = split_top_level(item, ',');
            if parts.len() < 3 {
                return None;
            }
            let rest = parts[2..].join(",");
            let (venue, note) = split_trailing_note(rest.trim().trim_end_matches('.'));
            Some(PublicationEntry {
                authors: clean(parts[0]),
                title: clean(parts[1]),
                venue: clean(venue),
                note: note.map(clean).filter(|n| !n.is_empty()),
            })
        })
        .collect()
}

/// Splits `venue (note)` where the parenthesised part sits outside any braces.
fn split_trailing_note(rest: &str) -> (&str, Option<&str>) {
    let trimmed = rest.trim_end();
    if !trimmed.ends_with(')') {
        return (rest, None);
    }
    let mut parens = 0i32;
    let mut braces = 0i32;
    for (i, c) in trimmed.char_indices().rev() {
        match c {
            '}' => braces += 1,
            '{' => braces -= 1,
            ')' if braces == 0 => parens += 1,
            '(' if braces == 0 => {
                parens -= 1;
                if parens == 0 {
                    let venue = trimmed[..i].trim_end();
                    if venue.is_empty() {
                        return (rest, None);
                    }
                    return (venue, Some(&trimmed[i + 1..trimmed.len() - 1]));
                }
            }
            _ => {}
        }
    }
    (rest, None)
}

fn extract_achievements(body: &str) -> Vec<AchievementEntry> {
    resume_items(body)
        .into_iter()
        .filter_map(|item| {
            let item = item.trim();
            // `\textbf{title}: description`; a bold run not followed by `:` is just part of the title.
            if let Some(after) = item.strip_prefix(r"\textbf") {
                if let Some((args, end)) = capture_args(after, 0, 1) {
                    let rest = after[end..].trim_start();
                    if rest.is_empty() || rest.starts_with(':') {
                        let description = clean(rest.trim_start_matches(':'));
                        return Some(AchievementEntry {
                            title: clean(args[0]),
                            description: (!description.is_empty()).then_some(description),
                        });
                    }
                }
            }
            let title = clean(item);
            (!title.is_empty()).then(|| AchievementEntry {
                title,
                description: None,
            })
        })
        .collect()
}

/// Drops `%` comments, leaving escaped `\%` alone.
fn strip_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for line in src.split_inclusive('\n') {
        match comment_start(line) {
            Some(p) => {
                out.push_str(&line[..p]);
                if line.ends_with('\n') {
                    out.push('\n');
                }
            }
            None => out.push_str(line),
        }
    }
    out
}

fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut backslashes = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b'%' if backslashes % 2 == 0 => return Some(i),
            _ => backslashes = 0,
        }
    }
    None
}
