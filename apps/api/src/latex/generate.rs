//! Generator — renders a [`ResumeDocument`] into the full LaTeX template.
//!
//! Deterministic and total: the same document always yields byte-identical
//! output, and any well-typed document renders. A section with no content
//! renders as nothing at all, not as a heading over an empty body.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::latex::escape::{escape_latex, escape_url};
use crate::latex::template::{Section, CLOSING, PREAMBLE};
use crate::models::resume::{
    AchievementEntry, Contact, EducationEntry, ExperienceEntry, Markup, ProjectEntry,
    PublicationEntry, ResearchEntry, ResumeDocument, SkillRow,
};

lazy_static! {
    static ref LINKEDIN_PREFIX: Regex =
        Regex::new(r"(?i)^(?:https?://)?(?:www\.)?linkedin\.com/in/").expect("linkedin prefix");
    static ref GITHUB_PREFIX: Regex =
        Regex::new(r"(?i)^(?:https?://)?(?:www\.)?github\.com/").expect("github prefix");
    static ref SCHEME: Regex = Regex::new(r"(?i)^https?://").expect("scheme");
}

/// Renders the complete document: preamble, header, every non-empty section, closing.
pub fn generate_full_latex(doc: &ResumeDocument) -> String {
    let parts = [
        PREAMBLE.to_string(),
        generate_header(&doc.contact),
        generate_summary(doc.summary.as_ref()),
        generate_education(&doc.education),
        generate_skills(&doc.skills),
        generate_experience(&doc.experience),
        generate_projects(&doc.projects),
        generate_research(&doc.research),
        generate_publications(&doc.publications),
        generate_achievements(&doc.achievements),
        CLOSING.to_string(),
    ];

    parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain text is escaped; caller-formatted LaTeX passes through untouched.
fn render(markup: &Markup) -> Cow<'_, str> {
    match markup {
        Markup::Plain(text) => Cow::Owned(escape_latex(text)),
        Markup::Latex { latex } => Cow::Borrowed(latex),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Adds `https://` when the caller gave a bare host or path.
fn absolute_url(url: &str) -> String {
    if SCHEME.is_match(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn profile_link(value: &str, prefix: &Regex, canonical: &str) -> (String, String) {
    let handle = prefix.replace(value, "");
    let handle = handle.trim_end_matches('/');
    let href = if prefix.is_match(value) {
        absolute_url(value)
    } else {
        format!("https://{canonical}{handle}")
    };
    (href, format!("{canonical}{handle}"))
}

pub fn generate_header(contact: &Contact) -> String {
    let mut lines = vec![
        r"\begin{center}".to_string(),
        format!(
            r"    {{\Huge \scshape {}}} \\ \vspace{{2pt}}",
            escape_latex(contact.name.trim())
        ),
        r"    \small".to_string(),
    ];

    let mut parts: Vec<String> = Vec::new();
    if let Some(email) = present(&contact.email) {
        parts.push(format!(
            r"\faEnvelope\ \href{{mailto:{}}}{{{}}}",
            escape_url(email),
            escape_latex(email)
        ));
    }
    if let Some(phone) = present(&contact.phone) {
        parts.push(format!(r"\faPhone\ {}", escape_latex(phone)));
    }
    if let Some(linkedin) = present(&contact.linkedin) {
        let (href, label) = profile_link(linkedin, &LINKEDIN_PREFIX, "linkedin.com/in/");
        parts.push(format!(
            r"\faLinkedin\ \href{{{}}}{{{}}}",
            escape_url(&href),
            escape_latex(&label)
        ));
    }
    if let Some(github) = present(&contact.github) {
        let (href, label) = profile_link(github, &GITHUB_PREFIX, "github.com/");
        parts.push(format!(
            r"\faGithub\ \href{{{}}}{{{}}}",
            escape_url(&href),
            escape_latex(&label)
        ));
    }
    if let Some(website) = present(&contact.website) {
        let label = SCHEME.replace(website, "");
        parts.push(format!(
            r"\faGlobe\ \href{{{}}}{{{}}}",
            escape_url(&absolute_url(website)),
            escape_latex(label.trim_end_matches('/'))
        ));
    }
    if let Some(location) = present(&contact.location) {
        parts.push(format!(r"\faMapMarker*\ {}", escape_latex(location)));
    }

    if !parts.is_empty() {
        lines.push(format!("    {}", parts.join(" ~\n    ")));
    }
    lines.push(r"\end{center}".to_string());
    lines.join("\n")
}

fn section_open(section: Section) -> String {
    format!("\n{}\n{}\n", section.banner(), section.section_command())
}

pub fn generate_summary(summary: Option<&Markup>) -> String {
    let Some(summary) = summary.filter(|s| !s.is_blank()) else {
        return String::new();
    };
    let mut latex = section_open(Section::Summary);
    latex.push_str(&format!(
        "\\vspace{{-5pt}}\n\\small{{\n{}\n}}\n\\vspace{{-8pt}}\n",
        render(summary).trim()
    ));
    latex
}

/// `\resumeItemListStart ... \resumeItemListEnd`, or nothing when there are no
/// bullets (an empty itemize does not compile).
fn item_list(bullets: &[Markup], indent: &str) -> String {
    let bullets: Vec<_> = bullets.iter().filter(|b| !b.is_blank()).collect();
    if bullets.is_empty() {
        return String::new();
    }
    let mut latex = format!("{indent}\\resumeItemListStart\n");
    for bullet in bullets {
        latex.push_str(&format!("{indent}  \\resumeItem{{{}}}\n", render(bullet).trim()));
    }
    latex.push_str(&format!("{indent}\\resumeItemListEnd\n"));
    latex
}

fn subheading(args: [&str; 4], indent: &str) -> String {
    format!(
        "{indent}\\resumeSubheading\n{indent}  {{{}}}{{{}}}\n{indent}  {{{}}}{{{}}}\n",
        escape_latex(args[0]),
        escape_latex(args[1]),
        escape_latex(args[2]),
        escape_latex(args[3]),
    )
}

pub fn generate_education(education: &[EducationEntry]) -> String {
    if education.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Education);
    latex.push_str("  \\resumeSubHeadingListStart\n");
    for edu in education {
        latex.push_str(&subheading(
            [
                edu.institution.as_str(),
                edu.dates.as_str(),
                edu.degree.as_str(),
                edu.details.as_str(),
            ],
            "    ",
        ));
    }
    latex.push_str("  \\resumeSubHeadingListEnd\n\\vspace{-10pt}\n");
    latex
}

pub fn generate_skills(skills: &[SkillRow]) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Skills);
    latex.push_str("\n\\begin{tabularx}{\\textwidth}{@{} l X @{}}\n");
    for skill in skills {
        latex.push_str(&format!(
            "\\textbf{{{}:}} & {} \\\\\n\n",
            escape_latex(skill.category.trim_end_matches(':')),
            render(&skill.items).trim()
        ));
    }
    latex.push_str("\\end{tabularx}\n\\vspace{-5pt}\n");
    latex
}

pub fn generate_experience(experience: &[ExperienceEntry]) -> String {
    if experience.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Experience);
    latex.push_str("  \\resumeSubHeadingListStart\n");
    for exp in experience {
        latex.push_str(&subheading(
            [
                exp.title.as_str(),
                exp.dates.as_str(),
                exp.company.as_str(),
                exp.location.as_str(),
            ],
            "    ",
        ));
        latex.push_str(&item_list(&exp.bullets, "      "));
    }
    latex.push_str("  \\resumeSubHeadingListEnd\n\\vspace{-16pt}\n");
    latex
}

pub fn generate_projects(projects: &[ProjectEntry]) -> String {
    if projects.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Projects);
    latex.push_str("    \\vspace{-5pt}\n    \\resumeSubHeadingListStart\n");
    for proj in projects {
        let name = escape_latex(&proj.name);
        let title = match present(&proj.url) {
            Some(url) => format!(
                "{{\\textbf{{{name}}} - \\href{{{}}}{{\\textbf{{Link}}}}}}",
                escape_url(url)
            ),
            None => format!("{{\\textbf{{{name}}}}}"),
        };
        latex.push_str(&format!(
            "\n      \\resumeProjectHeading\n          {{{title}}}{{{}}}\n",
            escape_latex(&proj.year)
        ));
        latex.push_str(&item_list(&proj.bullets, "          "));
        latex.push_str("          \\vspace{-12pt}\n");
    }
    latex.push_str("\n    \\resumeSubHeadingListEnd\n\\vspace{-5pt}\n");
    latex
}

pub fn generate_research(research: &[ResearchEntry]) -> String {
    if research.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Research);
    latex.push_str("\\resumeSubHeadingListStart\n");
    for res in research {
        latex.push_str(&subheading(
            [
                res.title.as_str(),
                res.dates.as_str(),
                res.organization.as_str(),
                res.location.as_str(),
            ],
            "  ",
        ));
        latex.push_str(&item_list(&res.bullets, "    "));
    }
    latex.push_str("\\resumeSubHeadingListEnd\n\\vspace{-16pt}\n");
    latex
}

pub fn generate_publications(publications: &[PublicationEntry]) -> String {
    if publications.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Publications);
    latex.push_str("\\vspace{-2pt}\n\\resumeItemListStart\n");
    for publication in publications {
        let note = present(&publication.note)
            .map(|n| format!(" ({})", escape_latex(n)))
            .unwrap_or_default();
        latex.push_str(&format!(
            "  \\resumeItem{{\n    \\textbf{{{}}}, \n    \\textit{{{}}}, \n    \\textbf{{{}}}{note}.\n  }}\n",
            escape_latex(&publication.authors),
            escape_latex(&publication.title),
            escape_latex(&publication.venue),
        ));
    }
    latex.push_str("\\resumeItemListEnd\n\\vspace{-10pt}\n");
    latex
}

pub fn generate_achievements(achievements: &[AchievementEntry]) -> String {
    if achievements.is_empty() {
        return String::new();
    }
    let mut latex = section_open(Section::Achievements);
    latex.push_str("\\resumeItemListStart\n");
    for achievement in achievements {
        match present(&achievement.description) {
            Some(description) => latex.push_str(&format!(
                "  \\resumeItem{{\\textbf{{{}}}: {}}}\n",
                escape_latex(&achievement.title),
                escape_latex(description)
            )),
            None => latex.push_str(&format!(
                "  \\resumeItem{{{}}}\n",
                escape_latex(&achievement.title)
            )),
        }
    }
    latex.push_str("\\resumeItemListEnd\n");
    latex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::extract::parse_latex_resume;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn full_document() -> ResumeDocument {
        ResumeDocument {
            contact: Contact {
                name: "Jane Doe".into(),
                email: Some("jane@example.com".into()),
                phone: Some("+1 555-010-9999".into()),
                linkedin: Some("https://www.linkedin.com/in/janedoe/".into()),
                github: Some("jdoe".into()),
                website: Some("https://jane.dev".into()),
                location: Some("Berlin, Germany".into()),
            },
            summary: Some("Engineer who cut costs by 40% & shipped.".into()),
            education: vec![EducationEntry {
                institution: "MIT".into(),
                dates: "2016-2020".into(),
                degree: "B.S. Computer Science".into(),
                details: "".into(),
            }],
            skills: vec![
                SkillRow {
                    category: "Languages".into(),
                    items: "Rust, Go, C#".into(),
                },
                SkillRow {
                    category: "Infra".into(),
                    items: "AWS, Terraform".into(),
                },
            ],
            experience: vec![
                ExperienceEntry {
                    title: "Senior Engineer".into(),
                    dates: "2021-Present".into(),
                    company: "Acme & Sons".into(),
                    location: "Remote".into(),
                    bullets: vec![
                        "Reduced p99 latency by 40% with a lock-free queue".into(),
                        "Owned the $2M billing_service migration".into(),
                    ],
                },
                ExperienceEntry {
                    title: "Intern".into(),
                    dates: "2019".into(),
                    company: "Initech".into(),
                    location: "Austin, TX".into(),
                    bullets: vec![],
                },
            ],
            projects: vec![
                ProjectEntry {
                    name: "Tiny DB".into(),
                    url: Some("https://github.com/jdoe/tinydb".into()),
                    year: "2022".into(),
                    bullets: vec!["B-tree engine with a WAL".into()],
                },
                ProjectEntry {
                    name: "Notes".into(),
                    url: None,
                    year: "2019".into(),
                    bullets: vec![],
                },
            ],
            research: vec![ResearchEntry {
                title: "Learned Indexes".into(),
                dates: "2023".into(),
                organization: "IIT Delhi".into(),
                location: "Delhi".into(),
                bullets: vec!["Beat B-trees by 3x on range scans".into()],
            }],
            publications: vec![PublicationEntry {
                authors: "J. Doe, R. Roe".into(),
                title: "Fast Things, Revisited".into(),
                venue: "OSDI 2023".into(),
                note: Some("Best Paper".into()),
            }],
            achievements: vec![
                AchievementEntry {
                    title: "ICPC Finalist".into(),
                    description: Some("World Finals 2019".into()),
                },
                AchievementEntry {
                    title: "Dean's List".into(),
                    description: None,
                },
            ],
        }
    }

    #[test]
    fn test_document_frame() {
        let latex = generate_full_latex(&full_document());
        assert!(latex.starts_with("%-------------------------"));
        assert!(latex.contains(r"\documentclass[letterpaper,11pt]{article}"));
        assert!(latex.trim_end().ends_with(r"\end{document}"));
    }

    #[test]
    fn test_deterministic() {
        let doc = full_document();
        assert_eq!(generate_full_latex(&doc), generate_full_latex(&doc));
    }

    #[test]
    fn test_empty_skills_emit_no_heading() {
        let mut doc = full_document();
        doc.skills.clear();
        let latex = generate_full_latex(&doc);
        assert!(!latex.contains("Core Skills"));
        assert!(latex.contains(r"\section{Experience}"));
    }

    #[test]
    fn test_name_only_document_has_no_sections() {
        let latex = generate_full_latex(&ResumeDocument::with_name("Solo"));
        assert!(!latex.contains(r"\section{"));
        assert!(latex.contains(r"{\Huge \scshape Solo}"));
    }

    #[test]
    fn test_blank_summary_omitted() {
        assert_eq!(generate_summary(Some(&Markup::from("   "))), "");
        assert_eq!(generate_summary(None), "");
    }

    #[test]
    fn test_header_links() {
        let header = generate_header(&full_document().contact);
        assert!(header.contains(r"\href{mailto:jane@example.com}{jane@example.com}"));
        assert!(header.contains(
            r"\href{https://www.linkedin.com/in/janedoe/}{linkedin.com/in/janedoe}"
        ));
        assert!(header.contains(r"\href{https://github.com/jdoe}{github.com/jdoe}"));
        assert!(header.contains(r"\href{https://jane.dev}{jane.dev}"));
        assert!(header.contains(r"\faMapMarker*\ Berlin, Germany"));
    }

    #[test]
    fn test_header_omits_missing_fields() {
        let header = generate_header(&Contact {
            name: "A".into(),
            email: Some("".into()),
            ..Contact::default()
        });
        assert!(!header.contains(r"\faEnvelope"));
        assert!(!header.contains(r"\faPhone"));
        assert!(!header.contains(r"\href"));
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let latex = generate_full_latex(&full_document());
        assert!(latex.contains(r"Acme \& Sons"));
        assert!(latex.contains(r"\resumeItem{Owned the \$2M billing\_service migration}"));
        assert!(latex.contains(r"cut costs by 40\% \& shipped."));
    }

    #[test]
    fn test_latex_fragment_passes_through() {
        let mut doc = full_document();
        doc.experience[0].bullets = vec![Markup::latex(r"Built \textbf{Kafka} pipelines")];
        let latex = generate_full_latex(&doc);
        assert!(latex.contains(r"\resumeItem{Built \textbf{Kafka} pipelines}"));
    }

    #[test]
    fn test_entry_without_bullets_has_no_empty_list() {
        let latex = generate_experience(&full_document().experience[1..]);
        assert!(!latex.contains(r"\resumeItemListStart"));
    }

    #[test]
    fn test_round_trip() {
        let doc = full_document();
        let parsed = parse_latex_resume(&generate_full_latex(&doc));

        assert_eq!(parsed.contact.name, doc.contact.name);
        assert_eq!(parsed.contact.email, doc.contact.email);
        assert_eq!(parsed.contact.phone, doc.contact.phone);
        assert_eq!(
            parsed.contact.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(
            parsed.contact.github.as_deref(),
            Some("https://github.com/jdoe")
        );
        assert_eq!(parsed.contact.website, doc.contact.website);
        assert_eq!(parsed.contact.location, doc.contact.location);
        assert_eq!(parsed.summary, doc.summary);
        assert_eq!(parsed.education, doc.education);
        assert_eq!(parsed.skills, doc.skills);
        assert_eq!(parsed.experience, doc.experience);
        assert_eq!(parsed.projects, doc.projects);
        assert_eq!(parsed.research, doc.research);
        assert_eq!(parsed.publications, doc.publications);
        assert_eq!(parsed.achievements, doc.achievements);
    }

    #[test]
    fn test_round_trip_normalises_double_hyphen() {
        let mut doc = full_document();
        doc.education[0].dates = "2016 -- 2020".into();
        let parsed = parse_latex_resume(&generate_full_latex(&doc));
        assert_eq!(parsed.education[0].dates, "2016 \u{2013} 2020");
    }

    #[test]
    fn test_round_trip_with_unbalanced_literal_brace() {
        let mut doc = full_document();
        doc.experience[0].bullets = vec!["Fixed the {unclosed brace bug".into()];
        let parsed = parse_latex_resume(&generate_full_latex(&doc));
        assert_eq!(parsed.experience, doc.experience);
        assert_eq!(parsed.projects, doc.projects);
    }

    #[test]
    fn test_contact_round_trip_with_escaped_text() {
        let contact = Contact {
            name: "Ana~Lu O'Neil".into(),
            phone: Some("(555) 123-4567".into()),
            location: Some("R&D Park, Lot #4".into()),
            ..Contact::default()
        };
        let doc = ResumeDocument {
            contact: contact.clone(),
            ..ResumeDocument::default()
        };
        assert_eq!(parse_latex_resume(&generate_full_latex(&doc)).contact, contact);
    }

    /// What the Text Cleaner turns a plain field into: `--` as an en dash,
    /// whitespace collapsed.
    fn normalise(text: &str) -> String {
        text.replace("--", "\u{2013}")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn normalise_bullets(bullets: &[Markup]) -> Vec<Markup> {
        bullets
            .iter()
            .map(|b| normalise(b.as_str()))
            .filter(|b| !b.is_empty())
            .map(Markup::Plain)
            .collect()
    }

    const FIELD: &str = r"[A-Za-z0-9 ,.&%$#_{}~^\\\n-]{0,24}";
    const CATEGORY: &str = r"[A-Za-z0-9][A-Za-z0-9 &%$#_{}~^\\-]{0,12}";

    fn bullets() -> impl Strategy<Value = Vec<Markup>> {
        prop::collection::vec(FIELD.prop_map(Markup::Plain), 0..3)
    }

    fn education() -> impl Strategy<Value = EducationEntry> {
        (FIELD, FIELD, FIELD, FIELD).prop_map(|(institution, dates, degree, details)| {
            EducationEntry {
                institution,
                dates,
                degree,
                details,
            }
        })
    }

    fn experience() -> impl Strategy<Value = ExperienceEntry> {
        (FIELD, FIELD, FIELD, FIELD, bullets()).prop_map(
            |(title, dates, company, location, bullets)| ExperienceEntry {
                title,
                dates,
                company,
                location,
                bullets,
            },
        )
    }

    fn research() -> impl Strategy<Value = ResearchEntry> {
        (FIELD, FIELD, FIELD, FIELD, bullets()).prop_map(
            |(title, dates, organization, location, bullets)| ResearchEntry {
                title,
                dates,
                organization,
                location,
                bullets,
            },
        )
    }

    fn skill() -> impl Strategy<Value = SkillRow> {
        (CATEGORY, FIELD).prop_map(|(category, items)| SkillRow {
            category,
            items: Markup::Plain(items),
        })
    }

    #[test]
    fn proptest_structured_sections_round_trip() {
        proptest!(ProptestConfig::with_cases(128), |(
            educations in prop::collection::vec(education(), 0..3),
            experiences in prop::collection::vec(experience(), 0..3),
            researches in prop::collection::vec(research(), 0..3),
            skills in prop::collection::vec(skill(), 0..3),
        )| {
            let doc = ResumeDocument {
                contact: Contact {
                    name: "Jane Doe".into(),
                    ..Contact::default()
                },
                education: educations,
                experience: experiences,
                research: researches,
                skills,
                ..ResumeDocument::default()
            };
            let parsed = parse_latex_resume(&generate_full_latex(&doc));

            let expected_education: Vec<_> = doc
                .education
                .iter()
                .map(|e| EducationEntry {
                    institution: normalise(&e.institution),
                    dates: normalise(&e.dates),
                    degree: normalise(&e.degree),
                    details: normalise(&e.details),
                })
                .collect();
            let expected_experience: Vec<_> = doc
                .experience
                .iter()
                .map(|e| ExperienceEntry {
                    title: normalise(&e.title),
                    dates: normalise(&e.dates),
                    company: normalise(&e.company),
                    location: normalise(&e.location),
                    bullets: normalise_bullets(&e.bullets),
                })
                .collect();
            let expected_research: Vec<_> = doc
                .research
                .iter()
                .map(|r| ResearchEntry {
                    title: normalise(&r.title),
                    dates: normalise(&r.dates),
                    organization: normalise(&r.organization),
                    location: normalise(&r.location),
                    bullets: normalise_bullets(&r.bullets),
                })
                .collect();
            let expected_skills: Vec<_> = doc
                .skills
                .iter()
                .map(|s| SkillRow {
                    category: normalise(&s.category),
                    items: Markup::Plain(normalise(s.items.as_str())),
                })
                .collect();

            prop_assert_eq!(parsed.education, expected_education);
            prop_assert_eq!(parsed.experience, expected_experience);
            prop_assert_eq!(parsed.research, expected_research);
            prop_assert_eq!(parsed.skills, expected_skills);
        });
    }
}
