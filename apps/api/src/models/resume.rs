use serde::{Deserialize, Serialize};

/// A free-text field that is either plain text (escaped on output) or a LaTeX
/// fragment the caller has already formatted (emitted verbatim).
///
/// Plain values travel as bare JSON strings; fragments as `{"latex": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Markup {
    Plain(String),
    Latex { latex: String },
}

impl Markup {
    pub fn latex(fragment: impl Into<String>) -> Self {
        Markup::Latex {
            latex: fragment.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Markup::Plain(text) => text,
            Markup::Latex { latex } => latex,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.as_str().trim().is_empty()
    }
}

impl Default for Markup {
    fn default() -> Self {
        Markup::Plain(String::new())
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Markup::Plain(text)
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Markup::Plain(text.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub dates: String,
    pub degree: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub category: String,
    /// Comma-separated as the author wrote it; never split into a list.
    pub items: Markup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub dates: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub bullets: Vec<Markup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub year: String,
    #[serde(default)]
    pub bullets: Vec<Markup>,
}

/// Same shape as [`ExperienceEntry`]; rendered under its own heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchEntry {
    pub title: String,
    pub dates: String,
    pub organization: String,
    pub location: String,
    #[serde(default)]
    pub bullets: Vec<Markup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationEntry {
    pub authors: String,
    pub title: String,
    pub venue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The structured résumé both converters operate on.
///
/// Every section defaults to empty: an absent section means "empty", not "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Markup>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<SkillRow>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub research: Vec<ResearchEntry>,
    #[serde(default)]
    pub publications: Vec<PublicationEntry>,
    #[serde(default)]
    pub achievements: Vec<AchievementEntry>,
}

impl ResumeDocument {
    pub fn with_name(name: impl Into<String>) -> Self {
        ResumeDocument {
            contact: Contact {
                name: name.into(),
                ..Contact::default()
            },
            ..ResumeDocument::default()
        }
    }
}
