use serde::{Deserialize, Serialize};

use crate::latex::template::Section;
use crate::latex::Extraction;
use crate::models::resume::ResumeDocument;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageReport {
    pub name_found: bool,
    /// Section keys that produced content, with entry counts for list sections
    /// (`"experience(2)"`). `"contact"` is listed when a name was read.
    pub sections_found: Vec<String>,
    pub sections_empty: Vec<String>,
    /// `found / (found + empty)`, in `[0, 1]`.
    pub confidence: f64,
    pub warnings: Vec<String>,
}

fn entry_count(doc: &ResumeDocument, section: Section) -> usize {
    match section {
        Section::Summary => usize::from(doc.summary.as_ref().is_some_and(|s| !s.is_blank())),
        Section::Education => doc.education.len(),
        Section::Skills => doc.skills.len(),
        Section::Experience => doc.experience.len(),
        Section::Projects => doc.projects.len(),
        Section::Research => doc.research.len(),
        Section::Publications => doc.publications.len(),
        Section::Achievements => doc.achievements.len(),
    }
}

pub fn compute_coverage_report(extraction: &Extraction) -> CoverageReport {
    let mut sections_found = Vec::new();
    let mut sections_empty = Vec::new();

    if extraction.name_found {
        sections_found.push("contact".to_string());
    } else {
        sections_empty.push("contact".to_string());
    }

    for section in Section::ALL {
        match entry_count(&extraction.document, section) {
            0 => sections_empty.push(section.key().to_string()),
            _ if section == Section::Summary => sections_found.push(section.key().to_string()),
            n => sections_found.push(format!("{}({n})", section.key())),
        }
    }

    let total = sections_found.len() + sections_empty.len();
    let confidence = if total > 0 {
        sections_found.len() as f64 / total as f64
    } else {
        0.0
    };

    CoverageReport {
        name_found: extraction.name_found,
        sections_found,
        sections_empty,
        confidence,
        warnings: extraction.warnings.clone(),
    }
}
