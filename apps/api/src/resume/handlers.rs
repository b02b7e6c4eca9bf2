//! Axum route handlers for the Resume API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::latex::generate_full_latex;
use crate::models::resume::{Contact, ResumeDocument};
use crate::resume::coverage::{compute_coverage_report, CoverageReport};
use crate::state::AppState;

const DEFAULT_FILE_NAME: &str = "Resume.tex";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub latex: String,
}

#[derive(Debug, Serialize)]
pub struct ParseResponse {
    pub resume: ResumeDocument,
    pub report: CoverageReport,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub latex: String,
    pub file_name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/parse
///
/// Extracts a structured résumé from LaTeX source. Never fails on malformed
/// LaTeX; the report says how much was recovered.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParseResponse>, AppError> {
    if request.latex.trim().is_empty() {
        return Err(AppError::Validation("latex cannot be empty".to_string()));
    }
    let limit = state.config.max_latex_bytes;
    if request.latex.len() > limit {
        return Err(AppError::PayloadTooLarge {
            size: request.latex.len(),
            limit,
        });
    }

    let extraction = state.extractor.extract(&request.latex);
    let report = compute_coverage_report(&extraction);
    info!(
        "Parsed LaTeX resume: {} found, {} empty, confidence {:.2}",
        report.sections_found.len(),
        report.sections_empty.len(),
        report.confidence
    );

    Ok(Json(ParseResponse {
        resume: extraction.document,
        report,
    }))
}

/// POST /api/v1/resume/generate
pub async fn handle_generate(
    Json(document): Json<ResumeDocument>,
) -> Result<Json<GenerateResponse>, AppError> {
    let latex = render_document(&document)?;
    Ok(Json(GenerateResponse {
        latex,
        file_name: download_file_name(&document.contact),
    }))
}

/// POST /api/v1/resume/download
///
/// Same as generate, served as a `.tex` attachment.
pub async fn handle_download(Json(document): Json<ResumeDocument>) -> Result<Response, AppError> {
    let latex = render_document(&document)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        download_file_name(&document.contact)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/x-tex; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        latex,
    )
        .into_response())
}

fn render_document(document: &ResumeDocument) -> Result<String, AppError> {
    if document.contact.name.trim().is_empty() {
        return Err(AppError::Validation(
            "contact.name cannot be empty".to_string(),
        ));
    }
    let latex = generate_full_latex(document);
    info!("Generated LaTeX resume ({} bytes)", latex.len());
    Ok(latex)
}

/// `Jane  Q. Doe` → `Jane_Q._Doe.tex`. Characters that would break a
/// quoted `Content-Disposition` value are dropped.
pub fn download_file_name(contact: &Contact) -> String {
    let stem = contact
        .name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !matches!(c, '"' | '\\' | '/') && !c.is_control())
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if stem.is_empty() {
        DEFAULT_FILE_NAME.to_string()
    } else {
        format!("{stem}.tex")
    }
}
