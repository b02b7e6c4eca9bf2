//! LaTeX résumé conversion: template vocabulary, extraction and generation.
//! Everything in here is pure and synchronous; the HTTP layer calls it inline.

pub mod braces;
pub mod clean;
pub mod escape;
pub mod extract;
pub mod generate;
pub mod template;

pub use extract::{parse_latex_resume, Extraction, Extractor};
pub use generate::generate_full_latex;
