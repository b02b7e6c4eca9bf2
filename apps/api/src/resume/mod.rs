//! Resume API: LaTeX upload parsing, LaTeX generation and `.tex` download.

pub mod coverage;
pub mod handlers;
