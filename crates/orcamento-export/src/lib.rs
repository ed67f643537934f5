//! orcamento-export
//!
//! Quote → PDF rendering. Two strategies share one entry point:
//! an HTML template converted to PDF, and a PDF laid out directly.

pub mod error;
pub mod layout;
pub mod pdf;
pub mod render;
pub mod renderer;
pub mod styles;
