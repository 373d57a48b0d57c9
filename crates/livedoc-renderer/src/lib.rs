//! Trait-based markdown renderer with HTML and LaTeX backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] driven by the
//! [`RenderBackend`] trait, and [`MarkdownDocument`], a
//! [`DocumentRenderer`] that combines a markdown body with an optional
//! title and author.
//!
//! # Architecture
//!
//! The renderer owns event traversal (headings, tables, images, code
//! blocks) and delegates every piece of output to a backend:
//! - [`HtmlBackend`]: semantic HTML5 for live preview
//! - [`LatexBackend`]: a LaTeX body fragment
//!
//! # Example
//!
//! ```
//! use pulldown_cmark::Parser;
//! use livedoc_renderer::{LatexBackend, MarkdownRenderer};
//!
//! let latex = MarkdownRenderer::<LatexBackend>::new().render(Parser::new("**Bold** text"));
//! assert_eq!(latex, "\\textbf{Bold} text\n\n");
//! ```

mod backend;
mod document;
mod error;
mod html;
mod latex;
mod renderer;
mod state;
mod util;

pub use backend::{AlertKind, InlineKind, RenderBackend};
pub use document::{DocumentRenderer, MarkdownDocument, RenderFormat, RenderOptions};
pub use error::RenderError;
pub use html::{HtmlBackend, escape_html};
pub use latex::{LatexBackend, escape_latex};
pub use renderer::MarkdownRenderer;
pub use state::slugify;
