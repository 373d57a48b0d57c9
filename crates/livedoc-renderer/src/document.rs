//! Document-level rendering capability.
//!
//! [`DocumentRenderer`] is the seam the editor talks to: content, title and
//! author are pushed in, then a rendering is requested in one of the
//! [`RenderFormat`]s. [`MarkdownDocument`] is the markdown-backed
//! implementation.

use std::fmt::{self, Write};

use pulldown_cmark::{Options, Parser};

use crate::error::RenderError;
use crate::html::{HtmlBackend, escape_html};
use crate::latex::{LatexBackend, escape_latex};
use crate::renderer::MarkdownRenderer;

/// Representation produced by a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderFormat {
    /// Interpretable HTML markup.
    Html,
    /// LaTeX source, meant to be shown as literal text.
    Latex,
}

impl RenderFormat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Latex => "latex",
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document renderer: receives the editable fields and renders on demand.
///
/// Implementations keep their own copy of the pushed values; callers never
/// hand out references into their state.
pub trait DocumentRenderer {
    /// Error raised when rendering fails.
    type Error: std::error::Error;

    /// Replace the document body.
    fn set_content(&mut self, content: &str);

    /// Replace the document title. An empty string clears it.
    fn set_title(&mut self, title: &str);

    /// Replace the document author. An empty string clears it.
    fn set_author(&mut self, author: &str);

    /// Render the current document in the given representation.
    fn render_as(&mut self, format: RenderFormat) -> Result<String, Self::Error>;
}

/// Options controlling markdown rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number LaTeX section headings.
    pub number_sections: bool,
    /// Largest body accepted for rendering, in bytes.
    pub max_content_bytes: usize,
    /// Enable GFM tables.
    pub tables: bool,
    /// Enable `~~strikethrough~~`.
    pub strikethrough: bool,
    /// Enable `- [ ]` task lists.
    pub tasklists: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            number_sections: false,
            max_content_bytes: 64 * 1024,
            tables: true,
            strikethrough: true,
            tasklists: true,
        }
    }
}

impl RenderOptions {
    /// Parser options for these settings. GitHub alerts are always on.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_GFM;
        options.set(Options::ENABLE_TABLES, self.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, self.strikethrough);
        options.set(Options::ENABLE_TASKLISTS, self.tasklists);
        options
    }
}

/// Markdown document with optional title and author.
///
/// # Example
///
/// ```
/// use livedoc_renderer::{DocumentRenderer, MarkdownDocument, RenderFormat};
///
/// let mut doc = MarkdownDocument::default();
/// doc.set_content("Hello *world*");
/// let html = doc.render_as(RenderFormat::Html).unwrap();
/// assert_eq!(html, "<p>Hello <em>world</em></p>");
/// ```
#[derive(Debug, Default)]
pub struct MarkdownDocument {
    content: String,
    title: Option<String>,
    author: Option<String>,
    options: RenderOptions,
}

impl MarkdownDocument {
    /// Create an empty document with the given options.
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    fn check_size(&self) -> Result<(), RenderError> {
        let limit = self.options.max_content_bytes;
        if self.content.len() > limit {
            return Err(RenderError::ContentTooLarge {
                len: self.content.len(),
                limit,
            });
        }
        Ok(())
    }

    fn render_html(&self) -> Result<String, RenderError> {
        let mut out = String::new();

        if self.title.is_some() || self.author.is_some() {
            out.push_str("<header>");
            if let Some(title) = &self.title {
                let title = MarkdownRenderer::<HtmlBackend>::new().render_inline(Parser::new(title));
                write!(out, r#"<h1 class="title">{title}</h1>"#)?;
            }
            if let Some(author) = &self.author {
                write!(out, r#"<p class="author">{}</p>"#, escape_html(author))?;
            }
            out.push_str("</header>");
        }

        let parser = Parser::new_ext(&self.content, self.options.parser_options());
        out.push_str(&MarkdownRenderer::<HtmlBackend>::new().render(parser));

        Ok(out.trim().to_owned())
    }

    fn render_latex(&self) -> Result<String, RenderError> {
        let mut out = String::new();

        if let Some(title) = &self.title {
            let title = MarkdownRenderer::<LatexBackend>::new().render_inline(Parser::new(title));
            writeln!(out, "\\title{{{title}}}")?;
        }
        if let Some(author) = &self.author {
            writeln!(out, "\\author{{{}}}", escape_latex(author))?;
        }
        if self.title.is_some() || self.author.is_some() {
            writeln!(out, "\\maketitle\n")?;
        }

        let parser = Parser::new_ext(&self.content, self.options.parser_options());
        out.push_str(
            &MarkdownRenderer::<LatexBackend>::new()
                .with_numbered_sections(self.options.number_sections)
                .render(parser),
        );

        Ok(out.trim().to_owned())
    }
}

impl DocumentRenderer for MarkdownDocument {
    type Error = RenderError;

    fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
    }

    fn set_title(&mut self, title: &str) {
        self.title = non_empty(title);
    }

    fn set_author(&mut self, author: &str) {
        self.author = non_empty(author);
    }

    fn render_as(&mut self, format: RenderFormat) -> Result<String, RenderError> {
        self.check_size()?;
        match format {
            RenderFormat::Html => self.render_html(),
            RenderFormat::Latex => self.render_latex(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn document(content: &str, title: &str, author: &str) -> MarkdownDocument {
        let mut doc = MarkdownDocument::default();
        doc.set_content(content);
        doc.set_title(title);
        doc.set_author(author);
        doc
    }

    #[test]
    fn test_html_without_metadata() {
        let mut doc = document("Hello", "", "");
        assert_eq!(doc.render_as(RenderFormat::Html).unwrap(), "<p>Hello</p>");
    }

    #[test]
    fn test_html_with_header() {
        let mut doc = document("Body", "My *Notes*", "Ada <ada@example.com>");
        assert_eq!(
            doc.render_as(RenderFormat::Html).unwrap(),
            concat!(
                r#"<header><h1 class="title">My <em>Notes</em></h1>"#,
                r#"<p class="author">Ada &lt;ada@example.com&gt;</p></header>"#,
                "<p>Body</p>"
            )
        );
    }

    #[test]
    fn test_latex_with_title_and_author() {
        let mut doc = document("# Intro\n\nText", "Report", "Ada");
        assert_eq!(
            doc.render_as(RenderFormat::Latex).unwrap(),
            "\\title{Report}\n\\author{Ada}\n\\maketitle\n\n\
             \\hypertarget{intro}{%\n\\section*{Intro}\\label{intro}}\n\nText"
        );
    }

    #[test]
    fn test_latex_title_is_escaped() {
        let mut doc = document("", "100% done", "");
        assert_eq!(
            doc.render_as(RenderFormat::Latex).unwrap(),
            "\\title{100\\% done}\n\\maketitle"
        );
    }

    #[test]
    fn test_block_level_title_stays_in_header() {
        let mut doc = document("Body", "# Hello", "");
        assert_eq!(
            doc.render_as(RenderFormat::Html).unwrap(),
            r#"<header><h1 class="title">Hello</h1></header><p>Body</p>"#
        );

        let mut doc = document("", "1. Report", "Ada");
        assert_eq!(
            doc.render_as(RenderFormat::Latex).unwrap(),
            "\\title{Report}\n\\author{Ada}\n\\maketitle"
        );
    }

    #[test]
    fn test_latex_numbered_sections_option() {
        let mut doc = MarkdownDocument::new(RenderOptions {
            number_sections: true,
            ..RenderOptions::default()
        });
        doc.set_content("# Intro");
        let latex = doc.render_as(RenderFormat::Latex).unwrap();
        assert!(latex.contains("\\section{Intro}"));
    }

    #[test]
    fn test_clearing_title_removes_header() {
        let mut doc = document("Body", "Title", "");
        doc.set_title("");
        assert_eq!(doc.title(), None);
        assert_eq!(doc.render_as(RenderFormat::Html).unwrap(), "<p>Body</p>");
    }

    #[test]
    fn test_content_too_large() {
        let mut doc = MarkdownDocument::new(RenderOptions {
            max_content_bytes: 4,
            ..RenderOptions::default()
        });
        doc.set_content("12345");
        let err = doc.render_as(RenderFormat::Html).unwrap_err();
        assert!(matches!(
            err,
            RenderError::ContentTooLarge { len: 5, limit: 4 }
        ));
    }

    #[test]
    fn test_disabled_tables_render_as_text() {
        let mut doc = MarkdownDocument::new(RenderOptions {
            tables: false,
            ..RenderOptions::default()
        });
        doc.set_content("| A |\n|---|\n| 1 |");
        let html = doc.render_as(RenderFormat::Html).unwrap();
        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_render_format_display() {
        assert_eq!(RenderFormat::Html.to_string(), "html");
        assert_eq!(RenderFormat::Latex.to_string(), "latex");
    }
}
