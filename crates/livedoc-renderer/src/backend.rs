//! Render backend trait for format-specific rendering.
//!
//! This trait abstracts the differences between HTML and LaTeX output,
//! allowing the main renderer to be generic over the output format.

use pulldown_cmark::Alignment;

/// GitHub-style alert kinds (`> [!NOTE]` and friends).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// Human-readable label used as the alert heading.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

impl From<pulldown_cmark::BlockQuoteKind> for AlertKind {
    fn from(kind: pulldown_cmark::BlockQuoteKind) -> Self {
        use pulldown_cmark::BlockQuoteKind;
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Inline spans that wrap other inline content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlineKind {
    Emphasis,
    Strong,
    Strikethrough,
    Superscript,
    Subscript,
}

/// Backend trait for format-specific rendering operations.
///
/// The generic renderer owns the traversal (nesting, buffering of heading
/// and image text, table cell bookkeeping) and calls into the backend for
/// every piece of output. Backends are stateless; every method writes into
/// the supplied buffer.
pub trait RenderBackend {
    /// Write `text` escaped for this output format.
    fn escape(text: &str, out: &mut String);

    /// Render paragraph start.
    fn paragraph_start(out: &mut String);

    /// Render paragraph end.
    fn paragraph_end(out: &mut String);

    /// Render a complete heading.
    ///
    /// # Arguments
    ///
    /// * `level` - Heading level (1-6)
    /// * `id` - Unique anchor id derived from the heading text
    /// * `content` - Already-rendered inline content of the heading
    /// * `numbered` - Whether the heading should be numbered (LaTeX only)
    /// * `out` - Output buffer to write to
    fn heading(level: u8, id: &str, content: &str, numbered: bool, out: &mut String);

    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render inline code.
    fn inline_code(code: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render the opening of a GitHub-style alert.
    fn alert_start(kind: AlertKind, out: &mut String);

    /// Render the closing of a GitHub-style alert.
    fn alert_end(kind: AlertKind, out: &mut String);

    /// Render list start. `start` is `Some(n)` for ordered lists.
    fn list_start(start: Option<u64>, out: &mut String);

    /// Render list end.
    fn list_end(ordered: bool, out: &mut String);

    /// Render list item start.
    fn item_start(out: &mut String);

    /// Render list item end.
    fn item_end(out: &mut String);

    /// Open an inline span.
    fn inline_start(kind: InlineKind, out: &mut String);

    /// Close an inline span.
    fn inline_end(kind: InlineKind, out: &mut String);

    /// Open a link. The link text follows, then [`link_end`](Self::link_end).
    fn link_start(href: &str, out: &mut String);

    /// Close a link.
    fn link_end(out: &mut String);

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Optional title attribute
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render table start with the column alignments.
    fn table_start(alignments: &[Alignment], out: &mut String);

    /// Render table end.
    fn table_end(out: &mut String);

    /// Render header row start.
    fn table_head_start(out: &mut String);

    /// Render header row end.
    fn table_head_end(out: &mut String);

    /// Render body row start.
    fn table_row_start(out: &mut String);

    /// Render body row end.
    fn table_row_end(out: &mut String);

    /// Render table cell start.
    ///
    /// `index` is the zero-based column; `in_head` is true inside the header row.
    fn table_cell_start(index: usize, in_head: bool, alignment: Alignment, out: &mut String);

    /// Render table cell end.
    fn table_cell_end(in_head: bool, out: &mut String);

    /// Render raw HTML found in the source.
    ///
    /// Default passes it through unchanged.
    fn raw_html(html: &str, out: &mut String) {
        out.push_str(html);
    }

    /// Render a soft line break.
    fn soft_break(out: &mut String) {
        out.push('\n');
    }

    /// Render a hard break.
    ///
    /// Default uses `<br>`. Override for format-specific rendering.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    ///
    /// Default uses `<hr>`. Override for format-specific rendering.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    ///
    /// Default uses HTML checkbox. Override for format-specific rendering.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
