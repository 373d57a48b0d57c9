//! HTML backend for markdown rendering.
//!
//! Produces semantic HTML5 output suitable for live preview.

use pulldown_cmark::Alignment;

use crate::backend::{AlertKind, InlineKind, RenderBackend};

/// HTML render backend.
///
/// Produces semantic HTML5 with:
/// - `<pre><code class="language-*">` for code blocks (highlighter friendly)
/// - `<blockquote>` for blockquotes, `<div class="alert">` for alerts
/// - `<img>` for images
/// - Heading anchors from slugified heading text
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn escape(text: &str, out: &mut String) {
        out.push_str(&escape_html(text));
    }

    fn paragraph_start(out: &mut String) {
        out.push_str("<p>");
    }

    fn paragraph_end(out: &mut String) {
        out.push_str("</p>");
    }

    fn heading(level: u8, id: &str, content: &str, _numbered: bool, out: &mut String) {
        out.push_str(&format!(
            r#"<h{level} id="{}">{}</h{level}>"#,
            escape_html(id),
            content.trim()
        ));
    }

    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        match lang {
            Some(lang) => out.push_str(&format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )),
            None => out.push_str(&format!("<pre><code>{}</code></pre>", escape_html(content))),
        }
    }

    fn inline_code(code: &str, out: &mut String) {
        out.push_str("<code>");
        out.push_str(&escape_html(code));
        out.push_str("</code>");
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        let (class, icon) = match kind {
            AlertKind::Note => ("note", "ℹ️"),
            AlertKind::Tip => ("tip", "💡"),
            AlertKind::Important => ("important", "❗"),
            AlertKind::Warning => ("warning", "⚠️"),
            AlertKind::Caution => ("caution", "🔴"),
        };
        out.push_str(&format!(
            r#"<div class="alert alert-{class}"><div class="alert-title"><span class="alert-icon">{icon}</span>{}</div><div class="alert-content">"#,
            kind.label()
        ));
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        out.push_str("</div></div>");
    }

    fn list_start(start: Option<u64>, out: &mut String) {
        match start {
            Some(1) => out.push_str("<ol>"),
            Some(n) => out.push_str(&format!(r#"<ol start="{n}">"#)),
            None => out.push_str("<ul>"),
        }
    }

    fn list_end(ordered: bool, out: &mut String) {
        out.push_str(if ordered { "</ol>" } else { "</ul>" });
    }

    fn item_start(out: &mut String) {
        out.push_str("<li>");
    }

    fn item_end(out: &mut String) {
        out.push_str("</li>");
    }

    fn inline_start(kind: InlineKind, out: &mut String) {
        out.push('<');
        out.push_str(inline_tag(kind));
        out.push('>');
    }

    fn inline_end(kind: InlineKind, out: &mut String) {
        out.push_str("</");
        out.push_str(inline_tag(kind));
        out.push('>');
    }

    fn link_start(href: &str, out: &mut String) {
        out.push_str(&format!(r#"<a href="{}">"#, escape_html(href)));
    }

    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        out.push_str(&format!(
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        ));
    }

    fn table_start(_alignments: &[Alignment], out: &mut String) {
        out.push_str("<table>");
    }

    fn table_end(out: &mut String) {
        out.push_str("</tbody></table>");
    }

    fn table_head_start(out: &mut String) {
        out.push_str("<thead><tr>");
    }

    fn table_head_end(out: &mut String) {
        out.push_str("</tr></thead><tbody>");
    }

    fn table_row_start(out: &mut String) {
        out.push_str("<tr>");
    }

    fn table_row_end(out: &mut String) {
        out.push_str("</tr>");
    }

    fn table_cell_start(_index: usize, in_head: bool, alignment: Alignment, out: &mut String) {
        let tag = if in_head { "th" } else { "td" };
        out.push('<');
        out.push_str(tag);
        out.push_str(alignment_style(alignment));
        out.push('>');
    }

    fn table_cell_end(in_head: bool, out: &mut String) {
        out.push_str(if in_head { "</th>" } else { "</td>" });
    }
}

fn inline_tag(kind: InlineKind) -> &'static str {
    match kind {
        InlineKind::Emphasis => "em",
        InlineKind::Strong => "strong",
        InlineKind::Strikethrough => "s",
        InlineKind::Superscript => "sup",
        InlineKind::Subscript => "sub",
    }
}

fn alignment_style(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Left => r#" style="text-align:left""#,
        Alignment::Center => r#" style="text-align:center""#,
        Alignment::Right => r#" style="text-align:right""#,
        Alignment::None => "",
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
