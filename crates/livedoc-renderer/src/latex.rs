//! LaTeX backend for markdown rendering.
//!
//! Produces a LaTeX body fragment (no preamble). Block elements are
//! separated by blank lines so the fragment pastes cleanly into any
//! `document` environment.

use pulldown_cmark::Alignment;

use crate::backend::{AlertKind, InlineKind, RenderBackend};

/// LaTeX render backend.
///
/// Produces:
/// - `\section*` through `\subparagraph*` (numbered forms on request) with
///   `\hypertarget` anchors
/// - `verbatim` environments for code blocks
/// - `quote` for blockquotes and alerts
/// - `figure` with `\includegraphics` for images
/// - `tabular` for tables
///
/// Raw HTML has no LaTeX meaning and is dropped.
pub struct LatexBackend;

impl RenderBackend for LatexBackend {
    fn escape(text: &str, out: &mut String) {
        out.push_str(&escape_latex(text));
    }

    fn paragraph_start(_out: &mut String) {}

    fn paragraph_end(out: &mut String) {
        out.push_str("\n\n");
    }

    fn heading(level: u8, id: &str, content: &str, numbered: bool, out: &mut String) {
        let command = match level {
            1 => "section",
            2 => "subsection",
            3 => "subsubsection",
            4 => "paragraph",
            _ => "subparagraph",
        };
        let star = if numbered { "" } else { "*" };
        let id = escape_latex(id);
        out.push_str(&format!(
            "\\hypertarget{{{id}}}{{%\n\\{command}{star}{{{}}}\\label{{{id}}}}}\n\n",
            content.trim()
        ));
    }

    fn code_block(_lang: Option<&str>, content: &str, out: &mut String) {
        out.push_str("\\begin{verbatim}\n");
        out.push_str(content);
        if !content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("\\end{verbatim}\n\n");
    }

    fn inline_code(code: &str, out: &mut String) {
        out.push_str("\\texttt{");
        out.push_str(&escape_latex(code));
        out.push('}');
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("\\begin{quote}\n");
    }

    fn blockquote_end(out: &mut String) {
        trim_trailing_blank(out);
        out.push_str("\\end{quote}\n\n");
    }

    fn alert_start(kind: AlertKind, out: &mut String) {
        out.push_str(&format!("\\begin{{quote}}\n\\textbf{{{}.}} ", kind.label()));
    }

    fn alert_end(_kind: AlertKind, out: &mut String) {
        Self::blockquote_end(out);
    }

    fn list_start(start: Option<u64>, out: &mut String) {
        match start {
            None => out.push_str("\\begin{itemize}\n"),
            Some(1) => out.push_str("\\begin{enumerate}\n"),
            Some(n) => out.push_str(&format!(
                "\\begin{{enumerate}}[label=\\arabic*., start={n}]\n"
            )),
        }
    }

    fn list_end(ordered: bool, out: &mut String) {
        trim_trailing_blank(out);
        out.push_str(if ordered {
            "\\end{enumerate}\n\n"
        } else {
            "\\end{itemize}\n\n"
        });
    }

    fn item_start(out: &mut String) {
        out.push_str("\\item ");
    }

    fn item_end(out: &mut String) {
        trim_trailing_blank(out);
        if !out.ends_with('\n') {
            out.push('\n');
        }
    }

    fn inline_start(kind: InlineKind, out: &mut String) {
        out.push_str(match kind {
            InlineKind::Emphasis => "\\textit{",
            InlineKind::Strong => "\\textbf{",
            InlineKind::Strikethrough => "\\st{",
            InlineKind::Superscript => "\\textsuperscript{",
            InlineKind::Subscript => "\\textsubscript{",
        });
    }

    fn inline_end(_kind: InlineKind, out: &mut String) {
        out.push('}');
    }

    fn link_start(href: &str, out: &mut String) {
        out.push_str("\\href{");
        out.push_str(&escape_url(href));
        out.push_str("}{");
    }

    fn link_end(out: &mut String) {
        out.push('}');
    }

    fn image(src: &str, alt: &str, _title: &str, out: &mut String) {
        out.push_str("\\begin{figure}\n\\centering\n");
        out.push_str(&format!(
            "\\includegraphics[width=\\textwidth]{{{}}}\n",
            escape_url(src)
        ));
        if !alt.is_empty() {
            out.push_str(&format!("\\caption{{{}}}\n", escape_latex(alt)));
        }
        out.push_str("\\end{figure}\n");
    }

    fn table_start(alignments: &[Alignment], out: &mut String) {
        let spec: String = alignments
            .iter()
            .map(|alignment| match alignment {
                Alignment::Center => 'c',
                Alignment::Right => 'r',
                Alignment::Left | Alignment::None => 'l',
            })
            .collect();
        out.push_str(&format!("\\begin{{tabular}}{{{spec}}}\n"));
    }

    fn table_end(out: &mut String) {
        out.push_str("\\end{tabular}\n\n");
    }

    fn table_head_start(_out: &mut String) {}

    fn table_head_end(out: &mut String) {
        out.push_str(" \\\\\n\\hline\n");
    }

    fn table_row_start(_out: &mut String) {}

    fn table_row_end(out: &mut String) {
        out.push_str(" \\\\\n");
    }

    fn table_cell_start(index: usize, _in_head: bool, _alignment: Alignment, out: &mut String) {
        if index > 0 {
            out.push_str(" & ");
        }
    }

    fn table_cell_end(_in_head: bool, _out: &mut String) {}

    fn raw_html(_html: &str, _out: &mut String) {}

    fn hard_break(out: &mut String) {
        out.push_str("\\\\\n");
    }

    fn horizontal_rule(out: &mut String) {
        out.push_str("\\begin{center}\\rule{0.5\\linewidth}{0.5pt}\\end{center}\n\n");
    }

    fn task_list_marker(checked: bool, out: &mut String) {
        out.push_str(if checked { "[\\done] " } else { "[$\\square$] " });
    }
}

/// Drop trailing blank-line separators so closing commands hug their content.
fn trim_trailing_blank(out: &mut String) {
    while out.ends_with("\n\n") {
        out.pop();
    }
}

/// Escape LaTeX special characters in running text.
#[must_use]
pub fn escape_latex(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                result.push('\\');
                result.push(c);
            }
            '~' => result.push_str("\\textasciitilde{}"),
            '^' => result.push_str("\\textasciicircum{}"),
            '\\' => result.push_str("\\textasciibackslash{}"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape the characters `\href` and `\includegraphics` cannot take verbatim.
fn escape_url(url: &str) -> String {
    url.replace('%', "\\%").replace('#', "\\#")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("50% of $5"), r"50\% of \$5");
        assert_eq!(escape_latex("a_b {c}"), r"a\_b \{c\}");
        assert_eq!(escape_latex("x^2 ~ y"), r"x\textasciicircum{}2 \textasciitilde{} y");
        assert_eq!(escape_latex(r"C:\dir"), r"C:\textasciibackslash{}dir");
        assert_eq!(escape_latex("plain"), "plain");
    }

    #[test]
    fn test_heading_unnumbered() {
        let mut out = String::new();
        LatexBackend::heading(1, "title", "Title", false, &mut out);
        assert_eq!(out, "\\hypertarget{title}{%\n\\section*{Title}\\label{title}}\n\n");
    }

    #[test]
    fn test_heading_numbered_level_two() {
        let mut out = String::new();
        LatexBackend::heading(2, "setup", "Setup", true, &mut out);
        assert!(out.contains("\\subsection{Setup}"));
    }

    #[test]
    fn test_code_block_adds_missing_newline() {
        let mut out = String::new();
        LatexBackend::code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(out, "\\begin{verbatim}\nfn main() {}\n\\end{verbatim}\n\n");
    }

    #[test]
    fn test_enumerate_with_start() {
        let mut out = String::new();
        LatexBackend::list_start(Some(4), &mut out);
        assert_eq!(out, "\\begin{enumerate}[label=\\arabic*., start=4]\n");
    }

    #[test]
    fn test_table_column_spec() {
        let mut out = String::new();
        LatexBackend::table_start(
            &[Alignment::None, Alignment::Center, Alignment::Right],
            &mut out,
        );
        assert_eq!(out, "\\begin{tabular}{lcr}\n");
    }

    #[test]
    fn test_link_escapes_url() {
        let mut out = String::new();
        LatexBackend::link_start("https://x.org/a%20b#frag", &mut out);
        LatexBackend::link_end(&mut out);
        assert_eq!(out, r"\href{https://x.org/a\%20b\#frag}{}");
    }

    #[test]
    fn test_raw_html_dropped() {
        let mut out = String::new();
        LatexBackend::raw_html("<div>", &mut out);
        assert!(out.is_empty());
    }
}
