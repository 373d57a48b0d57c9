//! Shared state structs for markdown rendering.
//!
//! These structs track context during event processing and are shared
//! between the HTML and LaTeX backends.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    /// Whether we're inside a code block.
    active: bool,
    /// Language of current code block (e.g., "rust", "python").
    language: Option<String>,
    /// Buffer for code block content.
    buffer: String,
}

impl CodeBlockState {
    /// Start a new code block with optional language.
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub(crate) struct TableState {
    /// Whether we're inside the table header row.
    in_head: bool,
    /// Column alignments for current table.
    alignments: Vec<Alignment>,
    /// Current column index in table row.
    cell_index: usize,
}

impl TableState {
    /// Start a new table with column alignments.
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn alignments(&self) -> &[Alignment] {
        &self.alignments
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    pub(crate) fn cell_index(&self) -> usize {
        self.cell_index
    }

    /// Alignment of the current cell; columns past the delimiter row are unaligned.
    pub(crate) fn current_alignment(&self) -> Alignment {
        self.alignments
            .get(self.cell_index)
            .copied()
            .unwrap_or(Alignment::None)
    }
}

/// State for tracking image alt text capture.
#[derive(Default)]
pub(crate) struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    /// End image capture and return the alt text.
    pub(crate) fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// Heading id used when the heading text has no slug-safe characters.
const FALLBACK_ID: &str = "section";

/// State for tracking headings and their anchor ids.
#[derive(Default)]
pub(crate) struct HeadingState {
    /// Current heading level being processed (None if not in a heading).
    current_level: Option<u8>,
    /// Plain heading text, used for the slug.
    text: String,
    /// Heading content rendered by the backend (with inline formatting).
    rendered: String,
    /// Counter for generating unique heading IDs.
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    /// Check if we're currently inside a heading.
    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.rendered.clear();
    }

    /// Complete the heading. Returns (level, id, rendered content).
    pub(crate) fn complete_heading(&mut self) -> Option<(u8, String, String)> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let rendered = std::mem::take(&mut self.rendered);
        let id = self.generate_id(&text);
        Some((level, id, rendered))
    }

    /// Generate a unique ID for a heading.
    /// Slug of `text`, or `section` when nothing in it is slug-safe.
    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            base_id.push_str(FALLBACK_ID);
        }
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Buffer that receives backend output while a heading is open.
    pub(crate) fn rendered_buffer(&mut self) -> &mut String {
        &mut self.rendered
    }
}

/// Convert text to URL-safe slug.
///
/// Converts to lowercase, replaces whitespace/dashes/underscores with single dashes,
/// and removes other non-alphanumeric characters.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("snake_case"), "snake-case");
    }

    #[test]
    fn test_code_block_state() {
        let mut state = CodeBlockState::default();
        assert!(!state.is_active());

        state.start(Some("rust".to_string()));
        assert!(state.is_active());

        state.push_str("fn main() {}");
        let (lang, content) = state.end();
        assert_eq!(lang, Some("rust".to_string()));
        assert_eq!(content, "fn main() {}");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_state_alignment() {
        let mut state = TableState::default();
        state.start(vec![Alignment::Left, Alignment::Right]);

        state.start_head();
        assert!(state.is_in_head());
        assert_eq!(state.current_alignment(), Alignment::Left);

        state.next_cell();
        assert_eq!(state.cell_index(), 1);
        assert_eq!(state.current_alignment(), Alignment::Right);

        state.next_cell();
        assert_eq!(state.current_alignment(), Alignment::None);

        state.end_head();
        assert!(!state.is_in_head());
    }

    #[test]
    fn test_heading_ids_are_unique() {
        let mut state = HeadingState::default();
        for _ in 0..3 {
            state.start_heading(2);
            state.push_text("FAQ");
            state.complete_heading();
        }
        state.start_heading(2);
        state.push_text("FAQ");
        let (level, id, _) = state.complete_heading().unwrap();
        assert_eq!(level, 2);
        assert_eq!(id, "faq-3");
    }

    #[test]
    fn test_heading_without_slug_chars_gets_fallback_id() {
        let mut state = HeadingState::default();
        let mut ids = Vec::new();
        for text in ["Привет", "日本語", "Section"] {
            state.start_heading(1);
            state.push_text(text);
            let (_, id, _) = state.complete_heading().unwrap();
            ids.push(id);
        }
        assert_eq!(ids, ["section", "section-1", "section-2"]);
    }

    #[test]
    fn test_complete_without_heading() {
        let mut state = HeadingState::default();
        assert!(state.complete_heading().is_none());
    }
}
