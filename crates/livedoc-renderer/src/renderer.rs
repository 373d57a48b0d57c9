//! Generic markdown renderer with pluggable backend.

use std::marker::PhantomData;

use pulldown_cmark::{CodeBlockKind, Event, Tag, TagEnd};

use crate::backend::{InlineKind, RenderBackend};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState};
use crate::util::heading_level_to_num;

/// Generic markdown renderer with pluggable backend.
///
/// Uses the [`RenderBackend`] trait to delegate every format-specific
/// construct while handling traversal state (headings, images, tables,
/// code blocks) generically.
pub struct MarkdownRenderer<B: RenderBackend> {
    output: String,
    /// Code block rendering state.
    code: CodeBlockState,
    /// Table rendering state.
    table: TableState,
    /// Image alt text capture state.
    image: ImageState,
    /// Heading buffering and anchor ids.
    heading: HeadingState,
    /// Pending image data (src, title) waiting for alt text.
    pending_image: Option<(String, String)>,
    /// Whether headings are numbered (LaTeX `\section` vs `\section*`).
    number_sections: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> MarkdownRenderer<B> {
    /// Create a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            number_sections: false,
            _backend: PhantomData,
        }
    }

    /// Number section headings. Backends without numbering ignore this.
    #[must_use]
    pub fn with_numbered_sections(mut self, number_sections: bool) -> Self {
        self.number_sections = number_sections;
        self
    }

    /// Render markdown events and return the output.
    pub fn render<'a, I>(&mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }
        std::mem::take(&mut self.output)
    }

    /// Render markdown as inline markup only.
    ///
    /// Block wrappers are dropped and block boundaries become soft breaks, so
    /// a title such as `# Notes` or `1. Report` yields plain inline text.
    pub fn render_inline<'a, I>(&mut self, events: I) -> String
    where
        I: Iterator<Item = Event<'a>>,
    {
        let inline = events.filter_map(|event| match event {
            Event::Start(tag) if is_block(&tag) => None,
            Event::End(tag) if is_block_end(tag) => Some(Event::SoftBreak),
            Event::Rule | Event::TaskListMarker(_) => None,
            event => Some(event),
        });
        self.render(inline).trim().to_owned()
    }

    /// Output target for inline content: the heading buffer while a heading
    /// is open, the main output otherwise.
    fn inline_out(&mut self) -> &mut String {
        if self.heading.is_active() {
            self.heading.rendered_buffer()
        } else {
            &mut self.output
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => B::raw_html(&html, self.inline_out()),
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => B::hard_break(self.inline_out()),
            Event::Rule => B::horizontal_rule(&mut self.output),
            Event::TaskListMarker(checked) => B::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if !self.code.is_active() {
                    B::paragraph_start(&mut self.output);
                }
            }
            Tag::Heading { level, .. } => {
                // Opening markup is written in end_tag once the id is known.
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(Some(kind)) => B::alert_start(kind.into(), &mut self.output),
            Tag::BlockQuote(None) => B::blockquote_start(&mut self.output),
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(ref info) => fence_language(info),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => B::list_start(start, &mut self.output),
            Tag::Item => B::item_start(&mut self.output),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                B::table_start(self.table.alignments(), &mut self.output);
            }
            Tag::TableHead => {
                self.table.start_head();
                B::table_head_start(&mut self.output);
            }
            Tag::TableRow => {
                self.table.start_row();
                B::table_row_start(&mut self.output);
            }
            Tag::TableCell => {
                B::table_cell_start(
                    self.table.cell_index(),
                    self.table.is_in_head(),
                    self.table.current_alignment(),
                    &mut self.output,
                );
            }
            Tag::Emphasis => self.open_inline(InlineKind::Emphasis),
            Tag::Strong => self.open_inline(InlineKind::Strong),
            Tag::Strikethrough => self.open_inline(InlineKind::Strikethrough),
            Tag::Superscript => self.open_inline(InlineKind::Superscript),
            Tag::Subscript => self.open_inline(InlineKind::Subscript),
            Tag::Link { dest_url, .. } => {
                if !self.image.is_active() {
                    B::link_start(&dest_url, self.inline_out());
                }
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Start collecting alt text; image will be rendered in end_tag
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                if !self.code.is_active() {
                    B::paragraph_end(&mut self.output);
                }
            }
            TagEnd::Heading(_) => {
                if let Some((level, id, content)) = self.heading.complete_heading() {
                    B::heading(level, &id, &content, self.number_sections, &mut self.output);
                }
            }
            TagEnd::BlockQuote(Some(kind)) => B::alert_end(kind.into(), &mut self.output),
            TagEnd::BlockQuote(None) => B::blockquote_end(&mut self.output),
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                B::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => B::list_end(ordered, &mut self.output),
            TagEnd::Item => B::item_end(&mut self.output),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    B::image(&src, &alt, &title, &mut self.output);
                }
            }
            TagEnd::Table => B::table_end(&mut self.output),
            TagEnd::TableHead => {
                B::table_head_end(&mut self.output);
                self.table.end_head();
            }
            TagEnd::TableRow => B::table_row_end(&mut self.output),
            TagEnd::TableCell => {
                B::table_cell_end(self.table.is_in_head(), &mut self.output);
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.close_inline(InlineKind::Emphasis),
            TagEnd::Strong => self.close_inline(InlineKind::Strong),
            TagEnd::Strikethrough => self.close_inline(InlineKind::Strikethrough),
            TagEnd::Superscript => self.close_inline(InlineKind::Superscript),
            TagEnd::Subscript => self.close_inline(InlineKind::Subscript),
            TagEnd::Link => {
                if !self.image.is_active() {
                    B::link_end(self.inline_out());
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image > heading > normal text
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        if self.heading.is_active() {
            self.heading.push_text(text);
        }
        B::escape(text, self.inline_out());
    }

    // Alt text is plain, so markup nested inside an image is dropped.
    fn open_inline(&mut self, kind: InlineKind) {
        if !self.image.is_active() {
            B::inline_start(kind, self.inline_out());
        }
    }

    fn close_inline(&mut self, kind: InlineKind) {
        if !self.image.is_active() {
            B::inline_end(kind, self.inline_out());
        }
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        B::inline_code(code, self.inline_out());
    }

    fn soft_break(&mut self) {
        if self.code.is_active() {
            self.code.push_str("\n");
        } else {
            B::soft_break(self.inline_out());
        }
    }
}

impl<B: RenderBackend> Default for MarkdownRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Language of a fenced code block: the first word of its info string.
fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .map(|lang| lang.trim_start_matches('{').trim_end_matches('}'))
        .filter(|lang| !lang.is_empty())
        .map(str::to_owned)
}

fn is_block(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Paragraph
            | Tag::Heading { .. }
            | Tag::BlockQuote(_)
            | Tag::CodeBlock(_)
            | Tag::HtmlBlock
            | Tag::List(_)
            | Tag::Item
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Table(_)
            | Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
            | Tag::MetadataBlock(_)
    )
}

fn is_block_end(tag: TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::MetadataBlock(_)
    )
}
