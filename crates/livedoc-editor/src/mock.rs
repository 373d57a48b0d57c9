//! Test doubles for the host capabilities.
//!
//! Every double can share a [`CallLog`], so a test can assert the exact
//! order in which the controller talked to renderer, surface and location.

use std::cell::RefCell;
use std::rc::Rc;

use livedoc_renderer::{DocumentRenderer, RenderFormat};

use crate::format::OutputFormat;
use crate::host::{EditorFields, Location, MemoryLocation, OutputSurface};

/// One observed call on a double.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Seed {
        title: String,
        author: String,
        content: String,
    },
    SetContent(String),
    SetTitle(String),
    SetAuthor(String),
    Render(RenderFormat),
    ShowMarkup {
        class: String,
        body: String,
    },
    ShowText {
        class: String,
        body: String,
    },
    Highlight,
    Replace(String),
}

/// Ordered call record shared between doubles.
#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of everything recorded so far.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// Error returned by a [`RecordingRenderer`] configured to fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock render failure: {0}")]
pub struct MockRenderError(pub String);

/// Renderer that records calls and echoes its input.
///
/// Renders as `[<format>] <content>`, which is enough to tell which path
/// and which content produced a given surface write.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    log: CallLog,
    content: String,
    failure: Option<String>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    /// Fail every render with `message` until [`Self::recover`] is called.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    pub fn recover(&mut self) {
        self.failure = None;
    }
}

impl DocumentRenderer for RecordingRenderer {
    type Error = MockRenderError;

    fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
        self.log.record(Call::SetContent(content.to_owned()));
    }

    fn set_title(&mut self, title: &str) {
        self.log.record(Call::SetTitle(title.to_owned()));
    }

    fn set_author(&mut self, author: &str) {
        self.log.record(Call::SetAuthor(author.to_owned()));
    }

    fn render_as(&mut self, format: RenderFormat) -> Result<String, MockRenderError> {
        self.log.record(Call::Render(format));
        match &self.failure {
            Some(message) => Err(MockRenderError(message.clone())),
            None => Ok(format!("[{format}] {}", self.content)),
        }
    }
}

/// Editable fields held in memory.
///
/// # Example
///
/// ```ignore
/// let log = CallLog::new();
/// let fields = MockFields::new(log.clone())
///     .with_content("# Hi")
///     .with_format(OutputFormat::Latex);
/// ```
#[derive(Debug, Default)]
pub struct MockFields {
    log: CallLog,
    pub title: String,
    pub author: String,
    pub content: String,
    pub format: OutputFormat,
}

impl MockFields {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

impl EditorFields for MockFields {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn author(&self) -> String {
        self.author.clone()
    }

    fn content(&self) -> String {
        self.content.clone()
    }

    fn format(&self) -> OutputFormat {
        self.format
    }

    fn seed(&mut self, title: &str, author: &str, content: &str) {
        self.log.record(Call::Seed {
            title: title.to_owned(),
            author: author.to_owned(),
            content: content.to_owned(),
        });
        title.clone_into(&mut self.title);
        author.clone_into(&mut self.author);
        content.clone_into(&mut self.content);
    }
}

/// Surface that records writes and keeps the last one.
#[derive(Debug, Default)]
pub struct MockSurface {
    log: CallLog,
    /// Class of the last write.
    pub class: String,
    /// Body of the last write.
    pub body: String,
    /// Whether the last write was markup.
    pub markup: bool,
}

impl MockSurface {
    #[must_use]
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }
}

impl OutputSurface for MockSurface {
    fn show_markup(&mut self, class: &str, markup: &str) {
        self.log.record(Call::ShowMarkup {
            class: class.to_owned(),
            body: markup.to_owned(),
        });
        class.clone_into(&mut self.class);
        markup.clone_into(&mut self.body);
        self.markup = true;
    }

    fn show_text(&mut self, class: &str, text: &str) {
        self.log.record(Call::ShowText {
            class: class.to_owned(),
            body: text.to_owned(),
        });
        class.clone_into(&mut self.class);
        text.clone_into(&mut self.body);
        self.markup = false;
    }

    fn highlight_code_blocks(&mut self) {
        self.log.record(Call::Highlight);
    }
}

/// [`MemoryLocation`] that records replacements.
#[derive(Debug)]
pub struct MockLocation {
    log: CallLog,
    inner: MemoryLocation,
}

impl MockLocation {
    #[must_use]
    pub fn new(log: CallLog, inner: MemoryLocation) -> Self {
        Self { log, inner }
    }

    #[must_use]
    pub fn href(&self) -> String {
        self.inner.href()
    }
}

impl Location for MockLocation {
    fn path(&self) -> &str {
        self.inner.path()
    }

    fn query(&self) -> &str {
        self.inner.query()
    }

    fn replace(&mut self, url: &str) {
        self.log.record(Call::Replace(url.to_owned()));
        self.inner.replace(url);
    }
}
