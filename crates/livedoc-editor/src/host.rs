//! Host capabilities the controller is wired to.
//!
//! The controller never touches a concrete UI. It reads the editable fields
//! through [`EditorFields`], shows renderings through [`OutputSurface`] and
//! persists the state through [`Location`].

use ::url::{ParseError, Url};

use crate::format::{OutputFormat, Treatment};

/// Source of the user-editable values.
pub trait EditorFields {
    fn title(&self) -> String;
    fn author(&self) -> String;
    fn content(&self) -> String;
    fn format(&self) -> OutputFormat;

    /// Populate the fields from decoded URL values. Called once at load.
    fn seed(&mut self, title: &str, author: &str, content: &str);
}

/// Where renderings are shown.
pub trait OutputSurface {
    /// Replace the surface with interpreted markup.
    fn show_markup(&mut self, class: &str, markup: &str);

    /// Replace the surface with literal text.
    fn show_text(&mut self, class: &str, text: &str);

    /// Re-run syntax highlighting over code blocks now on the surface.
    fn highlight_code_blocks(&mut self) {}

    /// Show `rendered` the way `format` asks for.
    fn present(&mut self, format: OutputFormat, rendered: &str) {
        let class = format.surface_class();
        match format.treatment() {
            Treatment::Markup => self.show_markup(class, rendered),
            Treatment::Text => self.show_text(class, rendered),
        }
    }
}

/// The host's current address.
pub trait Location {
    /// Path component, e.g. `/editor/`.
    fn path(&self) -> &str;

    /// Query component including the leading `?`, or `""`.
    fn query(&self) -> &str;

    /// Replace the current address in place. No history entry, no reload.
    fn replace(&mut self, url: &str);
}

/// In-memory [`Location`] for hosts without a browser address bar.
///
/// Always holds an absolute address. [`Location::replace`] accepts either an
/// absolute URL or a path-relative one (`/p?q`, `?q`); relative input keeps
/// the scheme and authority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryLocation {
    url: Url,
    /// `?query` form of `url.query()`, kept so [`Location::query`] can borrow.
    query: String,
}

impl MemoryLocation {
    /// Parse an absolute address such as `https://host/editor/?title=Hi#top`.
    ///
    /// # Errors
    ///
    /// Returns the parse error for relative or malformed addresses.
    pub fn parse(href: &str) -> Result<Self, ParseError> {
        Url::parse(href).map(Self::from_url)
    }

    fn from_url(url: Url) -> Self {
        let query = query_of(&url);
        Self { url, query }
    }

    /// Full address, serialized.
    #[must_use]
    pub fn href(&self) -> String {
        self.url.as_str().to_owned()
    }

    /// Fragment without the leading `#`, or `""`.
    #[must_use]
    pub fn fragment(&self) -> &str {
        self.url.fragment().unwrap_or("")
    }

    fn replace_relative(&mut self, relative: &str) {
        let relative = relative.split_once('#').map_or(relative, |(before, _)| before);
        let (path, query) = relative.split_once('?').unwrap_or((relative, ""));
        if !path.is_empty() {
            self.url.set_path(path);
        }
        self.url.set_query(Some(query).filter(|q| !q.is_empty()));
        self.url.set_fragment(None);
        self.query = query_of(&self.url);
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> &str {
        self.url.path()
    }

    fn query(&self) -> &str {
        &self.query
    }

    fn replace(&mut self, url: &str) {
        match Url::parse(url) {
            Ok(next) => *self = Self::from_url(next),
            Err(ParseError::RelativeUrlWithoutBase) => self.replace_relative(url),
            Err(e) => tracing::warn!(url, error = %e, "Ignoring unparseable address"),
        }
    }
}

/// A bare `?` counts as no query.
fn query_of(url: &Url) -> String {
    url.query()
        .filter(|query| !query.is_empty())
        .map(|query| format!("?{query}"))
        .unwrap_or_default()
}
