//! The canonical editing state.

use crate::format::OutputFormat;
use crate::url::DecodedFields;

/// Title, author, content and selected format, as last read from the fields.
///
/// Owned by [`StateController`](crate::StateController); everything else
/// gets a shared borrow.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditingState {
    pub title: String,
    pub author: String,
    pub content: String,
    /// Selects the render path. Not written to the URL.
    pub format: OutputFormat,
}

impl EditingState {
    /// Build the load-time state from decoded URL fields.
    #[must_use]
    pub fn from_decoded(fields: DecodedFields, format: OutputFormat) -> Self {
        Self {
            title: fields.title,
            author: fields.author,
            content: fields.content,
            format,
        }
    }

    /// The fields that are persisted in the URL, in key order.
    #[must_use]
    pub fn persisted(&self) -> [(&'static str, &str); 3] {
        [
            ("title", &self.title),
            ("author", &self.author),
            ("content", &self.content),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decoded() {
        let fields = DecodedFields {
            title: "Hi".to_owned(),
            author: String::new(),
            content: "Hello\nWorld".to_owned(),
        };
        let state = EditingState::from_decoded(fields, OutputFormat::Latex);
        assert_eq!(state.title, "Hi");
        assert_eq!(state.author, "");
        assert_eq!(state.content, "Hello\nWorld");
        assert_eq!(state.format, OutputFormat::Latex);
    }

    #[test]
    fn test_persisted_key_order() {
        let state = EditingState::default();
        let keys: Vec<&str> = state.persisted().iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["title", "author", "content"]);
    }
}
