//! Editing-state controller for the livedoc live editor.
//!
//! Keeps title, author, content and output format in sync between the
//! editable fields, a [`DocumentRenderer`](livedoc_renderer::DocumentRenderer),
//! an output surface and the host address.
//!
//! # Architecture
//!
//! - [`StateController`] runs the read, render, show, persist cycle
//! - [`EditorFields`], [`OutputSurface`] and [`Location`] are the host seams
//! - [`url`] encodes and decodes the state as a query string
//! - [`MemoryLocation`] is an address for hosts without a browser
//! - recording doubles for tests (behind the `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use livedoc_editor::{MemoryLocation, StateController};
//! use livedoc_renderer::MarkdownDocument;
//!
//! let location = MemoryLocation::parse("https://example.com/?title=Hi")?;
//! let mut editor = StateController::load(MarkdownDocument::default(), fields, surface, location)?;
//! // after every input event:
//! editor.run_update_cycle()?;
//! ```

mod controller;
mod format;
mod host;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
mod state;
pub mod url;

pub use controller::StateController;
pub use format::{OutputFormat, Treatment, UnknownFormat};
pub use host::{EditorFields, Location, MemoryLocation, OutputSurface};
pub use state::EditingState;
pub use url::DecodedFields;
