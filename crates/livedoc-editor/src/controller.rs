//! Update cycle: read fields, render, show, persist.

use livedoc_renderer::DocumentRenderer;

use crate::host::{EditorFields, Location, OutputSurface};
use crate::state::EditingState;
use crate::url;

/// Owns the editing state and drives one renderer, surface and location.
///
/// Every input event should end in exactly one [`run_update_cycle`]. The
/// cycle always renders before it persists, so the address observed after a
/// successful cycle describes what is on the surface.
///
/// [`run_update_cycle`]: StateController::run_update_cycle
pub struct StateController<R, F, S, L> {
    state: EditingState,
    renderer: R,
    fields: F,
    surface: S,
    location: L,
}

impl<R, F, S, L> StateController<R, F, S, L>
where
    R: DocumentRenderer,
    F: EditorFields,
    S: OutputSurface,
    L: Location,
{
    /// Decode the location query and seed the fields with it, without rendering.
    #[must_use]
    pub fn new(renderer: R, mut fields: F, surface: S, location: L) -> Self {
        let decoded = url::decode(location.query());
        fields.seed(&decoded.title, &decoded.author, &decoded.content);
        let state = EditingState::from_decoded(decoded, fields.format());

        tracing::debug!(
            query = location.query(),
            format = %state.format,
            "Seeded editor from location"
        );

        Self {
            state,
            renderer,
            fields,
            surface,
            location,
        }
    }

    /// [`Self::new`] followed by the initial update cycle.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error if the initial render fails.
    pub fn load(renderer: R, fields: F, surface: S, location: L) -> Result<Self, R::Error> {
        let mut controller = Self::new(renderer, fields, surface, location);
        controller.run_update_cycle()?;
        Ok(controller)
    }

    /// Read all fields, render, show the result and persist the state.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error unchanged. In that case the surface
    /// keeps its previous content and the location is not touched.
    pub fn run_update_cycle(&mut self) -> Result<(), R::Error> {
        self.read_fields();
        tracing::debug!(
            format = %self.state.format,
            title_len = self.state.title.len(),
            author_len = self.state.author.len(),
            content_len = self.state.content.len(),
            "Running update cycle"
        );

        self.renderer.set_content(&self.state.content);
        self.renderer.set_title(&self.state.title);
        self.renderer.set_author(&self.state.author);

        let format = self.state.format;
        let rendered = self
            .renderer
            .render_as(format.render_format())
            .inspect_err(|e| tracing::warn!(%format, error = %e, "Render failed"))?;

        self.surface.present(format, &rendered);
        self.surface.highlight_code_blocks();

        self.persist();
        Ok(())
    }

    /// Current editing state.
    #[must_use]
    pub fn state(&self) -> &EditingState {
        &self.state
    }

    #[must_use]
    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Mutable access for event wiring that updates field values.
    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn location(&self) -> &L {
        &self.location
    }

    fn read_fields(&mut self) {
        self.state = EditingState {
            title: self.fields.title(),
            author: self.fields.author(),
            content: self.fields.content(),
            format: self.fields.format(),
        };
    }

    fn persist(&mut self) {
        let url = url::state_url(self.location.path(), &self.state);
        tracing::debug!(url = %url, "Persisting editor state");
        self.location.replace(&url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use crate::host::MemoryLocation;
    use crate::mock::{
        Call, CallLog, MockFields, MockLocation, MockRenderError, MockSurface, RecordingRenderer,
    };
    use livedoc_renderer::RenderFormat;
    use pretty_assertions::assert_eq;

    type TestController = StateController<RecordingRenderer, MockFields, MockSurface, MockLocation>;

    fn controller(log: &CallLog, href: &str, format: OutputFormat) -> TestController {
        StateController::new(
            RecordingRenderer::new(log.clone()),
            MockFields::new(log.clone()).with_format(format),
            MockSurface::new(log.clone()),
            MockLocation::new(log.clone(), location(href)),
        )
    }

    fn location(href: &str) -> MemoryLocation {
        MemoryLocation::parse(href).unwrap()
    }

    fn loaded(log: &CallLog, href: &str, format: OutputFormat) -> TestController {
        let mut controller = controller(log, href, format);
        controller.run_update_cycle().unwrap();
        controller
    }

    #[test]
    fn test_new_seeds_fields_from_query() {
        let log = CallLog::new();
        let controller = controller(
            &log,
            "https://x.org/ed/?title=Hi&content=Hello%0AWorld",
            OutputFormat::Preview,
        );

        assert_eq!(
            log.calls(),
            vec![Call::Seed {
                title: "Hi".to_owned(),
                author: String::new(),
                content: "Hello\nWorld".to_owned(),
            }]
        );
        assert_eq!(controller.fields().content, "Hello\nWorld");
        assert_eq!(controller.state().title, "Hi");
    }

    #[test]
    fn test_cycle_order() {
        let log = CallLog::new();
        let mut controller = StateController::new(
            RecordingRenderer::new(log.clone()),
            MockFields::new(log.clone())
                .with_title("T")
                .with_author("A")
                .with_content("body"),
            MockSurface::new(log.clone()),
            MockLocation::new(log.clone(), location("https://x.org/ed/")),
        );
        log.clear();

        controller.run_update_cycle().unwrap();

        assert_eq!(
            log.calls(),
            vec![
                Call::SetContent("body".to_owned()),
                Call::SetTitle("T".to_owned()),
                Call::SetAuthor("A".to_owned()),
                Call::Render(RenderFormat::Html),
                Call::ShowMarkup {
                    class: String::new(),
                    body: "[html] body".to_owned(),
                },
                Call::Highlight,
                Call::Replace("/ed/?title=T&author=A&content=body".to_owned()),
            ]
        );
    }

    #[test]
    fn test_latex_format_shows_text() {
        let log = CallLog::new();
        let controller = loaded(&log, "https://x.org/?content=%23%20Title", OutputFormat::Latex);

        assert!(log.calls().contains(&Call::Render(RenderFormat::Latex)));
        assert_eq!(controller.surface().class, "latex");
        assert_eq!(controller.surface().body, "[latex] # Title");
        assert!(!controller.surface().markup);
    }

    #[test]
    fn test_html_format_shows_text() {
        let log = CallLog::new();
        let controller = loaded(&log, "https://x.org/?content=x", OutputFormat::Html);

        assert!(log.calls().contains(&Call::Render(RenderFormat::Html)));
        assert_eq!(controller.surface().class, "html");
        assert!(!controller.surface().markup);
    }

    #[test]
    fn test_preview_shows_markup() {
        let log = CallLog::new();
        let controller = loaded(&log, "https://x.org/?content=x", OutputFormat::Preview);

        assert_eq!(controller.surface().class, "");
        assert!(controller.surface().markup);
    }

    #[test]
    fn test_load_runs_one_cycle() {
        let log = CallLog::new();
        let controller = StateController::load(
            RecordingRenderer::new(log.clone()),
            MockFields::new(log.clone()),
            MockSurface::new(log.clone()),
            MockLocation::new(log.clone(), location("https://x.org/ed/?title=Hi")),
        )
        .unwrap();

        let replaces = log
            .calls()
            .iter()
            .filter(|call| matches!(call, Call::Replace(_)))
            .count();
        assert_eq!(replaces, 1);
        assert_eq!(controller.location().href(), "https://x.org/ed/?title=Hi");
    }

    #[test]
    fn test_empty_state_persists_bare_path() {
        let log = CallLog::new();
        let controller = loaded(&log, "https://x.org/ed/?utm=1#frag", OutputFormat::Preview);

        assert_eq!(controller.location().href(), "https://x.org/ed/");
        assert_eq!(controller.location().query(), "");
    }

    #[test]
    fn test_trailing_newline_kept_in_state_but_not_url() {
        let log = CallLog::new();
        let mut controller = controller(&log, "https://x.org/", OutputFormat::Preview);
        controller.fields_mut().title = "Hi".to_owned();
        controller.fields_mut().content = "Hello\n".to_owned();

        controller.run_update_cycle().unwrap();

        assert_eq!(controller.state().content, "Hello\n");
        assert_eq!(controller.location().query(), "?title=Hi&content=Hello");
    }

    #[test]
    fn test_format_change_keeps_url() {
        let log = CallLog::new();
        let mut controller = loaded(&log, "https://x.org/?title=T&content=x", OutputFormat::Preview);
        let before = controller.location().href();

        controller.fields_mut().format = OutputFormat::Latex;
        controller.run_update_cycle().unwrap();

        assert_eq!(controller.location().href(), before);
        assert_eq!(controller.state().format, OutputFormat::Latex);
        assert_eq!(controller.surface().class, "latex");
    }

    #[test]
    fn test_repeated_cycle_is_stable() {
        let log = CallLog::new();
        let mut controller = loaded(&log, "https://x.org/?title=T&content=a%0Ab", OutputFormat::Html);
        let href = controller.location().href();
        let body = controller.surface().body.clone();

        controller.run_update_cycle().unwrap();

        assert_eq!(controller.location().href(), href);
        assert_eq!(controller.surface().body, body);
    }

    #[test]
    fn test_cycle_reads_latest_fields() {
        let log = CallLog::new();
        let mut controller = loaded(&log, "https://x.org/?content=old", OutputFormat::Preview);

        controller.fields_mut().content = "new".to_owned();
        controller.run_update_cycle().unwrap();

        assert_eq!(controller.state().content, "new");
        assert_eq!(controller.surface().body, "[html] new");
        assert_eq!(controller.location().query(), "?content=new");
    }

    #[test]
    fn test_render_failure_skips_surface_and_location() {
        let log = CallLog::new();
        let mut controller = loaded(&log, "https://x.org/?content=good", OutputFormat::Preview);
        controller.fields_mut().content = "bad".to_owned();
        controller.renderer.fail_with("boom");
        log.clear();

        let err = controller.run_update_cycle().unwrap_err();

        assert_eq!(err, MockRenderError("boom".to_owned()));
        assert_eq!(
            log.calls(),
            vec![
                Call::SetContent("bad".to_owned()),
                Call::SetTitle(String::new()),
                Call::SetAuthor(String::new()),
                Call::Render(RenderFormat::Html),
            ]
        );
        assert_eq!(controller.surface().body, "[html] good");
        assert_eq!(controller.location().query(), "?content=good");
        assert_eq!(controller.state().content, "bad");
    }

    #[test]
    fn test_recovers_after_failure() {
        let log = CallLog::new();
        let mut controller = loaded(&log, "https://x.org/?content=a", OutputFormat::Preview);
        controller.renderer.fail_with("boom");
        controller.fields_mut().content = "b".to_owned();
        assert!(controller.run_update_cycle().is_err());

        controller.renderer.recover();
        controller.run_update_cycle().unwrap();

        assert_eq!(controller.location().query(), "?content=b");
    }

    #[test]
    fn test_load_propagates_render_error() {
        let log = CallLog::new();
        let result = StateController::load(
            RecordingRenderer::new(log.clone()).failing("broken"),
            MockFields::new(log.clone()),
            MockSurface::new(log.clone()),
            MockLocation::new(log.clone(), location("https://x.org/?content=x")),
        );

        assert!(result.is_err());
        assert!(!log.calls().iter().any(|call| matches!(call, Call::Replace(_))));
    }

    #[test]
    fn test_query_always_matches_rendered_state() {
        let log = CallLog::new();
        let mut controller = loaded(&log, "https://x.org/", OutputFormat::Preview);

        for content in ["one", "two\n", "three\nlines"] {
            controller.fields_mut().content = content.to_owned();
            controller.run_update_cycle().unwrap();

            let persisted = url::decode(controller.location().query());
            assert_eq!(
                persisted.content,
                content.strip_suffix('\n').unwrap_or(content)
            );
            assert_eq!(controller.surface().body, format!("[html] {content}"));
        }
    }

    #[test]
    fn test_cycle_keeps_origin_when_path_embeds_address() {
        let log = CallLog::new();
        let mut controller = loaded(
            &log,
            "https://x.org/view/http://a.b/?title=T",
            OutputFormat::Preview,
        );
        assert_eq!(controller.location().href(), "https://x.org/view/http://a.b/?title=T");

        controller.fields_mut().title = "U".to_owned();
        controller.run_update_cycle().unwrap();

        assert_eq!(controller.location().href(), "https://x.org/view/http://a.b/?title=U");
        assert!(log.calls().contains(&Call::Replace("/view/http://a.b/?title=U".to_owned())));
    }
}
