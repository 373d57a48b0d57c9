//! Output format selection and render dispatch.

use std::fmt;
use std::str::FromStr;

use livedoc_renderer::RenderFormat;

/// The output mode chosen by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Rendered HTML shown as live markup.
    #[default]
    Preview,
    /// LaTeX source shown as text.
    Latex,
    /// HTML source shown as text.
    Html,
}

/// How the output surface should treat a rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Treatment {
    /// Interpret the output as markup.
    Markup,
    /// Show the output verbatim.
    Text,
}

impl OutputFormat {
    /// Every selectable format, in control order.
    pub const ALL: [Self; 3] = [Self::Preview, Self::Latex, Self::Html];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Latex => "latex",
            Self::Html => "html",
        }
    }

    /// Renderer representation requested for this format.
    #[must_use]
    pub fn render_format(self) -> RenderFormat {
        match self {
            Self::Preview | Self::Html => RenderFormat::Html,
            Self::Latex => RenderFormat::Latex,
        }
    }

    /// Class tag written on the output surface. Preview uses the default (empty) class.
    #[must_use]
    pub fn surface_class(self) -> &'static str {
        match self {
            Self::Preview => "",
            Self::Latex => "latex",
            Self::Html => "html",
        }
    }

    #[must_use]
    pub fn treatment(self) -> Treatment {
        match self {
            Self::Preview => Treatment::Markup,
            Self::Latex | Self::Html => Treatment::Text,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A format control value outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown output format '{0}' (expected preview, latex or html)")]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_owned()))
    }
}
