//! `${VAR}` and `${VAR:-default}` expansion for config strings.

use crate::ConfigError;

/// Name of a variable that was referenced but not set.
struct MissingVar(String);

/// Expand `${VAR}` references in `value`.
///
/// Bare `$VAR` is left alone, so URLs containing `$` pass through.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| {
        std::env::var(name)
            .map(Some)
            .map_err(|_| MissingVar(name.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}
