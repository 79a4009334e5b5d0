//! Environment variable expansion for configuration strings.
//!
//! Supports `${VAR}`, which expands to the value of VAR and errors if unset.

use crate::ConfigError;

/// Expand `${VAR}` references in `value` using `lookup` to resolve variables.
///
/// Returns the original string unchanged if no `${` appears in it.
pub(crate) fn expand_env<F>(value: &str, field: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        lookup(var).map(Some).ok_or_else(|| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
#[derive(Debug)]
struct LookupError {
    var_name: String,
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not set", self.var_name)
    }
}

impl std::error::Error for LookupError {}
