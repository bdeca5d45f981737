//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Strings without `${` are returned unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    // shellexpand reports a lookup error before considering `:-default`, so
    // the context cannot fail on unset variables. Required references are
    // checked against the input instead, then expansion runs without errors.
    if let Some(var) = required_vars(value).find(|var| std::env::var(var).is_err()) {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        });
    }

    let expanded =
        shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).into_owned();

    Ok(expanded)
}

/// Names referenced as `${VAR}` without a default value.
fn required_vars(value: &str) -> impl Iterator<Item = &str> {
    value.split("${").skip(1).filter_map(|rest| {
        let name = &rest[..rest.find('}')?];
        (!name.contains(":-")).then_some(name)
    })
}
