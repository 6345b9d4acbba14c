//! Secret resolution: merging command-line overrides with the environment.

use crate::types::GeneratorConfig;

/// Resolves the API key for the text generator.
///
/// An explicit non-empty override wins. Otherwise the environment variable
/// named by [`GeneratorConfig::api_key_env`] is read through `lookup`. Empty
/// values count as absent.
pub fn resolve_api_key<F>(
    generator: &GeneratorConfig,
    override_key: Option<&str>,
    lookup: F,
) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    override_key
        .map(str::to_string)
        .filter(|key| !key.trim().is_empty())
        .or_else(|| lookup(&generator.api_key_env))
        .filter(|key| !key.trim().is_empty())
}
