//! Environment variable lookups.

/// Environment variable consulted for the base URL when no flag or config file sets one.
pub const BASE_URL_ENV_VAR: &str = "SITEMAP_BASE_URL";

/// The value of the environment variable, if it is set and not blank.
pub fn non_empty_env(env_var: &str) -> Option<String> {
    match std::env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => Some(val.trim().to_string()),
        _ => None,
    }
}

/// The base URL from `SITEMAP_BASE_URL`, if set.
pub fn base_url_from_env() -> Option<String> {
    non_empty_env(BASE_URL_ENV_VAR)
}
