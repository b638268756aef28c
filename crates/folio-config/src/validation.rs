// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, non-empty paths, and URL shapes.

use crate::diagnostic::ConfigError;
use crate::model::FolioConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FolioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let host = config.server.host.trim();
    if host.is_empty() {
        fail("server.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "server.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.storage.database_path.trim().is_empty() {
        fail("storage.database_path must not be empty".to_string());
    }

    if config.uploads.dir.trim().is_empty() {
        fail("uploads.dir must not be empty".to_string());
    }

    let prefix = &config.uploads.url_prefix;
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        fail(format!(
            "uploads.url_prefix must start with `/` and not end with `/`, got `{prefix}`"
        ));
    }

    if config.uploads.max_bytes == 0 {
        fail("uploads.max_bytes must be greater than zero".to_string());
    }

    if let Some(dir) = &config.content.dir
        && dir.trim().is_empty()
    {
        fail("content.dir must not be empty when set".to_string());
    }

    let base_url = config.client.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        fail(format!(
            "client.base_url must start with http:// or https://, got `{base_url}`"
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&FolioConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = FolioConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "database_path"));
    }

    #[test]
    fn url_prefix_shape_is_checked() {
        for bad in ["uploads", "/", "/uploads/"] {
            let mut config = FolioConfig::default();
            config.uploads.url_prefix = bad.to_string();
            let errors = validate_config(&config).unwrap_err();
            assert!(has_error(&errors, "url_prefix"), "accepted `{bad}`");
        }
    }

    #[test]
    fn zero_max_bytes_fails_validation() {
        let mut config = FolioConfig::default();
        config.uploads.max_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "max_bytes"));
    }

    #[test]
    fn base_url_requires_http_scheme() {
        let mut config = FolioConfig::default();
        config.client.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "base_url"));
    }

    #[test]
    fn invalid_host_fails_validation() {
        let mut config = FolioConfig::default();
        config.server.host = "not a host!".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "server.host"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = FolioConfig::default();
        config.storage.database_path = String::new();
        config.uploads.dir = String::new();
        config.uploads.max_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
