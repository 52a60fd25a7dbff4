//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `redirect.cookie_name`.
pub const COOKIE_NAME_ENV: &str = "LOCALE_REDIRECT_COOKIE_NAME";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse, apply environment overrides, and validate.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    parse_config_with_env(content, |key| std::env::var(key).ok())
}

/// [`parse_config`] with an explicit environment lookup.
pub fn parse_config_with_env(
    content: &str,
    env: impl Fn(&str) -> Option<String>,
) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config, env);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Blank values are ignored.
fn apply_env_overrides(config: &mut GatewayConfig, env: impl Fn(&str) -> Option<String>) {
    if let Some(name) = env(COOKIE_NAME_ENV) {
        let name = name.trim();
        if !name.is_empty() {
            config.redirect.cookie_name = name.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sites::{GroupId, SiteId};

    const SAMPLE: &str = r#"
default_site = 1

[listener]
bind_address = "127.0.0.1:8080"

[redirect]
enabled = true
cookie_name = "lang"

[[redirect.primary_sites]]
group = 1
site = 1

[[redirect.global_excluded_routes]]
route = "/robots.txt"

[[redirect.global_excluded_routes]]
route = "/api/*"

[[redirect.groups]]
group = 1
disabled_sites = [3]
excluded_routes = [{ route = "/special-page" }]

[[sites]]
id = 1
group = 1
language = "en"
base_url = "https://brand.test/en/"

[[sites]]
id = 2
group = 1
language = "fr"
base_url = "https://brand.test/fr/"

[[sites]]
id = 3
group = 1
language = "de"
base_url = "https://brand.test/de/"
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert!(config.redirect.enabled);
        assert_eq!(config.sites.len(), 3);
        assert_eq!(config.sites[1].group_id, GroupId(1));
        assert_eq!(config.default_site, Some(SiteId(1)));
        assert_eq!(config.redirect.global_excluded_routes.len(), 2);
        assert_eq!(config.redirect.groups[0].disabled_sites, Some(vec![SiteId(3)]));
        // Untouched sections keep their defaults
        assert_eq!(config.request.cp_trigger, "admin");
        assert_eq!(config.redirect.http_methods_ignored.len(), 4);
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/locale-redirect.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.sites.len(), 4);
        assert_eq!(config.upstream.address.as_deref(), Some("127.0.0.1:3000"));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = parse_config("").unwrap();
        assert!(!config.redirect.enabled);
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_validation_errors_surface() {
        let err = parse_config("[redirect]\ncookie_name = \"1bad\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().contains("1bad"));
    }

    #[test]
    fn test_cookie_name_env_override() {
        let env = |key: &str| (key == COOKIE_NAME_ENV).then(|| " site_lang ".to_string());
        let config = parse_config_with_env(SAMPLE, env).unwrap();
        assert_eq!(config.redirect.cookie_name, "site_lang");
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        for value in ["", "   "] {
            let config = parse_config_with_env(SAMPLE, |_| Some(value.to_string())).unwrap();
            assert_eq!(config.redirect.cookie_name, "lang");
        }
        let config = parse_config_with_env(SAMPLE, |_| None).unwrap();
        assert_eq!(config.redirect.cookie_name, "lang");
    }

    #[test]
    fn test_env_override_is_validated() {
        let err = parse_config_with_env(SAMPLE, |_| Some("bad name".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_syntax_errors_surface() {
        let err = parse_config("[redirect\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
