//! Checks on configured values before they reach SQL or the router.

use crate::error::ConfigError;
use regex::Regex;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("static identifier pattern"))
}

/// Schema and table names are interpolated into statements, so only plain identifiers are accepted.
pub fn validate_identifier(var: &'static str, value: &str) -> Result<(), ConfigError> {
    if identifier_re().is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            var,
            reason: format!("'{}' is not a plain SQL identifier", value),
        })
    }
}

/// Normalizes a base path to a leading slash and no trailing slash. `/` alone is rejected since routes nest under it.
pub fn normalize_base_path(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid {
            var,
            reason: "base path must not be empty or '/'".into(),
        });
    }
    if trimmed.contains(char::is_whitespace) {
        return Err(ConfigError::Invalid {
            var,
            reason: format!("'{}' contains whitespace", value),
        });
    }
    Ok(if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(validate_identifier("MALL_TABLE", "centrocomercial").is_ok());
        assert!(validate_identifier("MALL_TABLE", "_malls_2").is_ok());
    }

    #[test]
    fn rejects_quoted_or_dotted_identifiers() {
        assert!(validate_identifier("MALL_TABLE", "malls\"; DROP").is_err());
        assert!(validate_identifier("MALL_SCHEMA", "a.b").is_err());
        assert!(validate_identifier("MALL_SCHEMA", "1abc").is_err());
        assert!(validate_identifier("MALL_SCHEMA", "").is_err());
    }

    #[test]
    fn base_path_is_normalized() {
        assert_eq!(normalize_base_path("BASE_PATH", "api/malls/").unwrap(), "/api/malls");
        assert_eq!(normalize_base_path("BASE_PATH", "/api/centrocomercial").unwrap(), "/api/centrocomercial");
        assert!(normalize_base_path("BASE_PATH", "/").is_err());
        assert!(normalize_base_path("BASE_PATH", "/a b").is_err());
    }
}
