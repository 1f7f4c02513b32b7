//! Remote store configuration.
//!
//! # Responsibility
//! - Resolve the remote base URL and access key from the environment.
//! - Fail fast in production when the remote is unconfigured; fall back
//!   to no remote (in-memory repository) in development.
//!
//! # Invariants
//! - Resolution is a pure function of its inputs; `from_env` only reads
//!   the process environment and delegates.

use std::error::Error;
use std::fmt::{Display, Formatter};
use url::Url;

/// Environment variable holding the remote base URL.
pub const REMOTE_URL_VAR: &str = "TASKPAD_REMOTE_URL";
/// Environment variable holding the remote access key.
pub const REMOTE_KEY_VAR: &str = "TASKPAD_REMOTE_KEY";
/// Environment variable selecting the runtime profile.
pub const ENV_VAR: &str = "TASKPAD_ENV";

/// Runtime profile controlling how missing configuration is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Production,
    Development,
}

impl Profile {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Connection settings for the hosted database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub base_url: Url,
    pub api_key: String,
}

#[derive(Debug)]
pub enum ConfigError {
    /// Production requires both remote variables.
    MissingRemote { missing: &'static str },
    /// The configured base URL does not parse.
    InvalidUrl { value: String, source: url::ParseError },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRemote { missing } => write!(
                f,
                "missing remote store configuration for production: set {missing} \
                 (both {REMOTE_URL_VAR} and {REMOTE_KEY_VAR} are required)"
            ),
            Self::InvalidUrl { value, source } => {
                write!(f, "invalid remote base URL `{value}`: {source}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingRemote { .. } => None,
            Self::InvalidUrl { source, .. } => Some(source),
        }
    }
}

impl RemoteConfig {
    /// Resolves remote configuration from the process environment.
    ///
    /// Returns `Ok(None)` in development when the remote is not
    /// configured; the caller is expected to substitute the in-memory
    /// repository.
    ///
    /// # Errors
    /// - `MissingRemote` in production when either variable is absent.
    /// - `InvalidUrl` when the URL variable does not parse.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        resolve(
            env_value(REMOTE_URL_VAR),
            env_value(REMOTE_KEY_VAR),
            Profile::from_env_value(env_value(ENV_VAR).as_deref()),
        )
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Pure resolution core shared by `from_env` and tests.
fn resolve(
    url: Option<String>,
    key: Option<String>,
    profile: Profile,
) -> Result<Option<RemoteConfig>, ConfigError> {
    match (url, key) {
        (Some(url), Some(api_key)) => {
            let base_url = Url::parse(&url).map_err(|source| ConfigError::InvalidUrl {
                value: url,
                source,
            })?;
            Ok(Some(RemoteConfig { base_url, api_key }))
        }
        (None, Some(_)) if profile == Profile::Production => Err(ConfigError::MissingRemote {
            missing: REMOTE_URL_VAR,
        }),
        (Some(_), None) if profile == Profile::Production => Err(ConfigError::MissingRemote {
            missing: REMOTE_KEY_VAR,
        }),
        (None, None) if profile == Profile::Production => Err(ConfigError::MissingRemote {
            missing: REMOTE_URL_VAR,
        }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve, ConfigError, Profile};

    fn url() -> Option<String> {
        Some("https://db.example.com".to_string())
    }

    fn key() -> Option<String> {
        Some("service-key".to_string())
    }

    #[test]
    fn resolves_when_both_present() {
        let config = resolve(url(), key(), Profile::Production)
            .unwrap()
            .unwrap();
        assert_eq!(config.base_url.as_str(), "https://db.example.com/");
        assert_eq!(config.api_key, "service-key");
    }

    #[test]
    fn development_tolerates_missing_remote() {
        assert!(resolve(None, None, Profile::Development).unwrap().is_none());
        assert!(resolve(url(), None, Profile::Development).unwrap().is_none());
    }

    #[test]
    fn production_fails_fast_when_unconfigured() {
        for (u, k) in [(None, None), (url(), None), (None, key())] {
            let err = resolve(u, k, Profile::Production).unwrap_err();
            assert!(matches!(err, ConfigError::MissingRemote { .. }));
        }
    }

    #[test]
    fn invalid_url_is_rejected_in_any_profile() {
        let err = resolve(
            Some("not a url".to_string()),
            key(),
            Profile::Development,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn profile_parsing_defaults_to_development() {
        assert_eq!(
            Profile::from_env_value(Some("Production")),
            Profile::Production
        );
        assert_eq!(Profile::from_env_value(Some("staging")), Profile::Development);
        assert_eq!(Profile::from_env_value(None), Profile::Development);
    }
}
