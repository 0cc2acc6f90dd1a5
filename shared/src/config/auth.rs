//! Authentication and session configuration
//!
//! The four knobs the session core depends on (secret key, access-token
//! ttl, refresh-token ttl, cookie max-age) are independently tunable;
//! none derives from another. A cookie max-age shorter than the token
//! ttl means the client drops a still-valid credential early, which is
//! accepted behavior, not a misconfiguration.

use serde::{Deserialize, Serialize};

/// Environment variable prefix shared by all settings
const ENV_PREFIX: &str = "CHATROOMS_API_";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key used to sign tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-please-change-in-production"),
            access_token_expiry: 1800,       // 30 minutes
            refresh_token_expiry: 2_592_000, // 30 days
            issuer: String::from("chatrooms"),
            algorithm: default_algorithm(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == "development-secret-please-change-in-production"
    }
}

/// Session cookie configuration
///
/// The cookie max-age is the client-side lifetime of the transport
/// wrapper and is independent of the token expiry it carries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Cookie max-age in seconds
    pub cookie_max_age: i64,

    /// Name of the access token cookie
    pub access_cookie_name: String,

    /// Name of the refresh token cookie
    pub refresh_cookie_name: String,

    /// Cookie path scope
    pub path: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: String,

    /// Session cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_max_age: 7200, // 2 hours
            access_cookie_name: String::from("chatrooms_access"),
            refresh_cookie_name: String::from("chatrooms_refresh"),
            path: String::from("/"),
            secure: false, // Set to true in production
            same_site: String::from("Lax"),
            http_only: default_http_only(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AuthConfig {
    /// Create from environment variables
    ///
    /// Reads `CHATROOMS_API_SECRET_KEY`, `CHATROOMS_API_ACCESS_TOKEN_EXPIRES`,
    /// `CHATROOMS_API_REFRESH_TOKEN_EXPIRES` and `CHATROOMS_API_COOKIE_MAX_AGE`,
    /// falling back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        // Load a .env file when present, mirroring the deployment setup.
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            jwt: JwtConfig {
                secret: env_var("SECRET_KEY").unwrap_or(defaults.jwt.secret),
                access_token_expiry: env_parsed("ACCESS_TOKEN_EXPIRES")
                    .unwrap_or(defaults.jwt.access_token_expiry),
                refresh_token_expiry: env_parsed("REFRESH_TOKEN_EXPIRES")
                    .unwrap_or(defaults.jwt.refresh_token_expiry),
                issuer: defaults.jwt.issuer,
                algorithm: defaults.jwt.algorithm,
            },
            session: SessionConfig {
                cookie_max_age: env_parsed("COOKIE_MAX_AGE")
                    .unwrap_or(defaults.session.cookie_max_age),
                ..defaults.session
            },
        }
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.jwt.access_token_expiry
    }

    /// Get refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.jwt.refresh_token_expiry
    }
}

fn env_var(suffix: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{suffix}")).ok()
}

fn env_parsed(suffix: &str) -> Option<i64> {
    env_var(suffix).and_then(|v| v.parse().ok())
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_http_only() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 2_592_000);
        assert_eq!(config.algorithm, "HS256");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry(30)
            .with_refresh_expiry(86_400);

        assert_eq!(config.access_token_expiry, 30);
        assert_eq!(config.refresh_token_expiry, 86_400);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_max_age, 7200);
        assert_eq!(config.access_cookie_name, "chatrooms_access");
        assert_eq!(config.refresh_cookie_name, "chatrooms_refresh");
        assert!(config.http_only);
        assert!(!config.secure);
    }

    #[test]
    fn test_auth_config_accessors() {
        let config = AuthConfig {
            jwt: JwtConfig::new("accessor-secret")
                .with_access_expiry(60)
                .with_refresh_expiry(120),
            session: SessionConfig::default(),
        };

        assert_eq!(config.jwt_secret(), "accessor-secret");
        assert_eq!(config.access_token_expiry_seconds(), 60);
        assert_eq!(config.refresh_token_expiry_seconds(), 120);
    }

    #[test]
    fn test_cookie_max_age_independent_of_token_ttls() {
        let config = AuthConfig {
            jwt: JwtConfig::default().with_access_expiry(30),
            session: SessionConfig {
                cookie_max_age: 10,
                ..Default::default()
            },
        };

        // Shorter cookie lifetime than token ttl is a valid configuration.
        assert!(config.session.cookie_max_age < config.jwt.access_token_expiry);
    }
}
