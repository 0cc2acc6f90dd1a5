//! Cookie transport for session tokens
//!
//! Maps token pairs to and from HTTP cookie headers without
//! interpreting the tokens themselves. The cookie max-age is the
//! client-side lifetime of the wrapper and deliberately independent of
//! the token expiry inside it.

use cookie::time::Duration as CookieDuration;
use cookie::{Cookie, SameSite};

use cr_shared::config::SessionConfig;

use crate::domain::entities::TokenPair;

/// Raw token values extracted from a request's cookie header
#[derive(Debug, Default, Clone)]
pub struct SessionCookies {
    /// Access token value, if the access cookie was present
    pub access: Option<String>,
    /// Refresh token value, if the refresh cookie was present
    pub refresh: Option<String>,
}

/// Encodes and decodes session cookies
#[derive(Debug, Clone)]
pub struct SessionTransport {
    config: SessionConfig,
}

impl SessionTransport {
    /// Create a transport from session cookie configuration
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Build the access and refresh cookies carrying a token pair
    pub fn encode(&self, pair: &TokenPair) -> (Cookie<'static>, Cookie<'static>) {
        (
            self.build_cookie(self.config.access_cookie_name.clone(), pair.access_token.clone()),
            self.build_cookie(
                self.config.refresh_cookie_name.clone(),
                pair.refresh_token.clone(),
            ),
        )
    }

    /// Extract session token values from a `Cookie` request header
    ///
    /// Unparseable fragments and unrelated cookies are skipped; a header
    /// with neither session cookie yields an empty result, not an error.
    pub fn decode(&self, cookie_header: &str) -> SessionCookies {
        let mut cookies = SessionCookies::default();

        for cookie in Cookie::split_parse(cookie_header.to_owned()).flatten() {
            if cookie.name() == self.config.access_cookie_name {
                cookies.access = Some(cookie.value().to_owned());
            } else if cookie.name() == self.config.refresh_cookie_name {
                cookies.refresh = Some(cookie.value().to_owned());
            }
        }

        cookies
    }

    /// Build expired cookies that instruct the client to drop the session
    pub fn removal(&self) -> (Cookie<'static>, Cookie<'static>) {
        let mut access = self.build_cookie(self.config.access_cookie_name.clone(), String::new());
        let mut refresh = self.build_cookie(self.config.refresh_cookie_name.clone(), String::new());
        access.make_removal();
        refresh.make_removal();
        (access, refresh)
    }

    fn build_cookie(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .http_only(self.config.http_only)
            .secure(self.config.secure)
            .path(self.config.path.clone())
            .same_site(self.same_site())
            .max_age(CookieDuration::seconds(self.config.cookie_max_age))
            .build()
    }

    fn same_site(&self) -> SameSite {
        match self.config.same_site.as_str() {
            "Strict" => SameSite::Strict,
            "None" => SameSite::None,
            _ => SameSite::Lax,
        }
    }
}

/// Extract a bearer token from an `Authorization` header value
///
/// # Returns
/// The token without the `Bearer ` prefix, or `None` if the header
/// does not follow the scheme.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
