//! Credential providers.
//!
//! The `Api` wrapper asks its provider for a token on every call, so a
//! provider backed by a cookie store sees logins and logouts without the
//! wrapper being rebuilt.

/// Name of the cookie holding the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Source of the opaque token sent as the `authorization` header.
pub trait CredentialProvider {
    /// The current token, or `None` when the user is unauthenticated.
    fn credential(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String>,
{
    fn credential(&self) -> Option<String> {
        self()
    }
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential(pub Option<String>);

impl StaticCredential {
    pub fn token(token: &str) -> Self {
        Self(Some(token.to_string()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticCredential {
    fn credential(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the token out of a `document.cookie`-style string
/// (`name=value; other=value`).
#[derive(Debug, Clone)]
pub struct CookieCredential {
    cookies: String,
    name: String,
}

impl CookieCredential {
    pub fn new(cookies: &str) -> Self {
        Self::named(cookies, ACCESS_TOKEN_COOKIE)
    }

    pub fn named(cookies: &str, name: &str) -> Self {
        Self {
            cookies: cookies.to_string(),
            name: name.to_string(),
        }
    }
}

impl CredentialProvider for CookieCredential {
    fn credential(&self) -> Option<String> {
        cookie_value(&self.cookies, &self.name)
    }
}

/// Value of the first cookie called `name`. Empty values count as absent.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}
