//! Language preference cookie.

use chrono::{DateTime, Duration, Utc};

/// Cookie lifetime: one year.
pub const COOKIE_MAX_AGE_SECS: i64 = 31_536_000;

/// The single cookie the engine persists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCookie {
    pub name: String,
    pub value: String,
    pub secure: bool,
}

impl LanguageCookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secure,
        }
    }

    /// `Set-Cookie` value expiring one year from now.
    pub fn header_value(&self) -> String {
        self.header_value_at(Utc::now())
    }

    pub fn header_value_at(&self, now: DateTime<Utc>) -> String {
        let expires = now + Duration::seconds(COOKIE_MAX_AGE_SECS);
        let mut value = format!(
            "{}={}; Expires={}; Max-Age={}; Path=/",
            self.name,
            self.value,
            expires.format("%a, %d %b %Y %H:%M:%S GMT"),
            COOKIE_MAX_AGE_SECS,
        );
        if self.secure {
            value.push_str("; Secure");
        }
        value.push_str("; HttpOnly; SameSite=Lax");
        value
    }
}

/// Value of cookie `name` in a `Cookie` request header.
pub fn cookie_value<'h>(header: &'h str, name: &str) -> Option<&'h str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
}
