//! Per-request input to the engine.

use crate::sites::Site;

/// How the host classified the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestKind {
    /// Public content, as opposed to back office or API internals.
    pub is_site_request: bool,

    /// Internal action dispatch (form posts, controller actions).
    pub is_action_request: bool,
}

impl Default for RequestKind {
    fn default() -> Self {
        Self {
            is_site_request: true,
            is_action_request: false,
        }
    }
}

/// Everything the engine reads about one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    host_info: String,
    path: String,
    path_info: String,
    absolute_url: String,
    http_method: String,
    language_cookie: Option<String>,
    accept_language: Option<String>,
    is_secure: bool,
    kind: RequestKind,
    current_site: Site,
}

impl RequestContext {
    /// `host_info` is `scheme://host[:port]`, `path_and_query` starts with `/`.
    pub fn new(host_info: impl Into<String>, path_and_query: &str, current_site: Site) -> Self {
        let host_info = host_info.into();
        let path = path_and_query
            .split(['?', '#'])
            .next()
            .filter(|p| !p.is_empty())
            .unwrap_or("/")
            .to_string();
        let path_info = path.trim_matches('/').to_string();
        let absolute_url = format!("{host_info}{path_and_query}");
        let is_secure = host_info.starts_with("https://");

        Self {
            host_info,
            path,
            path_info,
            absolute_url,
            http_method: "GET".to_string(),
            language_cookie: None,
            accept_language: None,
            is_secure,
            kind: RequestKind::default(),
            current_site,
        }
    }

    /// Build from an absolute URL; `None` if it does not parse or has no host.
    pub fn from_url(url: &str, current_site: Site) -> Option<Self> {
        let parsed = url::Url::parse(url).ok()?;
        parsed.host_str()?;
        let host_info = parsed.origin().ascii_serialization();
        Some(Self::new(host_info, &parsed[url::Position::BeforePath..], current_site))
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.http_method = method.into().to_ascii_uppercase();
        self
    }

    pub fn with_language_cookie(mut self, value: Option<String>) -> Self {
        self.language_cookie = value.filter(|v| !v.is_empty());
        self
    }

    pub fn with_accept_language(mut self, header: Option<String>) -> Self {
        self.accept_language = header;
        self
    }

    pub fn with_kind(mut self, kind: RequestKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.is_secure = secure;
        self
    }

    pub fn host_info(&self) -> &str {
        &self.host_info
    }

    /// Request path as received, e.g. `/fr/about/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path without surrounding slashes, e.g. `fr/about`.
    pub fn path_info(&self) -> &str {
        &self.path_info
    }

    /// First segment of the path info, if any.
    pub fn first_segment(&self) -> Option<&str> {
        self.path_info.split('/').next().filter(|s| !s.is_empty())
    }

    pub fn absolute_url(&self) -> &str {
        &self.absolute_url
    }

    pub fn http_method(&self) -> &str {
        &self.http_method
    }

    pub fn language_cookie(&self) -> Option<&str> {
        self.language_cookie.as_deref()
    }

    pub fn accept_language(&self) -> Option<&str> {
        self.accept_language.as_deref()
    }

    pub fn is_secure(&self) -> bool {
        self.is_secure
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn current_site(&self) -> &Site {
        &self.current_site
    }

    /// Override the host's site resolution.
    pub fn set_current_site(&mut self, site: Site) {
        self.current_site = site;
    }
}
