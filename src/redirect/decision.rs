//! Outcome of one redirect evaluation.

use serde::Serialize;

/// Why a request was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Disabled,
    NotSiteRequest,
    ActionRequest,
    ExcludedRoute,
    IgnoredMethod,
    UnsupportedLanguageSegment,
    NoTargetSite,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Disabled => "disabled",
            SkipReason::NotSiteRequest => "not_site_request",
            SkipReason::ActionRequest => "action_request",
            SkipReason::ExcludedRoute => "excluded_route",
            SkipReason::IgnoredMethod => "ignored_method",
            SkipReason::UnsupportedLanguageSegment => "unsupported_language_segment",
            SkipReason::NoTargetSite => "no_target_site",
        }
    }
}

/// What the host should do with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// Continue untouched.
    Skip { reason: SkipReason },

    /// Continue, but persist `language` in the cookie.
    AcceptAndTagCookie { language: String },

    /// Set the cookie, answer 302 to `target_url`, and stop.
    Redirect { target_url: String, language: String },
}

impl Decision {
    pub fn skip(reason: SkipReason) -> Self {
        Decision::Skip { reason }
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            Decision::Skip { .. } => "skip",
            Decision::AcceptAndTagCookie { .. } => "accept",
            Decision::Redirect { .. } => "redirect",
        }
    }

    /// Language to write to the cookie, if any.
    pub fn cookie_language(&self) -> Option<&str> {
        match self {
            Decision::Skip { .. } => None,
            Decision::AcceptAndTagCookie { language } | Decision::Redirect { language, .. } => {
                Some(language.as_str())
            }
        }
    }
}
