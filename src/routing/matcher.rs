//! Route exclusion matching.
//!
//! # Responsibilities
//! - Normalize request paths and configured patterns
//! - Match exact routes and `*` wildcard routes
//! - Merge global and per-group pattern lists

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::sites::GroupId;

/// A configured exclusion, e.g. `{ route = "/api/*" }`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RoutePattern {
    pub route: String,
}

impl RoutePattern {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }
}

/// Trait for matching a normalized path against one pattern.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the normalized path matches.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one normalized path exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    route: String,
}

impl ExactMatcher {
    pub fn new(route: &str) -> Self {
        Self {
            route: normalize_path(route),
        }
    }
}

impl PathMatcher for ExactMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.route
    }
}

/// Anchored glob: literal pieces separated by `*`.
#[derive(Debug, Clone)]
pub struct WildcardMatcher {
    pieces: Vec<String>,
}

impl WildcardMatcher {
    pub fn new(route: &str) -> Self {
        Self {
            pieces: normalize_path(route).split('*').map(str::to_string).collect(),
        }
    }
}

impl PathMatcher for WildcardMatcher {
    fn matches(&self, path: &str) -> bool {
        // A pattern with at least one `*` always splits into two or more pieces
        let (first, rest) = match self.pieces.split_first() {
            Some(split) => split,
            None => return false,
        };
        let (last, middle) = match rest.split_last() {
            Some(split) => split,
            None => return path == first,
        };

        let Some(mut remaining) = path.strip_prefix(first.as_str()) else {
            return false;
        };
        for piece in middle {
            match remaining.find(piece.as_str()) {
                Some(index) => remaining = &remaining[index + piece.len()..],
                None => return false,
            }
        }
        remaining.ends_with(last.as_str())
    }
}

/// Ordered set of compiled exclusion patterns.
#[derive(Debug, Default)]
pub struct RouteExclusionMatcher {
    matchers: Vec<Box<dyn PathMatcher>>,
}

impl RouteExclusionMatcher {
    pub fn compile(patterns: &[RoutePattern]) -> Self {
        let matchers = patterns
            .iter()
            .map(|pattern| -> Box<dyn PathMatcher> {
                if pattern.route.contains('*') {
                    Box::new(WildcardMatcher::new(&pattern.route))
                } else {
                    Box::new(ExactMatcher::new(&pattern.route))
                }
            })
            .collect();
        Self { matchers }
    }

    /// True if any pattern matches `path`; stops at the first match.
    pub fn is_excluded(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.matchers.iter().any(|m| m.matches(&path))
    }
}

/// One-shot helper: compile `patterns` and test `path`.
pub fn is_excluded(path: &str, patterns: &[RoutePattern]) -> bool {
    RouteExclusionMatcher::compile(patterns).is_excluded(path)
}

/// `/` + path trimmed of surrounding whitespace and slashes; root is `/`.
pub fn normalize_path(path: &str) -> String {
    format!("/{}", path.trim().trim_matches('/'))
}

/// Global patterns followed by the group's own, cleaned and deduplicated.
pub fn excluded_routes_for(
    group: GroupId,
    global: &[RoutePattern],
    by_group: &HashMap<GroupId, Vec<RoutePattern>>,
) -> Vec<RoutePattern> {
    let group_patterns = by_group.get(&group).map(Vec::as_slice).unwrap_or_default();
    let mut seen = HashSet::new();

    global
        .iter()
        .chain(group_patterns)
        .filter_map(|pattern| {
            let route = pattern.route.trim();
            (!route.is_empty() && route.starts_with('/')).then(|| RoutePattern::new(route))
        })
        .filter(|pattern| seen.insert(pattern.route.clone()))
        .collect()
}
