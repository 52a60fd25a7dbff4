//! `Accept-Language` parsing and negotiation.
//!
//! # Responsibilities
//! - Parse quality-weighted language ranges
//! - Pick the best candidate from an ordered list of supported languages
//!
//! # Design Decisions
//! - Ranges and candidates are compared as `LanguageIdentifier`s, each side
//!   acting as a range, so `fr` and `fr-FR` match each other
//! - Ties at one quality level go to the earliest candidate, not header order
//! - Missing or malformed `q` counts as 1.0; `q=0` means "not acceptable"

use fluent_langneg::accepted_languages;
use unic_langid::LanguageIdentifier;

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// `None` for the `*` wildcard.
    pub language: Option<LanguageIdentifier>,
    pub quality: f32,
}

impl LanguageRange {
    fn matches(&self, candidate: Option<&LanguageIdentifier>) -> bool {
        match (&self.language, candidate) {
            (None, _) => true,
            (Some(range), Some(candidate)) => range.matches(candidate, true, true),
            (Some(_), None) => false,
        }
    }
}

/// Parsed `Accept-Language` header, sorted by descending quality.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptLanguage {
    ranges: Vec<LanguageRange>,
}

impl AcceptLanguage {
    pub fn parse(header: &str) -> Self {
        let mut ranges: Vec<LanguageRange> = header
            .split(',')
            .filter_map(|entry| {
                let mut params = entry.split(';');
                let tag = params.next()?.trim();
                if tag.is_empty() {
                    return None;
                }

                let quality = params
                    .find_map(|p| {
                        let p = p.trim();
                        p.strip_prefix("q=").or_else(|| p.strip_prefix("Q="))
                    })
                    .map(|q| q.trim().parse::<f32>().unwrap_or(1.0))
                    .unwrap_or(1.0);
                let quality = if quality.is_nan() { 1.0 } else { quality.clamp(0.0, 1.0) };

                if quality <= 0.0 {
                    return None;
                }

                let language = if tag == "*" {
                    None
                } else {
                    Some(accepted_languages::parse(tag).into_iter().next()?)
                };
                Some(LanguageRange { language, quality })
            })
            .collect();

        // Vec::sort_by is stable, header order survives within a quality level
        ranges.sort_by(|a, b| b.quality.total_cmp(&a.quality));
        Self { ranges }
    }

    pub fn ranges(&self) -> &[LanguageRange] {
        &self.ranges
    }
}

/// Best candidate for `accept`, or `None` when nothing acceptable is supported.
pub fn negotiate<'a, S: AsRef<str>>(
    accept: &AcceptLanguage,
    candidates: &'a [S],
) -> Option<&'a str> {
    let parsed: Vec<Option<LanguageIdentifier>> = candidates
        .iter()
        .map(|candidate| candidate.as_ref().parse().ok())
        .collect();

    let ranges = accept.ranges();
    let mut start = 0;

    while start < ranges.len() {
        let quality = ranges[start].quality;
        let end = ranges[start..]
            .iter()
            .position(|r| r.quality != quality)
            .map_or(ranges.len(), |offset| start + offset);
        let level = &ranges[start..end];

        let best = candidates
            .iter()
            .zip(&parsed)
            .find(|(_, langid)| level.iter().any(|range| range.matches(langid.as_ref())))
            .map(|(candidate, _)| candidate.as_ref());
        if best.is_some() {
            return best;
        }
        start = end;
    }
    None
}

/// Moves `primary` to the front if present, keeping the rest in order.
pub fn reorder_primary_first(mut candidates: Vec<String>, primary: &str) -> Vec<String> {
    if let Some(index) = candidates.iter().position(|c| c == primary) {
        let primary = candidates.remove(index);
        candidates.insert(0, primary);
    }
    candidates
}
