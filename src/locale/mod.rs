//! Language code handling.
//!
//! # Data Flow
//! ```text
//! URL segment / cookie value
//!     → tag.rs (is this a syntactically valid locale id?)
//!
//! Accept-Language header + supported languages
//!     → negotiate.rs (quality-weighted range matching)
//!     → best supported language, or the first candidate
//! ```
//!
//! # Design Decisions
//! - Supported-language membership is exact string equality elsewhere;
//!   only negotiation folds case and region subtags
//! - Malformed input never errors, it simply fails to match

pub mod negotiate;
pub mod tag;

pub use negotiate::{negotiate, reorder_primary_first, AcceptLanguage, LanguageRange};
pub use tag::{is_valid_language_code, parse_language_code};
