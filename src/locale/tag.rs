//! Locale id validation.
//!
//! A valid id parses as a BCP-47 language identifier whose language subtag
//! is a known ISO 639-1 code or a three-letter code with locale data, with an
//! optional script subtag (`Hans`) and/or region subtag (`BE`, `419`).

use unic_langid::LanguageIdentifier;

/// ISO 639-1 two-letter language codes.
const ISO_639_1: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi",
    "fj", "fo", "fr", "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr",
    "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", "ja",
    "jv", "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw",
    "ky", "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml",
    "mn", "mr", "ms", "mt", "my", "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv",
    "ny", "oc", "oj", "om", "or", "os", "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro",
    "ru", "rw", "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr",
    "ss", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr",
    "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi",
    "yo", "za", "zh", "zu",
];

/// Three-letter language codes with locale data of their own.
const THREE_LETTER: &[&str] = &[
    "agq", "ann", "asa", "ast", "bas", "bem", "bez", "bgc", "bho", "blo", "brx", "ccp", "ceb",
    "cgg", "chr", "ckb", "csw", "dav", "dje", "doi", "dsb", "dua", "dyo", "ebu", "ewo", "fil",
    "fur", "gaa", "gsw", "guz", "haw", "hsb", "jgo", "jmc", "kab", "kam", "kde", "kea", "kgp",
    "khq", "kkj", "kln", "kok", "ksb", "ksf", "ksh", "lag", "lij", "lkt", "lmo", "lrc", "luo",
    "luy", "mai", "mas", "mdf", "mer", "mfe", "mgh", "mgo", "mni", "moh", "mua", "mus", "myv",
    "mzn", "naq", "nds", "nmg", "nnh", "nqo", "nso", "nus", "nyn", "pcm", "pis", "prg", "quc",
    "raj", "rof", "rwk", "sah", "saq", "sat", "sbp", "scn", "sdh", "seh", "ses", "shi", "shn",
    "sma", "smj", "smn", "sms", "syr", "szl", "teo", "tok", "tpi", "trv", "twq", "tzm", "vai",
    "vec", "vmw", "vun", "wae", "xnr", "xog", "yav", "yrl", "yue", "zgh", "zza",
];

/// Parsed form of `code` when it is a locale id this or any other deployment could serve.
///
/// Case-insensitive; `-` is the only accepted separator and variants are rejected.
pub fn parse_language_code(code: &str) -> Option<LanguageIdentifier> {
    if code.contains('_') {
        return None;
    }
    let langid: LanguageIdentifier = code.parse().ok()?;
    if langid.variants().next().is_some() {
        return None;
    }

    let language = langid.language.as_str();
    let known = match language.len() {
        2 => ISO_639_1.binary_search(&language).is_ok(),
        3 => THREE_LETTER.binary_search(&language).is_ok(),
        _ => false,
    };
    known.then_some(langid)
}

pub fn is_valid_language_code(code: &str) -> bool {
    parse_language_code(code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_sorted() {
        assert!(ISO_639_1.windows(2).all(|w| w[0] < w[1]));
        assert!(THREE_LETTER.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_plain_codes() {
        assert!(is_valid_language_code("en"));
        assert!(is_valid_language_code("de"));
        assert!(is_valid_language_code("NL"));
        assert!(!is_valid_language_code("xx"));
        assert!(!is_valid_language_code(""));
    }

    #[test]
    fn test_ordinary_path_segments_are_not_languages() {
        for segment in ["about", "blog", "faq", "api", "news", "e", "contact-us"] {
            assert!(!is_valid_language_code(segment), "{segment}");
        }
    }

    #[test]
    fn test_region_and_script() {
        assert!(is_valid_language_code("en-US"));
        assert!(is_valid_language_code("fr-be"));
        assert!(is_valid_language_code("es-419"));
        assert!(is_valid_language_code("zh-Hans"));
        assert!(is_valid_language_code("zh-Hant-TW"));
        assert!(!is_valid_language_code("en-"));
        assert!(!is_valid_language_code("en_US"));
        assert!(!is_valid_language_code("en-US-x"));
        assert!(!is_valid_language_code("en-TW-Hant"));
        assert!(!is_valid_language_code("de-CH-1996"));
    }

    #[test]
    fn test_three_letter_languages() {
        for code in ["fil", "haw", "yue", "ast", "ckb", "gsw-CH", "yue-Hant-HK"] {
            assert!(is_valid_language_code(code), "{code}");
        }
        assert!(!is_valid_language_code("abc"));
        assert!(!is_valid_language_code("und"));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let langid = parse_language_code("ZH-hant-tw").unwrap();
        assert_eq!(langid.to_string(), "zh-Hant-TW");
    }
}
