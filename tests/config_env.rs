//! Environment overrides read by the real process environment.
//!
//! Kept in its own test binary: it mutates process-wide state.

use locale_redirect::config::{parse_config, COOKIE_NAME_ENV};

const CONFIG: &str = r#"
[redirect]
cookie_name = "lang"
"#;

#[test]
fn test_cookie_name_follows_environment() {
    std::env::set_var(COOKIE_NAME_ENV, "site_lang");
    let overridden = parse_config(CONFIG).unwrap();

    std::env::set_var(COOKIE_NAME_ENV, "  ");
    let blank = parse_config(CONFIG).unwrap();

    std::env::remove_var(COOKIE_NAME_ENV);
    let unset = parse_config(CONFIG).unwrap();

    assert_eq!(overridden.redirect.cookie_name, "site_lang");
    assert_eq!(blank.redirect.cookie_name, "lang");
    assert_eq!(unset.redirect.cookie_name, "lang");
}
