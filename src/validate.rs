//! Input validation for common web form fields.
//!
//! Validators return the trimmed input on success so callers can store the
//! normalized value directly.

use regex_lite::Regex;
use std::sync::OnceLock;

macro_rules! cached_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static PATTERN: OnceLock<Regex> = OnceLock::new();
            PATTERN.get_or_init(|| Regex::new($pattern).expect("valid regex"))
        }
    };
}

cached_regex!(
    email_pattern,
    r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#
);
cached_regex!(
    url_pattern,
    r"(file|ftp|http|https)://(\w+:?\w*@)?(\S+)(:[0-9]+)?(/|/([\w#!:.?+=&%@\-/]))?"
);
cached_regex!(filename_forbidden, r#"[\\/:*?"<>|]"#);
cached_regex!(
    mobile_pattern,
    r"(?i)android|blackberry|mobile|iphone|ipad|ipod|mobile.+firefox|opera m(ob|in)i|phone"
);

/// Trimmed `email` if it is a syntactically valid address.
pub fn valid_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return None;
    }
    email_pattern()
        .is_match(email)
        .then(|| email.to_string())
}

/// Trimmed `url` if it contains a `file`, `ftp`, `http` or `https` URL.
pub fn valid_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    url_pattern().is_match(url).then(|| url.to_string())
}

/// `name` (trimmed when `trim` is set) if it has no path or shell-reserved
/// characters.
pub fn valid_filename(name: &str, trim: bool) -> Option<String> {
    let name = if trim { name.trim() } else { name };
    if name.is_empty() || filename_forbidden().is_match(name) {
        return None;
    }
    Some(name.to_string())
}

/// Whether a `User-Agent` header value looks like a mobile browser.
pub fn mobile_browser(user_agent: &str) -> bool {
    mobile_pattern().is_match(user_agent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert_eq!(
            valid_email("  user.name@example.com "),
            Some("user.name@example.com".to_string())
        );
        assert!(valid_email("user@[192.168.0.1]").is_some());
        assert!(valid_email("\"quoted user\"@example.org").is_some());
        assert!(valid_email("no-at-sign.example.com").is_none());
        assert!(valid_email("user@localhost").is_none());
        assert!(valid_email("   ").is_none());
    }

    #[test]
    fn test_valid_url() {
        assert!(valid_url("https://example.com/path?q=1").is_some());
        assert!(valid_url("ftp://user:pw@files.example.com").is_some());
        assert!(valid_url("example.com").is_none());
        assert!(valid_url("").is_none());
    }

    #[test]
    fn test_valid_filename() {
        assert_eq!(valid_filename(" report.pdf ", true), Some("report.pdf".to_string()));
        assert_eq!(valid_filename(" report.pdf ", false), Some(" report.pdf ".to_string()));
        assert!(valid_filename("a/b.txt", true).is_none());
        assert!(valid_filename("what?.txt", true).is_none());
        assert!(valid_filename("  ", true).is_none());
    }

    #[test]
    fn test_mobile_browser() {
        assert!(mobile_browser(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(mobile_browser("Mozilla/5.0 (Linux; Android 14; Pixel 8)"));
        assert!(!mobile_browser(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
        ));
    }
}
