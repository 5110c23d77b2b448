use crate::{encode_share_string, parse_share_string};

#[test]
fn given_urls_when_encoding_then_joins_with_semicolons() {
    let urls = ["https://a.com", "https://b.com/x?y=1"];

    assert_eq!(encode_share_string(&urls), "https://a.com;https://b.com/x?y=1");
}

/// **VALUE**: Verifies that pasted text is trimmed and non-web entries dropped.
///
/// **WHY THIS MATTERS**: Pasted strings come from chat apps that add spaces and
/// newlines around separators.
///
/// **BUG THIS CATCHES**: Would catch a parser that forgets to trim, which would make
/// `" https://b.com"` fail the `http` prefix check.
#[test]
fn given_messy_pasted_text_when_parsing_then_returns_trimmed_web_urls() {
    // GIVEN: Text with whitespace, junk and an empty entry
    let text = " https://a.com ;\nhttps://b.com;; javascript:alert(1);not a url;http://c.com\n";

    // WHEN: Parsing
    let urls = parse_share_string(text);

    // THEN: Only the web URLs, trimmed, in order
    assert_eq!(urls, vec!["https://a.com", "https://b.com", "http://c.com"]);
}

#[test]
fn given_single_url_without_separator_when_parsing_then_accepts_it() {
    assert_eq!(parse_share_string("https://a.com"), vec!["https://a.com"]);
    assert!(parse_share_string("").is_empty());
    assert!(parse_share_string("hello world").is_empty());
}
