use crate::ShareErrorKind;
use crate::share_link::reference::{long_url, reference_from_url};

use models::StorageReference;

use url::Url;

/// **VALUE**: Verifies that the last path segment is taken as the storage reference.
///
/// **WHY THIS MATTERS**: This is how a shared long-form URL finds its blob.
///
/// **BUG THIS CATCHES**: Would catch taking the first segment, or including the query.
#[test]
fn given_long_form_url_when_extracting_reference_then_returns_last_segment() {
    let cases = [
        ("https://api.jsonbin.io/v3/b/65f1c0ffee", "65f1c0ffee"),
        ("https://api.jsonbin.io/v3/b/65f1c0ffee/", "65f1c0ffee"),
        ("https://api.jsonbin.io/v3/b/65f1c0ffee?meta=false#x", "65f1c0ffee"),
        ("  http://localhost:9000/b/abc123  ", "abc123"),
    ];

    for (url, expected) in cases {
        assert_eq!(reference_from_url(url).unwrap().as_str(), expected, "for {url}");
    }
}

#[test]
fn given_unusable_url_when_extracting_reference_then_validation_error() {
    for url in ["", "abc123", "https://api.jsonbin.io", "https://api.jsonbin.io/"] {
        let error = reference_from_url(url).unwrap_err();
        assert_eq!(error.kind(), ShareErrorKind::Validation, "for {url:?}");
    }
}

/// **VALUE**: Verifies long-form URL construction with and without a trailing slash.
///
/// **WHY THIS MATTERS**: `Url::join` would drop the last base segment (`/b`) when the base
/// has no trailing slash, pointing every link at the wrong path.
///
/// **BUG THIS CATCHES**: Would catch a switch to `join` or naive string concatenation
/// producing `//`.
#[test]
fn given_base_url_when_building_long_url_then_appends_reference() {
    let reference = StorageReference::new("65f1c0ffee").unwrap();

    let plain = Url::parse("https://api.jsonbin.io/v3/b").unwrap();
    let slashed = Url::parse("https://api.jsonbin.io/v3/b/").unwrap();

    assert_eq!(long_url(&plain, &reference).unwrap().as_str(), "https://api.jsonbin.io/v3/b/65f1c0ffee");
    assert_eq!(long_url(&slashed, &reference).unwrap().as_str(), "https://api.jsonbin.io/v3/b/65f1c0ffee");
}

/// **VALUE**: Verifies an escaped reference survives extraction and rebuilding unchanged.
///
/// **WHY THIS MATTERS**: `path_segments` yields encoded text and `long_url` encodes again;
/// without decoding in between, `ab%20c` would be requested as `ab%2520c`.
///
/// **BUG THIS CATCHES**: Would catch double percent-encoding of the storage id.
#[test]
fn given_escaped_reference_when_rebuilding_long_url_then_encoded_once() {
    // GIVEN: A long-form URL whose id contains an escaped space
    let base = Url::parse("https://api.jsonbin.io/v3/b").unwrap();

    // WHEN: Extracting and rebuilding
    let reference = reference_from_url("https://api.jsonbin.io/v3/b/ab%20c").unwrap();
    let rebuilt = long_url(&base, &reference).unwrap();

    // THEN: Decoded id, single encoding on the way out
    assert_eq!(reference.as_str(), "ab c");
    assert_eq!(rebuilt.as_str(), "https://api.jsonbin.io/v3/b/ab%20c");
}

#[test]
fn given_invalid_utf8_escape_when_extracting_reference_then_validation_error() {
    let error = reference_from_url("https://api.jsonbin.io/v3/b/%FF%FE").unwrap_err();

    assert_eq!(error.kind(), ShareErrorKind::Validation);
}
