use crate::{ModelError, ShareBundle, ShortLink, StorageReference, TabRecord};

/// **VALUE**: Verifies that an empty tab list never becomes a bundle.
///
/// **WHY THIS MATTERS**: The service relies on this check to fail before any network
/// call. An empty bundle would create a useless blob and short link.
///
/// **BUG THIS CATCHES**: Would catch removal of the emptiness check.
#[test]
fn given_no_tabs_when_building_bundle_then_returns_validation_error() {
    let result = ShareBundle::from_tabs(&[]);

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("empty"), "Unexpected message: {message}");
        }
        Ok(bundle) => panic!("Expected validation error, got {bundle:?}"),
    }
}

/// **VALUE**: Verifies that one bad tab rejects the whole bundle and is identified.
///
/// **WHY THIS MATTERS**: Users need to know which tab broke the share.
///
/// **BUG THIS CATCHES**: Would catch validation that silently skips bad tabs.
#[test]
fn given_one_invalid_tab_when_building_bundle_then_names_its_index() {
    let tabs = vec![TabRecord::new("https://a.com"), TabRecord::new("mailto:me@a.com")];

    let err = ShareBundle::from_tabs(&tabs).unwrap_err();

    assert!(err.message().starts_with("Tab 1:"), "Unexpected message: {}", err.message());
}

/// **VALUE**: Verifies the wire shape `{"urls": [...]}` and that titles are dropped.
///
/// **WHY THIS MATTERS**: The resolve path reads `record.urls`; any other shape makes
/// every shared link unreadable.
///
/// **BUG THIS CATCHES**: Would catch a renamed field or titles leaking into the blob.
#[test]
fn given_titled_tabs_when_serializing_bundle_then_only_urls_in_order() {
    let tabs = vec![
        TabRecord::new("https://b.com").with_title("B"),
        TabRecord::new("https://a.com").with_favicon("https://a.com/f.ico"),
    ];

    let bundle = ShareBundle::from_tabs(&tabs).unwrap();
    let json = serde_json::to_value(&bundle).unwrap();

    assert_eq!(json, serde_json::json!({"urls": ["https://b.com", "https://a.com"]}));
    assert_eq!(bundle.len(), 2);
}

#[test]
fn given_blank_id_when_creating_storage_reference_then_fails() {
    assert!(StorageReference::new("").is_err());
    assert!(StorageReference::new("  ").is_err());

    let reference = StorageReference::new("65f1c0ffee").unwrap();
    assert_eq!(reference.to_string(), "65f1c0ffee");
}

#[test]
fn given_short_link_when_displayed_then_is_verbatim() {
    let link = ShortLink::new("https://bit.ly/3abcDEF");

    assert_eq!(link.to_string(), "https://bit.ly/3abcDEF");
    assert_eq!(link.into_inner(), "https://bit.ly/3abcDEF");
}
