use crate::HttpStatusCode;

/// **VALUE**: Verifies that only transient statuses are retryable.
///
/// **WHY THIS MATTERS**: Callers decide whether to retry a failed resolve from
/// this flag. Retrying a 401 from the shortener just burns quota.
///
/// **BUG THIS CATCHES**: Would catch a range check replacing the explicit list
/// (e.g. treating every 5xx, or every 4xx, as transient).
#[test]
fn given_status_codes_when_checking_retryable_then_only_transient_codes_match() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should be retryable");
    }

    for code in [200, 400, 401, 403, 404, 500, 501] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not be retryable");
    }
}

#[test]
fn given_status_codes_when_classifying_then_ranges_are_disjoint() {
    let not_found = HttpStatusCode::from(404);
    let internal = HttpStatusCode::from(500);
    let unauthorized = HttpStatusCode::from(401);

    assert!(not_found.is_client_error() && !not_found.is_server_error());
    assert!(internal.is_server_error() && !internal.is_client_error());
    assert!(unauthorized.is_auth_error());
    assert!(!not_found.is_auth_error());
    assert_eq!(internal.to_string(), "500");
}
