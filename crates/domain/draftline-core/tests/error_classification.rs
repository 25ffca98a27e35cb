use draftline_core::{classify_connect_error, classify_convert_error, ErrorKind, Stage, StageError};

#[test]
fn status_codes_map_to_connect_messages() {
    let cases = [
        ("Request failed with status 403 Forbidden", ErrorKind::AccessDenied, "Access denied"),
        ("HTTP 404: file missing", ErrorKind::NotFound, "not found"),
        ("401 Unauthorized", ErrorKind::InvalidCredentials, "Invalid access token"),
        ("status 429 Too Many Requests", ErrorKind::RateLimited, "Rate limit"),
    ];
    for (raw, kind, fragment) in cases {
        let err = classify_connect_error(raw);
        assert_eq!(err.kind(), kind, "{raw}");
        assert!(err.to_string().contains(fragment), "{raw} -> {err}");
    }
}

#[test]
fn unknown_connect_errors_keep_the_raw_text() {
    let err = classify_connect_error("connection reset by peer");
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(
        err.to_string(),
        "Failed to fetch design file: connection reset by peer"
    );
}

#[test]
fn convert_errors_split_parse_from_generic() {
    assert_eq!(
        classify_convert_error("SyntaxError: Unexpected token < at 1:3").kind(),
        ErrorKind::ParseFailure
    );
    assert_eq!(
        classify_convert_error("transformer crashed").kind(),
        ErrorKind::Generic
    );
}

#[test]
fn busy_message_names_the_stage() {
    let err = StageError::Busy(Stage::Finalize);
    assert_eq!(err.to_string(), "Finalize is already running");
    assert_eq!(err.kind(), ErrorKind::Busy);
}

#[test]
fn superseded_message_names_the_stage() {
    let err = StageError::Superseded(Stage::Finalize);
    assert_eq!(err.to_string(), "Finalize was reset before it finished");
    assert_eq!(err.kind(), ErrorKind::Superseded);
}
