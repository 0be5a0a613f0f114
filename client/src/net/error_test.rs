use super::*;

#[test]
fn missing_relation_code_is_recognized() {
    let body = r#"{"code":"42P01","message":"relation \"public_topics_with_owners\" does not exist","details":null,"hint":null}"#;
    let err = ApiError::from_response(404, body);
    assert!(err.is_missing_relation());
}

#[test]
fn no_rows_code_maps_to_not_found() {
    let body = r#"{"code":"PGRST116","message":"JSON object requested, multiple (or no) rows returned"}"#;
    assert_eq!(ApiError::from_response(406, body), ApiError::NotFound);
}

#[test]
fn row_errors_keep_code_and_message() {
    let body = r#"{"code":"23505","message":"duplicate key value"}"#;
    assert_eq!(
        ApiError::from_response(409, body),
        ApiError::Backend { status: 409, code: Some("23505".into()), message: "duplicate key value".into() }
    );
}

#[test]
fn auth_error_shapes_are_read() {
    let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
    let err = ApiError::from_response(400, body);
    assert_eq!(err.to_string(), "backend error (400): Invalid login credentials");

    let legacy = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
    assert!(ApiError::from_response(400, legacy).to_string().ends_with("Email not confirmed"));
}

#[test]
fn unauthorized_status_maps_to_unauthenticated() {
    assert_eq!(ApiError::from_response(401, r#"{"message":"JWT expired"}"#), ApiError::Unauthenticated);
}

#[test]
fn unparseable_body_falls_back_to_status() {
    assert_eq!(
        ApiError::from_response(502, "<html>bad gateway</html>"),
        ApiError::Backend { status: 502, code: None, message: "HTTP 502".into() }
    );
}

#[test]
fn serde_errors_become_decode_errors() {
    let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ApiError::Decode(_)));
}
