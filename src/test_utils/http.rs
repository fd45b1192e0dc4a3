use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::Value;

#[track_caller]
pub(crate) fn assert_content_type(response: &TestResponse, content_type: &str) {
    assert_eq!(get_header(response, "content-type"), content_type);
}

#[track_caller]
pub(crate) fn get_header(response: &TestResponse, header_name: &str) -> String {
    let header_error_message = format!("Headers missing {header_name}");

    response
        .headers()
        .get(header_name)
        .expect(&header_error_message)
        .to_str()
        .expect("Could not convert to str")
        .to_string()
}

/// Check that `response` failed with `status` and the JSON error envelope.
#[track_caller]
pub(crate) fn assert_error_message(response: &TestResponse, status: StatusCode, message: &str) {
    response.assert_status(status);

    let body = response.json::<Value>();
    assert_eq!(body["success"], false, "unexpected body {body}");
    assert_eq!(body["message"], message, "unexpected body {body}");
}
