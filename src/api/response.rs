//! Non-2xx response normalization.

use reqwest::{Response, StatusCode};

use crate::models::ErrorBody;

/// `"<status>: <reason phrase>"`, e.g. `"500: Internal Server Error"`.
pub fn status_line(status: StatusCode) -> String {
    format!(
        "{}: {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown Status")
    )
}

/// Pick the message to show for a failed response: the JSON body's
/// `message` when there is one, the status line otherwise.
pub(crate) fn message_from_body(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.trim().is_empty() => message,
        _ => status_line(status),
    }
}

pub(crate) async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.bytes().await {
        Ok(body) => message_from_body(status, &body),
        Err(_) => status_line(status),
    }
}
