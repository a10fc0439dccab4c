//! Mapping of non-success HTTP responses onto the error taxonomy.

use http::StatusCode;
use serde_json::{Map, Value};

use crate::error::{Error, FieldErrors};
use crate::transport::HttpResponse;

/// Converts a non-2xx response into the matching [`Error`].
///
/// The body is parsed as JSON when possible; anything else is treated as an
/// empty error payload so the caller still gets a usable error.
pub(super) fn error_from_response(response: &HttpResponse) -> Error {
    let body = parse_error_body(&response.body);
    let message = error_message(&body, response.status);
    let code = body.get("code").and_then(Value::as_str).map(str::to_string);

    match response.status {
        StatusCode::BAD_REQUEST => match body.get("errors") {
            Some(errors) => validation_error(message, Some(errors)),
            None => Error::api(message, response.status, code, Some(Value::Object(body))),
        },
        StatusCode::UNAUTHORIZED => Error::authentication(message),
        StatusCode::FORBIDDEN => Error::authorization(message),
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::UNPROCESSABLE_ENTITY => validation_error(message, body.get("errors")),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = response
                .header(http::header::RETRY_AFTER)
                .and_then(parse_retry_after);
            Error::rate_limit(message, retry_after)
        }
        status => Error::api(message, status, code, Some(Value::Object(body))),
    }
}

fn parse_error_body(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// `message`, then `error`, then the status reason phrase.
fn error_message(body: &Map<String, Value>, status: StatusCode) -> String {
    ["message", "error"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map_or_else(
            || {
                status
                    .canonical_reason()
                    .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
            },
            str::to_string,
        )
}

/// Field errors come from an `errors` object. Any other non-null `errors`
/// value is kept as the error's details instead.
fn validation_error(message: String, errors: Option<&Value>) -> Error {
    match errors {
        None | Some(Value::Null) => Error::validation(message, FieldErrors::new()),
        Some(errors @ Value::Object(_)) => Error::validation(message, field_errors(errors)),
        Some(raw) => Error::validation(message, FieldErrors::new()).with_details(raw.clone()),
    }
}

/// Accepts `{"field": ["msg", ...]}` and the single-message form
/// `{"field": "msg"}`. Other shapes yield no field errors.
fn field_errors(errors: &Value) -> FieldErrors {
    let Some(map) = errors.as_object() else {
        return FieldErrors::new();
    };

    map.iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map_or_else(|| item.to_string(), str::to_string)
                    })
                    .collect(),
                Value::String(s) => vec![s.clone()],
                other => vec![other.to_string()],
            };
            (field.clone(), messages)
        })
        .collect()
}

/// Parses the leading decimal digits of a `Retry-After` value as seconds.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"30"`,
/// `" 30"` and `"30s"` all yield 30. HTTP-date values yield `None`.
pub(super) fn parse_retry_after(value: &str) -> Option<u64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
