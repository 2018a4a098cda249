//! Network fetching utilities with timeout support.
//!
//! Provides an authenticated JSON request helper that races the Fetch API
//! against a timeout.

use js_sys::{Array, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use crate::config::{FETCH_TIMEOUT_MS, GITHUB_ACCEPT};
use crate::core::error::FetchError;

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout.
///
/// # Returns
/// * `RaceResult::Completed` if promise resolves before timeout
/// * `RaceResult::TimedOut` if timeout occurs first
/// * `RaceResult::Error` if promise rejects
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Create timeout promise that resolves to undefined
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(
            e.as_string()
                .or_else(|| e.dyn_ref::<js_sys::Error>().map(|err| String::from(err.message())))
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
    }
}

// =============================================================================
// Authenticated Requests
// =============================================================================

/// Status and body text of a completed HTTP exchange.
///
/// Non-2xx responses are returned as-is; interpreting them is up to the
/// caller.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Send a bearer-authenticated request with an optional JSON body.
///
/// Uses [`race_with_timeout`]; if the request takes longer than
/// `FETCH_TIMEOUT_MS`, returns `FetchError::Timeout`.
pub async fn send_json(
    method: &str,
    url: &str,
    token: &str,
    body: Option<&str>,
) -> Result<HttpResponse, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
    headers
        .set("Authorization", &format!("Bearer {token}"))
        .map_err(|_| FetchError::RequestCreationFailed)?;
    headers
        .set("Accept", GITHUB_ACCEPT)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = body {
        headers
            .set("Content-Type", "application/json")
            .map_err(|_| FetchError::RequestCreationFailed)?;
        opts.set_body(&JsValue::from_str(body));
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    let fetch_promise = window.fetch_with_request(&request);

    match race_with_timeout(fetch_promise, FETCH_TIMEOUT_MS).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result
                .dyn_into()
                .map_err(|_| FetchError::ResponseReadFailed)?;
            let status = resp.status();

            let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
                .await
                .map_err(|_| FetchError::ResponseReadFailed)?;

            Ok(HttpResponse {
                status,
                body: text.as_string().unwrap_or_default(),
            })
        }
    }
}
