use web_sys::AbortSignal;

use webmaps_shared::{FetchError, StyleDocument, StyleId};

/// Fetch the style document for `style`. Aborting `signal` fails the request
/// with a network error.
pub async fn fetch_style(
    style: StyleId,
    signal: Option<&AbortSignal>,
) -> Result<StyleDocument, FetchError> {
    let resp = gloo_net::http::Request::get(&style.path())
        .abort_signal(signal)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(FetchError::Status(resp.status()));
    }

    let value = resp
        .json::<serde_json::Value>()
        .await
        .map_err(|e| FetchError::Parse(e.to_string()))?;
    StyleDocument::try_from(value)
}
