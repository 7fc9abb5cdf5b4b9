//! Errors encountered during claims requests or reported by the identity service.
use anyhow::Result;
use reqwest::Response;
use serde::de::DeserializeOwned;

/// The identity service rejected the claims request.
#[derive(Debug, thiserror::Error)]
#[error("the identity service rejected the claims request")]
pub struct ClientError;

/// Invalid response received from the identity service.
#[derive(Debug, thiserror::Error)]
#[error("invalid response received from the identity service: {response}")]
pub struct InvalidResponse {
    pub response: String,
}

/// The requested identity is not known to the identity service.
#[derive(Debug, thiserror::Error)]
#[error("the requested identity is not known to the identity service")]
pub struct ResourceNotFound;

/// The identity service failed to process the claims request.
#[derive(Debug, thiserror::Error)]
#[error("the identity service failed to process the claims request")]
pub struct ServerError;

/// Decode the body of an HTTP response and correctly handle errors in the process.
pub async fn inspect<T>(response: Response) -> Result<Option<T>>
where
    T: DeserializeOwned,
{
    let code = response.status();
    let text = response.text().await?;

    // Expect 404 errors to not have a meaningful response body.
    if matches!(code, reqwest::StatusCode::NOT_FOUND) {
        anyhow::bail!(ResourceNotFound);
    }

    // On error keep the response body around for troubleshooting.
    if code.is_client_error() || code.is_server_error() {
        let error = anyhow::anyhow!(InvalidResponse { response: text });
        let error = match code.is_client_error() {
            true => error.context(ClientError),
            false => error.context(ServerError),
        };
        return Err(error);
    }

    // On success decode the payload, if any, into the requested type.
    if text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<T>(&text)
        .map_err(|error| {
            let decode = InvalidResponse { response: text };
            anyhow::anyhow!(error).context(decode)
        })
        .map(Some)
}
