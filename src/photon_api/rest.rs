use crate::photon_api::resources::Page;
use crate::photon_api::types::{ApiError, PhotonError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Thin JSON transport over reqwest
///
/// Every method performs exactly one request (paging excepted) and converts
/// non-success statuses into [`PhotonError`]s carrying the server's message.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    http: reqwest::Client,
}

impl RestClient {
    pub(crate) fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) async fn get(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<reqwest::Response, PhotonError> {
        tracing::debug!("GET {}", url);
        let request = with_bearer(self.http.get(url), token);
        let response = request.send().await.map_err(|e| {
            tracing::error!("GET {} failed: {}", url, e);
            PhotonError::from(e)
        })?;
        check_response(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<reqwest::Response, PhotonError> {
        tracing::debug!("POST {}", url);
        let request = with_bearer(self.http.post(url), token)
            .header("Content-Type", "application/json")
            .json(body);
        let response = request.send().await.map_err(|e| {
            tracing::error!("POST {} failed: {}", url, e);
            PhotonError::from(e)
        })?;
        check_response(response).await
    }

    pub(crate) async fn delete(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<reqwest::Response, PhotonError> {
        tracing::debug!("DELETE {}", url);
        let request = with_bearer(self.http.delete(url), token);
        let response = request.send().await.map_err(|e| {
            tracing::error!("DELETE {} failed: {}", url, e);
            PhotonError::from(e)
        })?;
        check_response(response).await
    }

    /// Fetch every page of a collection, following `nextPageLink`
    ///
    /// Page links are paths relative to `endpoint`.
    pub(crate) async fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        url: &str,
        token: Option<&str>,
    ) -> Result<Vec<T>, PhotonError> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(page_url) = next.take() {
            let response = self.get(&page_url, token).await?;
            let page: Page<T> = decode_json(response).await?;
            items.extend(page.items);

            next = page
                .next_page_link
                .filter(|link| !link.is_empty())
                .map(|link| format!("{}{}", endpoint.trim_end_matches('/'), link));
        }

        Ok(items)
    }
}

fn with_bearer(request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
    match token {
        Some(token) if !token.is_empty() => {
            request.header("Authorization", format!("Bearer {}", token))
        }
        _ => request,
    }
}

/// Decode a JSON body, reporting the body text on failure
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, PhotonError> {
    let body = response.text().await.map_err(|e| {
        tracing::error!("Failed to read response body: {}", e);
        PhotonError::Transport(format!("Failed to read response: {}", e))
    })?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Failed to parse response: {}", e);
        PhotonError::Transport(format!("Failed to parse response: {} - Body: {}", e, body))
    })
}

/// Pass 2xx responses through; turn anything else into an error
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, PhotonError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    tracing::error!("Request failed: HTTP {} - {}", status.as_u16(), body);

    match serde_json::from_str::<ApiError>(&body) {
        Ok(mut api_error) => {
            api_error.http_status_code = status.as_u16();
            Err(PhotonError::Api(api_error))
        }
        Err(_) => Err(PhotonError::Http {
            status: status.as_u16(),
            message: body,
        }),
    }
}
