use crate::domain::{ApiError, ApiResult, Empresa, EmpresaDraft};
use serde::Deserialize;

/// Collection envelope returned by `GET /empresas`.
#[derive(Debug, Deserialize)]
struct ListEnvelope {
    data: Vec<Empresa>,
}

/// Error body shape; the server is expected to put a human-readable
/// message here, but nothing guarantees it.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Blocking client for the empresas collaborator API.
///
/// Stateless beyond the base URL; every call maps a single REST operation
/// and reports failures as [`ApiError`].
pub struct EmpresaClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl EmpresaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::blocking::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches the full company collection.
    pub fn list(&self) -> ApiResult<Vec<Empresa>> {
        let response = self
            .http
            .get(self.url("/empresas"))
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let response = check_status(response)?;
        let envelope: ListEnvelope = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }

    /// Submits a new company. The response body is ignored.
    pub fn create(&self, draft: &EmpresaDraft) -> ApiResult<()> {
        let response = self
            .http
            .post(self.url("/empresas"))
            .json(draft)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response)?;
        Ok(())
    }

    /// Deletes the company with the given id. The response body is ignored.
    pub fn delete(&self, id: u32) -> ApiResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/empresas/{}", id)))
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check_status(response)?;
        Ok(())
    }
}

/// Turns a non-2xx response into [`ApiError::Server`], extracting the
/// server's message when the body carries one.
fn check_status(
    response: reqwest::blocking::Response,
) -> ApiResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        message: extract_message(&body),
    })
}

fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}
