use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Backend origin, e.g. "https://api.example.com". Empty means same-origin,
/// for deployments that serve the UI and API behind one host.
fn api_base() -> &'static str {
    option_env!("LABLENS_API_BASE").unwrap_or("")
}

fn endpoint(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

// -- Errors --

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (network failure, CORS, abort).
    #[error("request failed: {0}")]
    Transport(gloo_net::Error),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(gloo_net::Error),
    /// A browser API call failed while assembling the request.
    #[error("browser error: {0}")]
    Browser(String),
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    ApiError::Status { status, message }
}

fn js_err(value: JsValue) -> ApiError {
    let message = value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"));
    ApiError::Browser(message)
}

// -- Wire types matching backend shapes --

/// One analyzed value from an uploaded report.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestResult {
    pub name: String,
    pub category: Option<String>,
    pub value: f64,
    pub unit: String,
    pub ref_min: Option<f64>,
    pub ref_max: Option<f64>,
    /// Backend-computed verdict; the literal "In Range" means in range.
    pub status: String,
}

/// A catalog row describing how the backend recognizes one test.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestDefinition {
    /// Backend-assigned key; absent (and not serialized) for a new row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub test_name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub ref_min: Option<f64>,
    pub ref_max: Option<f64>,
    /// Comma-separated aliases the backend matches against report text.
    pub possible_names: Option<String>,
}

/// Payload carried from the upload page to the result page, and the body
/// of the PDF request. Travels through router history state as a JsValue.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReportState {
    pub user_name: String,
    pub results: Vec<TestResult>,
}

#[derive(Deserialize)]
struct AnalyzeResponse {
    results: Vec<TestResult>,
}

// -- Typed request wrappers --

/// Fetch the full catalog of recognized tests.
pub async fn list_tests() -> Result<Vec<TestDefinition>, ApiError> {
    let response = Request::get(&endpoint("/tests/"))
        .send()
        .await
        .map_err(ApiError::Transport)?;
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response.json().await.map_err(ApiError::Decode)
}

/// Create a catalog row. Returns the stored row with its assigned id.
pub async fn create_test(definition: &TestDefinition) -> Result<TestDefinition, ApiError> {
    let response = Request::post(&endpoint("/tests/"))
        .json(definition)
        .map_err(ApiError::Transport)?
        .send()
        .await
        .map_err(ApiError::Transport)?;
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response.json().await.map_err(ApiError::Decode)
}

/// Replace the catalog row with the given id. Returns the stored row.
pub async fn update_test(id: i64, definition: &TestDefinition) -> Result<TestDefinition, ApiError> {
    let response = Request::put(&endpoint(&format!("/tests/{id}/")))
        .json(definition)
        .map_err(ApiError::Transport)?
        .send()
        .await
        .map_err(ApiError::Transport)?;
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response.json().await.map_err(ApiError::Decode)
}

/// Delete the catalog row with the given id.
pub async fn delete_test(id: i64) -> Result<(), ApiError> {
    let response = Request::delete(&endpoint(&format!("/tests/{id}/")))
        .send()
        .await
        .map_err(ApiError::Transport)?;
    if !response.ok() {
        return Err(status_error(response).await);
    }
    Ok(())
}

/// Send a report document for analysis as multipart form data.
/// The backend parses the document and returns the matched results.
pub async fn analyze_report(
    name: &str,
    file: &web_sys::File,
) -> Result<Vec<TestResult>, ApiError> {
    let form = web_sys::FormData::new().map_err(js_err)?;
    form.append_with_str("name", name).map_err(js_err)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_err)?;

    let response = Request::post(&endpoint("/analyze-report/"))
        .body(form)
        .map_err(ApiError::Transport)?
        .send()
        .await
        .map_err(ApiError::Transport)?;
    if !response.ok() {
        return Err(status_error(response).await);
    }
    let analysis: AnalyzeResponse = response.json().await.map_err(ApiError::Decode)?;
    Ok(analysis.results)
}

/// Render the report as a PDF on the backend and return the raw bytes.
pub async fn download_pdf(report: &ReportState) -> Result<Vec<u8>, ApiError> {
    let response = Request::post(&endpoint("/download-pdf/"))
        .json(report)
        .map_err(ApiError::Transport)?
        .send()
        .await
        .map_err(ApiError::Transport)?;
    if !response.ok() {
        return Err(status_error(response).await);
    }
    response.binary().await.map_err(ApiError::Decode)
}
