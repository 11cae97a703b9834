//! Axum route handlers for the job fact-check API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::analysis::models::{JobAnalysisResult, JobQuery};
use crate::analysis::normalize::normalize;
use crate::analysis::prompt::build_prompt;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCheckRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_link: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl FactCheckRequest {
    /// Trims and validates the request into a `JobQuery`.
    /// The error names each missing field so clients can point at the input.
    fn into_query(self) -> Result<JobQuery, AppError> {
        let job_title = self.job_title.trim().to_string();
        let company_name = self.company_name.trim().to_string();

        let mut missing = Vec::new();
        if job_title.is_empty() {
            missing.push("jobTitle");
        }
        if company_name.is_empty() {
            missing.push("companyName");
        }
        if !missing.is_empty() {
            let message = if missing.len() == 1 {
                format!("{} is required", missing[0])
            } else {
                format!("{} are required", missing.join(" and "))
            };
            return Err(AppError::Validation(message));
        }

        Ok(JobQuery {
            job_title,
            company_name,
            job_link: self.job_link,
            location: self.location,
        })
    }
}

/// POST /api/jobs/fact-check
///
/// Validates input, relays a templated prompt to the model gateway, and runs
/// the raw payload through the normalization pipeline. The gateway is never
/// invoked when validation fails. Success responses carry the unwrapped
/// `JobAnalysisResult`; errors carry `{"status":"error","message"}`.
pub async fn handle_fact_check(
    State(state): State<AppState>,
    Json(request): Json<FactCheckRequest>,
) -> Result<Json<JobAnalysisResult>, AppError> {
    let query = request.into_query()?;
    info!(
        "Fact-checking \"{}\" at \"{}\"",
        query.job_title, query.company_name
    );

    let prompt = build_prompt(&query);
    let raw = state.gateway.query(&prompt).await?;

    Ok(Json(normalize(&raw, &query)))
}
